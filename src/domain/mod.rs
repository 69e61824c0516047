//! Domain objects owned by the app state.

mod input;

pub use input::TextField;
