mod notice;

pub use notice::{Notice, Severity};
