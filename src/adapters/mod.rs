//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`TungsteniteConnector`] - WebSocket transport using tokio-tungstenite
//! - [`FileEndpointStore`] - File-based endpoint storage
//!
//! The [`mock`] submodule provides test doubles for both.

pub mod file_settings;
pub mod mock;
pub mod tungstenite_ws;

pub use file_settings::FileEndpointStore;
pub use mock::{InMemoryEndpointStore, MockConnector};
pub use tungstenite_ws::TungsteniteConnector;
