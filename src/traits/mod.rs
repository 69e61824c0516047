//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`Connector`] / [`ConnectionHandle`] - Socket transport
//! - [`EndpointStore`] - Durable endpoint URL storage

pub mod settings;
pub mod transport;

pub use settings::{EndpointStore, SettingsError};
pub use transport::{
    ConnectionHandle, ConnectionId, Connector, EventSink, SessionSignal, TransportEvent,
};
