//! Mock implementations for testing.
//!
//! - [`MockConnector`] - Transport with event injection and frame capture
//! - [`InMemoryEndpointStore`] - In-memory endpoint storage

pub mod settings;
pub mod transport;

pub use settings::InMemoryEndpointStore;
pub use transport::{MockConnection, MockConnector};
