//! Test doubles beyond the ones shipped in `parley::adapters::mock`.

use std::sync::{Arc, Mutex};

use parley::adapters::mock::{InMemoryEndpointStore, MockConnector};
use parley::traits::{ConnectionHandle, Connector, EventSink};

/// Wraps a [`MockConnector`] and records what the store held at each `open`.
#[derive(Clone)]
pub struct ProbingConnector {
    inner: MockConnector,
    store: InMemoryEndpointStore,
    saved_at_open: Arc<Mutex<Vec<Option<String>>>>,
}

impl ProbingConnector {
    pub fn new(store: InMemoryEndpointStore) -> Self {
        Self {
            inner: MockConnector::new(),
            store,
            saved_at_open: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn inner(&self) -> &MockConnector {
        &self.inner
    }

    /// The saved endpoint observed at each `open`, in order.
    pub fn saved_at_open(&self) -> Vec<Option<String>> {
        self.saved_at_open.lock().unwrap().clone()
    }
}

impl Connector for ProbingConnector {
    fn open(&self, url: &str, sink: EventSink) -> Box<dyn ConnectionHandle> {
        self.saved_at_open.lock().unwrap().push(self.store.saved());
        self.inner.open(url, sink)
    }
}
