//! Keep-alive timer for the open connection.
//!
//! The timer does not send anything itself. Each tick is delivered to the
//! session's dispatch queue as [`SessionSignal::HeartbeatTick`], and the
//! session decides whether a ping goes out.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::traits::{ConnectionId, SessionSignal};

/// Default keep-alive period.
pub const HEARTBEAT_PERIOD: Duration = Duration::from_secs(5 * 60);

/// Repeating timer bound to one connection.
#[derive(Debug)]
pub struct Heartbeat {
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl Heartbeat {
    pub fn new(period: Duration) -> Self {
        Self { period, task: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Start ticking for `id`. The first tick fires one period from now.
    ///
    /// Any previous timer is cancelled first.
    pub fn start(&mut self, id: ConnectionId, signals: mpsc::UnboundedSender<SessionSignal>) {
        self.stop();

        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if signals.send(SessionSignal::HeartbeatTick { id }).is_err() {
                    break;
                }
            }
        }));
        debug!("Heartbeat started for connection {} every {:?}", id, period);
    }

    /// Cancel future ticks. Idempotent.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Heartbeat stopped");
        }
    }
}

impl Default for Heartbeat {
    fn default() -> Self {
        Self::new(HEARTBEAT_PERIOD)
    }
}

impl Drop for Heartbeat {
    fn drop(&mut self) {
        self.stop();
    }
}
