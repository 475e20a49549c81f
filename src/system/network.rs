use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;

/// Cumulative interface totals as reported by the OS.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NetworkCounters {
    pub sent_bytes: u64,
    pub received_bytes: u64,
    pub sent_packets: u64,
    pub received_packets: u64,
}

impl NetworkCounters {
    /// Component-wise `self - previous`, clamped at zero so a counter reset
    /// never produces a negative rate.
    pub fn delta_since(&self, previous: &NetworkCounters) -> NetworkCounters {
        NetworkCounters {
            sent_bytes: self.sent_bytes.saturating_sub(previous.sent_bytes),
            received_bytes: self.received_bytes.saturating_sub(previous.received_bytes),
            sent_packets: self.sent_packets.saturating_sub(previous.sent_packets),
            received_packets: self.received_packets.saturating_sub(previous.received_packets),
        }
    }
}

/// Totals plus the change since the previous tick. The `last_*` values are
/// raw per-tick deltas; they read as per-second only when the tick period is
/// one second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NetworkRateSample {
    pub total_sent_bytes: u64,
    pub total_received_bytes: u64,
    pub total_sent_packets: u64,
    pub total_received_packets: u64,
    pub last_sent_bytes: u64,
    pub last_received_bytes: u64,
    pub last_sent_packets: u64,
    pub last_received_packets: u64,
}

impl NetworkRateSample {
    fn from_tick(current: &NetworkCounters, delta: &NetworkCounters) -> Self {
        Self {
            total_sent_bytes: current.sent_bytes,
            total_received_bytes: current.received_bytes,
            total_sent_packets: current.sent_packets,
            total_received_packets: current.received_packets,
            last_sent_bytes: delta.sent_bytes,
            last_received_bytes: delta.received_bytes,
            last_sent_packets: delta.sent_packets,
            last_received_packets: delta.received_packets,
        }
    }
}

#[derive(Debug)]
pub struct RateTracker {
    previous: Option<NetworkCounters>,
    published: Arc<ArcSwap<NetworkRateSample>>,
}

impl Default for RateTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RateTracker {
    pub fn new() -> Self {
        Self {
            previous: None,
            published: Arc::new(ArcSwap::from_pointee(NetworkRateSample::default())),
        }
    }

    pub fn tick(&mut self, current: NetworkCounters) {
        // No baseline yet: seed it and report no movement.
        let delta = match &self.previous {
            Some(previous) => current.delta_since(previous),
            None => NetworkCounters::default(),
        };
        self.previous = Some(current);
        self.published
            .store(Arc::new(NetworkRateSample::from_tick(&current, &delta)));
    }

    /// Drop the baseline and publish an empty sample. The next tick seeds
    /// again with zero deltas.
    pub fn reset(&mut self) {
        self.previous = None;
        self.published.store(Arc::new(NetworkRateSample::default()));
    }

    pub fn sample(&self) -> Arc<NetworkRateSample> {
        self.published.load_full()
    }

    pub(crate) fn shared(&self) -> Arc<ArcSwap<NetworkRateSample>> {
        Arc::clone(&self.published)
    }
}
