use std::sync::Arc;

use arc_swap::ArcSwap;

use super::network::NetworkRateSample;
use super::process::{ProcessInfo, top_by_cpu};
use super::snapshot::MetricsSnapshot;

/// Read side of a [`Sampler`](super::sampler::Sampler). Cloning is cheap and
/// reads never wait on the sampler.
#[derive(Clone)]
pub struct MetricsHandle {
    snapshot: Arc<ArcSwap<MetricsSnapshot>>,
    rates: Arc<ArcSwap<NetworkRateSample>>,
}

impl MetricsHandle {
    pub(crate) fn new(
        snapshot: Arc<ArcSwap<MetricsSnapshot>>,
        rates: Arc<ArcSwap<NetworkRateSample>>,
    ) -> Self {
        Self { snapshot, rates }
    }

    pub fn snapshot(&self) -> Arc<MetricsSnapshot> {
        self.snapshot.load_full()
    }

    pub fn rate_sample(&self) -> Arc<NetworkRateSample> {
        self.rates.load_full()
    }

    pub fn top_by_cpu(&self, limit: usize) -> Vec<ProcessInfo> {
        top_by_cpu(&self.snapshot.load().processes, limit)
    }
}
