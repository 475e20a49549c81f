use tracing::{debug, debug_span, warn};

use super::handle::MetricsHandle;
use super::network::RateTracker;
use super::probe::Probe;
use super::store::{Category, SnapshotStore};

#[derive(Clone, Debug, Default)]
pub struct SamplerOptions {
    pub preferred_interface: Option<String>,
}

/// One writer for the snapshot and rate cells. Each [`Sampler::on_tick`]
/// refreshes the snapshot and then advances the rate tracker.
pub struct Sampler<P: Probe> {
    probe: P,
    store: SnapshotStore,
    tracker: RateTracker,
    rate_interface: Option<String>,
}

impl<P: Probe> Sampler<P> {
    /// Builds the sampler and runs the first tick synchronously so readers
    /// never see an empty snapshot.
    pub fn new(probe: P, options: SamplerOptions) -> Self {
        let mut sampler = Self {
            probe,
            store: SnapshotStore::new(options.preferred_interface),
            tracker: RateTracker::new(),
            rate_interface: None,
        };
        sampler.on_tick();
        sampler
    }

    pub fn on_tick(&mut self) {
        let _span = debug_span!("sampler.tick").entered();

        self.store.refresh(&mut self.probe);
        let snapshot = self.store.snapshot();

        let Some(interface) = snapshot.network.interface.as_deref() else {
            debug!("no network interface resolved, skipping rate update");
            return;
        };

        if self.rate_interface.as_deref() != Some(interface) {
            if let Some(old) = &self.rate_interface {
                debug!(from = %old, to = %interface, "network interface changed, resetting baseline");
            }
            self.tracker.reset();
            self.rate_interface = Some(interface.to_string());
        }

        match self.probe.query_network_counters(interface) {
            Ok(counters) => self.tracker.tick(counters),
            Err(error) => {
                warn!(category = %Category::Network, %interface, %error, "counter probe failed, keeping last rate sample");
            }
        }
    }

    pub fn handle(&self) -> MetricsHandle {
        MetricsHandle::new(self.store.shared(), self.tracker.shared())
    }

    pub fn failing_categories(&self) -> Vec<Category> {
        self.store.failing_categories()
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn probe_mut(&mut self) -> &mut P {
        &mut self.probe
    }
}
