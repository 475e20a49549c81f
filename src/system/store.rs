use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use arc_swap::ArcSwap;
use tracing::{debug, info, warn};

use super::probe::{Probe, ProbeError};
use super::snapshot::{MetricsSnapshot, NetworkIdentity};

/// A category that keeps failing warns again every this many ticks.
const REWARN_EVERY: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Cpu,
    Memory,
    Gpu,
    Processes,
    Os,
    Network,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Cpu => "cpu",
            Category::Memory => "memory",
            Category::Gpu => "gpu",
            Category::Processes => "processes",
            Category::Os => "os",
            Category::Network => "network",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Latest published [`MetricsSnapshot`].
///
/// Only the owner refreshes (`&mut self`); readers go through the shared
/// cell handed out by [`SnapshotStore::shared`] and always observe one
/// complete snapshot.
pub struct SnapshotStore {
    current: Arc<ArcSwap<MetricsSnapshot>>,
    preferred_interface: Option<String>,
    /// Consecutive failures per currently failing category.
    failing: BTreeMap<Category, u32>,
}

impl SnapshotStore {
    pub fn new(preferred_interface: Option<String>) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(MetricsSnapshot::default())),
            preferred_interface,
            failing: BTreeMap::new(),
        }
    }

    /// Query every category and publish the result as one new snapshot.
    /// A failing category keeps its last known value.
    pub fn refresh(&mut self, probe: &mut dyn Probe) {
        let previous = self.current.load_full();

        let cpu = self.resolve(Category::Cpu, probe.query_cpu(), &previous.cpu);
        let memory = self.resolve(Category::Memory, probe.query_memory(), &previous.memory);
        let gpu = self.resolve(Category::Gpu, probe.query_gpu(), &previous.gpu);
        // Processes go before the OS query so its process count matches this tick.
        let processes = self.resolve(
            Category::Processes,
            probe.query_processes(),
            &previous.processes,
        );
        let os = self.resolve(Category::Os, probe.query_os(), &previous.os);

        let interface = probe
            .query_network_interface(self.preferred_interface.as_deref())
            .map(|name| NetworkIdentity {
                interface: Some(name),
            });
        let network = self.resolve(Category::Network, interface, &previous.network);

        let snapshot = MetricsSnapshot {
            tick: previous.tick + 1,
            refreshed_at: SystemTime::now(),
            cpu,
            memory,
            gpu,
            os,
            network,
            processes,
        };
        self.current.store(Arc::new(snapshot));
    }

    pub fn snapshot(&self) -> Arc<MetricsSnapshot> {
        self.current.load_full()
    }

    pub fn failing_categories(&self) -> Vec<Category> {
        self.failing.keys().copied().collect()
    }

    pub fn consecutive_failures(&self, category: Category) -> u32 {
        self.failing.get(&category).copied().unwrap_or(0)
    }

    pub(crate) fn shared(&self) -> Arc<ArcSwap<MetricsSnapshot>> {
        Arc::clone(&self.current)
    }

    fn resolve<T: Clone>(
        &mut self,
        category: Category,
        result: Result<T, ProbeError>,
        last_known: &T,
    ) -> T {
        match result {
            Ok(value) => {
                if let Some(failures) = self.failing.remove(&category) {
                    info!(%category, failures, "probe recovered");
                }
                value
            }
            Err(error) => {
                let failures = self.failing.entry(category).or_insert(0);
                *failures = failures.saturating_add(1);
                let failures = *failures;
                if failures % REWARN_EVERY == 1 {
                    warn!(%category, failures, %error, "probe failed, keeping last known value");
                } else {
                    debug!(%category, failures, %error, "probe still failing");
                }
                last_known.clone()
            }
        }
    }
}
