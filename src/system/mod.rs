pub mod collector;
pub mod fake;
pub mod handle;
pub mod network;
pub mod platform;
pub mod probe;
pub mod process;
pub mod sampler;
pub mod snapshot;
pub mod store;

pub use collector::SysinfoProbe;
pub use handle::MetricsHandle;
pub use network::{NetworkCounters, NetworkRateSample, RateTracker};
pub use probe::{Probe, ProbeError};
pub use process::{ProcessInfo, top_by_cpu};
pub use sampler::{Sampler, SamplerOptions};
pub use snapshot::MetricsSnapshot;
pub use store::{Category, SnapshotStore};
