use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::system::probe::Probe;
use crate::system::sampler::Sampler;

const MIN_PERIOD: Duration = Duration::from_millis(10);

pub struct SamplerTask {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SamplerTask {
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(error) = self.task.await {
            warn!(%error, "sampler task ended abnormally");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Drive `sampler` every `period` until shut down.
///
/// Ticks run on the blocking pool one at a time; a tick that overruns the
/// period swallows the ticks it missed instead of queueing them.
pub fn spawn<P: Probe + 'static>(sampler: Sampler<P>, period: Duration) -> SamplerTask {
    let period = period.max(MIN_PERIOD);
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut sampler = sampler;
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // First tick fires immediately and Sampler::new already sampled.
        interval.tick().await;
        info!(period_ms = period.as_millis() as u64, "sampler started");

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let tick = tokio::task::spawn_blocking(move || {
                        sampler.on_tick();
                        sampler
                    });
                    sampler = match tick.await {
                        Ok(sampler) => sampler,
                        Err(error) => {
                            error!(%error, "sampler tick failed, stopping");
                            return;
                        }
                    };
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        info!("sampler stopped");
    });

    SamplerTask { shutdown, task }
}
