use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use crate::sessions::SessionStore;

/// Upper bound on the sweep period, so long TTLs still free slots promptly.
const MAX_SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// Periodically evicts idle sessions. Runs until the returned task is aborted.
pub fn spawn_idle_sweeper(store: SessionStore) -> JoinHandle<()> {
    let period = (store.idle_ttl() / 2)
        .clamp(Duration::from_secs(1), MAX_SWEEP_PERIOD);

    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let evicted = store.evict_idle().await;
            debug!(evicted, "Idle session sweep");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fold::{FoldSimulator, SimulationParameters};

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_abandoned_sessions() {
        let ttl = Duration::from_secs(10);
        let store = SessionStore::new(8, ttl);
        for _ in 0..3 {
            store
                .create(FoldSimulator::new(SimulationParameters::new(0.1, 21.0)))
                .await
                .unwrap();
        }
        let sweeper = spawn_idle_sweeper(store.clone());

        // Paused time auto-advances while every task is idle.
        tokio::time::sleep(ttl * 2).await;

        assert_eq!(store.len().await, 0);
        sweeper.abort();
    }
}
