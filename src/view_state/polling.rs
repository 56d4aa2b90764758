use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::constants::polling::{MAX_LIVE_REFRESH_SECONDS, MIN_LIVE_REFRESH_SECONDS};
use crate::data_fetcher::SportradarClient;
use crate::data_fetcher::models::{ApiResponse, SchedulesResponse};

const CHANNEL_CAPACITY: usize = 4;

/// Keeps an interval inside the accepted live refresh bounds
pub fn clamp_refresh_interval(seconds: u64) -> Duration {
    Duration::from_secs(seconds.clamp(MIN_LIVE_REFRESH_SECONDS, MAX_LIVE_REFRESH_SECONDS))
}

/// Background task that refreshes the live schedule on a fixed interval.
///
/// Every envelope, failed ones included, is sent on the channel returned by
/// [`LivePoller::spawn`]. The task stops when the poller is dropped or the
/// receiver goes away.
#[derive(Debug)]
pub struct LivePoller {
    handle: JoinHandle<()>,
    interval: Duration,
}

impl LivePoller {
    pub fn spawn(
        client: Arc<SportradarClient>,
        interval: Duration,
    ) -> (Self, mpsc::Receiver<ApiResponse<SchedulesResponse>>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        info!("Starting live polling every {:?}", interval);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                // The first tick completes immediately
                ticker.tick().await;
                let response = client.live_schedules().await;
                if tx.send(response).await.is_err() {
                    debug!("Live poll receiver dropped, stopping");
                    break;
                }
            }
        });

        (Self { handle, interval }, rx)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for LivePoller {
    fn drop(&mut self) {
        self.handle.abort();
        debug!("Live polling stopped");
    }
}
