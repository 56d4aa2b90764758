//! Single in-flight request per resource key

use futures::future::{AbortHandle, Abortable, Aborted};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::error::AppError;

/// Tracks the running request for each key. Starting a new request for a key
/// aborts the one already running for it.
#[derive(Debug, Default)]
pub struct InFlightRequests {
    // generation counter tells our own handle apart from a newer one
    running: Mutex<HashMap<String, (u64, AbortHandle)>>,
    next_id: AtomicU64,
}

impl InFlightRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `fut` as the current request for `key`.
    ///
    /// Returns `RequestSuperseded` if a later call for the same key aborted it.
    pub async fn run<T, F>(&self, key: &str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let id = self.register(key, handle);

        let result = Abortable::new(fut, registration).await;
        self.unregister(key, id);

        match result {
            Ok(inner) => inner,
            Err(Aborted) => {
                debug!("Request for {} was superseded", key);
                Err(AppError::request_superseded(key))
            }
        }
    }

    fn register(&self, key: &str, handle: AbortHandle) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut running = self.running.lock().unwrap_or_else(|e| e.into_inner());
        if let Some((_, previous)) = running.insert(key.to_string(), (id, handle)) {
            debug!("Cancelling in-flight request for {}", key);
            previous.abort();
        }
        id
    }

    fn unregister(&self, key: &str, id: u64) {
        let mut running = self.running.lock().unwrap_or_else(|e| e.into_inner());
        if running.get(key).is_some_and(|(current, _)| *current == id) {
            running.remove(key);
        }
    }

    /// Number of requests currently running
    pub fn len(&self) -> usize {
        self.running
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Aborts every running request
    pub fn cancel_all(&self) {
        let mut running = self.running.lock().unwrap_or_else(|e| e.into_inner());
        for (_, (_, handle)) in running.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_second_request_supersedes_first() {
        let in_flight = Arc::new(InFlightRequests::new());

        let first = {
            let in_flight = in_flight.clone();
            tokio::spawn(async move {
                in_flight
                    .run("/competitions", async {
                        tokio::time::sleep(Duration::from_millis(200)).await;
                        Ok::<_, AppError>("first")
                    })
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        let second = in_flight
            .run("/competitions", async { Ok::<_, AppError>("second") })
            .await;

        let first = first.await.unwrap();
        assert!(matches!(first, Err(AppError::RequestSuperseded { .. })));
        assert_eq!(second.unwrap(), "second");
        assert!(in_flight.is_empty());
    }

    #[tokio::test]
    async fn test_different_keys_do_not_cancel() {
        let in_flight = InFlightRequests::new();
        let (a, b) = tokio::join!(
            in_flight.run("/a", async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok::<_, AppError>(1)
            }),
            in_flight.run("/b", async { Ok::<_, AppError>(2) })
        );
        assert_eq!(a.unwrap(), 1);
        assert_eq!(b.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_errors_pass_through() {
        let in_flight = InFlightRequests::new();
        let result: Result<(), AppError> = in_flight
            .run("/a", async { Err(AppError::api_not_found("u")) })
            .await;
        assert!(matches!(result, Err(AppError::ApiNotFound { .. })));
    }

    #[tokio::test]
    async fn test_cancel_all() {
        let in_flight = Arc::new(InFlightRequests::new());
        let task = {
            let in_flight = in_flight.clone();
            tokio::spawn(async move {
                in_flight
                    .run("/slow", async {
                        tokio::time::sleep(Duration::from_secs(5)).await;
                        Ok::<_, AppError>(())
                    })
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(in_flight.len(), 1);
        in_flight.cancel_all();
        assert!(matches!(
            task.await.unwrap(),
            Err(AppError::RequestSuperseded { .. })
        ));
    }
}
