//! Periodic polling of the live draw feed.

use crate::error::Result;
use crate::types::LiveDraw;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[async_trait]
pub trait LiveSource: Send + Sync {
    async fn fetch_live(&self) -> Result<LiveDraw>;
}

/// What the live board shows. `error` is set by a failed tick and cleared by the next good one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveView {
    pub draw: Option<LiveDraw>,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct LivePoller {
    source: Arc<dyn LiveSource>,
    period: Duration,
    view: Arc<RwLock<LiveView>>,
}

impl LivePoller {
    pub fn new(source: Arc<dyn LiveSource>, period: Duration) -> Self {
        Self {
            source,
            period,
            view: Arc::new(RwLock::new(LiveView::default())),
        }
    }

    pub fn view(&self) -> LiveView {
        self.view.read().clone()
    }

    /// One fetch. Success replaces the view; failure keeps the last draw.
    pub async fn tick(&self) -> bool {
        match self.source.fetch_live().await {
            Ok(draw) => {
                *self.view.write() = LiveView {
                    draw: Some(draw),
                    error: None,
                    updated_at: Some(Utc::now()),
                };
                true
            }
            Err(e) => {
                tracing::warn!("Error fetching live data: {}", e);
                self.view.write().error = Some(e.to_string());
                false
            }
        }
    }

    /// Spawns the polling task, fetching immediately and then every period.
    pub fn start(&self) -> PollerHandle {
        let poller = self.clone();
        let period = self.period;

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                poller.tick().await;
            }
        });

        tracing::debug!("Live poller started, period {:?}", period);
        PollerHandle {
            task,
            view: self.view.clone(),
        }
    }
}

/// Owns the polling task. Dropping the handle stops polling.
pub struct PollerHandle {
    task: JoinHandle<()>,
    view: Arc<RwLock<LiveView>>,
}

impl PollerHandle {
    pub fn view(&self) -> LiveView {
        self.view.read().clone()
    }

    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TwoDError;
    use crate::types::LiveSnapshot;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedSource {
        calls: AtomicUsize,
        script: Mutex<VecDeque<Result<LiveDraw>>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<LiveDraw>>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                script: Mutex::new(script.into()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LiveSource for ScriptedSource {
        async fn fetch_live(&self) -> Result<LiveDraw> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .pop_front()
                .unwrap_or_else(|| Ok(draw("--")))
        }
    }

    fn draw(twod: &str) -> LiveDraw {
        LiveDraw {
            live: Some(LiveSnapshot {
                twod: Some(twod.to_string()),
                ..LiveSnapshot::default()
            }),
            ..LiveDraw::default()
        }
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_ticks_replace_and_failures_keep_last_value() {
        let source = ScriptedSource::new(vec![
            Ok(draw("47")),
            Ok(draw("52")),
            Err(TwoDError::network("timeout")),
            Ok(draw("60")),
        ]);
        let poller = LivePoller::new(source.clone(), Duration::from_secs(2));
        assert_eq!(poller.view(), LiveView::default());

        assert!(poller.tick().await);
        assert_eq!(poller.view().draw.unwrap().current_twod(), Some("47"));

        assert!(poller.tick().await);
        assert_eq!(poller.view().draw.unwrap().current_twod(), Some("52"));

        assert!(!poller.tick().await);
        let view = poller.view();
        assert_eq!(view.draw.unwrap().current_twod(), Some("52"));
        assert!(view.error.unwrap().contains("timeout"));

        assert!(poller.tick().await);
        let view = poller.view();
        assert_eq!(view.draw.unwrap().current_twod(), Some("60"));
        assert!(view.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_every_period_until_stopped() {
        let source = ScriptedSource::new(vec![]);
        let poller = LivePoller::new(source.clone(), Duration::from_secs(2));

        let handle = poller.start();
        settle().await;
        assert_eq!(source.calls(), 1);
        assert!(handle.view().draw.is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        settle().await;
        assert_eq!(source.calls(), 2);

        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(source.calls(), 2);

        handle.stop();
        settle().await;
        assert!(!handle.is_running());

        tokio::time::advance(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_polling() {
        let source = ScriptedSource::new(vec![]);
        let poller = LivePoller::new(source.clone(), Duration::from_secs(2));

        let handle = poller.start();
        settle().await;
        assert_eq!(source.calls(), 1);
        drop(handle);

        tokio::time::advance(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(source.calls(), 1);
        // the poller keeps the last view after its task is gone
        assert!(poller.view().draw.is_some());
    }
}
