// Cancellable timers backing the accrual loop and the undo window.
//
// Boundaries
// - Each timer owns at most one spawned task. Starting again aborts the previous task first.
// - Dropping a timer aborts its task, so no callback outlives its owner.

use crate::modules::earnings::core::accrual::TICK_INTERVAL;
use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

#[derive(Debug, Default)]
pub struct TickTimer {
    handle: Option<JoinHandle<()>>,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls `on_tick` every `TICK_INTERVAL`, first one interval from now, until it breaks
    /// or the timer is cancelled.
    pub fn start<F, Fut>(&mut self, mut on_tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ControlFlow<()>> + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                interval.tick().await;
                if on_tick().await.is_break() {
                    break;
                }
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Debug, Default)]
pub struct UndoCountdown {
    handle: Option<JoinHandle<()>>,
}

impl UndoCountdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any pending countdown with one that runs `on_expiry` after `window`.
    pub fn restart<F, Fut>(&mut self, window: Duration, on_expiry: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            on_expiry().await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for UndoCountdown {
    fn drop(&mut self) {
        self.cancel();
    }
}
