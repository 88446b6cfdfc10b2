//! Loader gate: keeps the busy overlay up for a minimum time.
//!
//! The hide is a spawned timer task. Its handle is kept so that a new `show`
//! (or an explicit [`LoaderGate::cancel`]) aborts it; overlapping switches
//! therefore never leave a stray hide that fires early. Outside a tokio
//! runtime there is nothing to run the timer on, so the overlay is hidden
//! straight away and a warning is logged.

use crate::host::Overlay;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// Minimum time the overlay stays visible.
pub const MIN_DURATION: Duration = Duration::from_millis(800);

pub struct LoaderGate {
    overlay: Arc<dyn Overlay>,
    min_duration: Duration,
    pending_hide: Option<JoinHandle<()>>,
}

impl LoaderGate {
    pub fn new(overlay: Arc<dyn Overlay>, min_duration: Duration) -> Self {
        Self {
            overlay,
            min_duration,
            pending_hide: None,
        }
    }

    pub fn min_duration(&self) -> Duration {
        self.min_duration
    }

    /// How long to keep the overlay up once `elapsed` has already passed.
    pub fn hide_delay(&self, elapsed: Duration) -> Duration {
        self.min_duration.saturating_sub(elapsed)
    }

    /// Show the overlay, run `work`, then hide once the minimum has passed.
    ///
    /// Only `work` itself is measured, so anything awaited before calling
    /// this (such as the translation fetch) does not count toward the minimum.
    pub fn run<T>(&mut self, work: impl FnOnce() -> T) -> T {
        let started = self.show();
        let output = work();
        self.schedule_hide(started);
        output
    }

    /// Show the overlay and immediately schedule its hide.
    ///
    /// Elapsed time is effectively zero here, so the overlay stays for the
    /// full minimum regardless of what the caller does next.
    pub fn hold(&mut self) {
        let started = self.show();
        self.schedule_hide(started);
    }

    /// Abort a pending hide, leaving the overlay as it is.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending_hide.take() {
            handle.abort();
            debug!("Cancelled pending loader hide");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending_hide
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Wait for the pending hide, if any, to run.
    pub async fn wait(&mut self) {
        if let Some(handle) = self.pending_hide.take() {
            // A cancelled task is the only error; nothing to do then
            let _ = handle.await;
        }
    }

    fn show(&mut self) -> Instant {
        self.cancel();
        self.overlay.show();
        Instant::now()
    }

    fn schedule_hide(&mut self, started: Instant) {
        let delay = self.hide_delay(started.elapsed());
        let overlay = Arc::clone(&self.overlay);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No tokio runtime to time the loader; hiding it now");
            overlay.hide();
            return;
        };

        debug!("Hiding loader in {:?}", delay);
        self.pending_hide = Some(runtime.spawn(async move {
            sleep(delay).await;
            overlay.hide();
        }));
    }
}

impl std::fmt::Debug for LoaderGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderGate")
            .field("min_duration", &self.min_duration)
            .field("pending_hide", &self.pending_hide.is_some())
            .finish()
    }
}
