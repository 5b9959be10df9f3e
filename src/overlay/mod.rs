// Copyright 2025 CI/CD Training Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Easter egg overlay state.
//!
//! The overlay owns a [`JitterTimer`] only while it is visible, so hiding the
//! overlay always releases the timer.

pub mod jitter;

pub use jitter::{JitterTimer, OverlayPosition, DEFAULT_PERIOD, POSITION_RANGE};

use std::time::Duration;

use log::info;
use tokio::runtime::Handle;

/// Visibility and position of the video overlay
#[derive(Debug)]
pub struct Overlay {
    period: Duration,
    timer: Option<JitterTimer>,
    last_position: OverlayPosition,
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD)
    }
}

impl Overlay {
    /// Create a hidden overlay that moves every `period` once shown. A zero
    /// period is replaced by [`DEFAULT_PERIOD`].
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period: if period.is_zero() { DEFAULT_PERIOD } else { period },
            timer: None,
            last_position: OverlayPosition::INITIAL,
        }
    }

    /// Show the overlay and start moving it. No-op if already shown.
    pub fn open(&mut self, handle: &Handle) {
        if self.is_open() {
            return;
        }

        info!("Opening easter egg overlay");
        self.timer = Some(JitterTimer::start(
            handle,
            self.period,
            POSITION_RANGE,
            self.last_position,
        ));
    }

    /// Hide the overlay and stop the timer. No-op if already hidden.
    pub fn close(&mut self) {
        if let Some(timer) = self.timer.take() {
            info!("Closing easter egg overlay");
            self.last_position = timer.position();
            timer.stop();
        }
    }

    /// Shown and still moving. A timer whose task has died counts as hidden
    /// so the next `open` replaces it.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.timer.as_ref().is_some_and(JitterTimer::is_running)
    }

    /// Current position; the last one seen while open when hidden
    #[must_use]
    pub fn position(&self) -> OverlayPosition {
        self.timer
            .as_ref()
            .map_or(self.last_position, JitterTimer::position)
    }

    /// Observe position updates while the overlay is open
    #[cfg(test)]
    pub fn subscribe(&self) -> Option<tokio::sync::watch::Receiver<OverlayPosition>> {
        self.timer.as_ref().map(JitterTimer::subscribe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    const PERIOD: Duration = Duration::from_millis(20);

    #[test]
    fn test_starts_hidden() {
        let overlay = Overlay::default();
        assert!(!overlay.is_open());
        assert!(overlay.subscribe().is_none());
        assert_eq!(overlay.position(), OverlayPosition::INITIAL);
    }

    #[test]
    fn test_close_when_hidden_is_noop() {
        let mut overlay = Overlay::new(PERIOD);
        overlay.close();
        assert!(!overlay.is_open());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_open_starts_position_updates() {
        let mut overlay = Overlay::new(PERIOD);
        overlay.open(&Handle::current());
        assert!(overlay.is_open());

        let mut rx = overlay.subscribe().unwrap();
        timeout(PERIOD * 10, rx.changed())
            .await
            .expect("overlay did not move")
            .unwrap();

        // Opening twice keeps the same timer.
        overlay.open(&Handle::current());
        let mut again = overlay.subscribe().unwrap();
        again.borrow_and_update();
        timeout(PERIOD * 10, again.changed()).await.unwrap().unwrap();
        assert!(rx.has_changed().unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_zero_period_opens_with_default() {
        let mut overlay = Overlay::new(Duration::ZERO);
        overlay.open(&Handle::current());
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(overlay.is_open());
        overlay.close();
        assert!(!overlay.is_open());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_close_stops_position_updates() {
        let mut overlay = Overlay::new(PERIOD);
        overlay.open(&Handle::current());
        let mut rx = overlay.subscribe().unwrap();
        timeout(PERIOD * 10, rx.changed()).await.unwrap().unwrap();

        overlay.close();
        assert!(!overlay.is_open());

        // At most one update can already be in flight when closing; after
        // that the channel must close instead of ticking on.
        let mut late_updates = 0;
        let closed = timeout(PERIOD * 10, async {
            while rx.changed().await.is_ok() {
                late_updates += 1;
            }
        })
        .await;
        assert!(closed.is_ok(), "timer kept running after close");
        assert!(late_updates <= 1);

        let hidden_position = overlay.position();
        tokio::time::sleep(PERIOD * 3).await;
        assert_eq!(overlay.position(), hidden_position);
    }
}
