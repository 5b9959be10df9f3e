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

//! Recurring repositioning timer for the easter egg overlay.
//!
//! A [`JitterTimer`] is a scoped resource: it starts publishing random
//! positions when created and stops when [`JitterTimer::stop`] is called or
//! the timer is dropped.

use std::ops::RangeInclusive;
use std::time::Duration;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Default repositioning period
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(500);

/// Range of each coordinate, in percent of the viewport
pub const POSITION_RANGE: RangeInclusive<f32> = 10.0..=70.0;

/// Top-left corner of the overlay content, in percent of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPosition {
    pub x_pct: f32,
    pub y_pct: f32,
}

impl OverlayPosition {
    /// Where the content appears before the first move
    pub const INITIAL: Self = Self {
        x_pct: 30.0,
        y_pct: 30.0,
    };

    /// Two independent uniform draws from `range`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, range: &RangeInclusive<f32>) -> Self {
        Self {
            x_pct: rng.random_range(range.clone()),
            y_pct: rng.random_range(range.clone()),
        }
    }
}

impl Default for OverlayPosition {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Handle to a running repositioning task.
#[derive(Debug)]
pub struct JitterTimer {
    position_rx: watch::Receiver<OverlayPosition>,
    cancel_token: CancellationToken,
    task: JoinHandle<()>,
}

impl JitterTimer {
    /// Spawn the timer on `handle`. The first move happens one `period`
    /// after start.
    #[must_use]
    pub fn start(
        handle: &Handle,
        period: Duration,
        range: RangeInclusive<f32>,
        initial: OverlayPosition,
    ) -> Self {
        let (position_tx, position_rx) = watch::channel(initial);
        let cancel_token = CancellationToken::new();

        let task_cancel = cancel_token.clone();
        let task = handle.spawn(async move {
            jitter_loop(position_tx, period, range, task_cancel).await;
        });

        Self {
            position_rx,
            cancel_token,
            task,
        }
    }

    /// Latest published position.
    #[must_use]
    pub fn position(&self) -> OverlayPosition {
        *self.position_rx.borrow()
    }

    /// New receiver observing position updates.
    #[cfg(test)]
    pub fn subscribe(&self) -> watch::Receiver<OverlayPosition> {
        self.position_rx.clone()
    }

    /// Whether the background task is still alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop publishing positions.
    pub fn stop(&self) {
        self.cancel_token.cancel();
    }
}

impl Drop for JitterTimer {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

async fn jitter_loop(
    position_tx: watch::Sender<OverlayPosition>,
    period: Duration,
    range: RangeInclusive<f32>,
    cancel_token: CancellationToken,
) {
    let mut rng = StdRng::from_os_rng();
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // The first tick completes immediately.
    interval.tick().await;

    loop {
        tokio::select! {
            biased;

            () = cancel_token.cancelled() => {
                debug!("Overlay jitter timer stopped");
                return;
            }

            _ = interval.tick() => {
                let position = OverlayPosition::random(&mut rng, &range);
                if position_tx.send(position).is_err() {
                    return; // All receivers dropped
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, timeout};

    const PERIOD: Duration = Duration::from_millis(20);

    #[test]
    fn test_random_position_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let position = OverlayPosition::random(&mut rng, &POSITION_RANGE);
            assert!(POSITION_RANGE.contains(&position.x_pct));
            assert!(POSITION_RANGE.contains(&position.y_pct));
        }
    }

    #[test]
    fn test_initial_position_in_range() {
        assert!(POSITION_RANGE.contains(&OverlayPosition::INITIAL.x_pct));
        assert!(POSITION_RANGE.contains(&OverlayPosition::INITIAL.y_pct));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_timer_publishes_positions() {
        let timer = JitterTimer::start(
            &Handle::current(),
            PERIOD,
            POSITION_RANGE,
            OverlayPosition::INITIAL,
        );
        let mut rx = timer.subscribe();

        for _ in 0..3 {
            timeout(PERIOD * 10, rx.changed())
                .await
                .expect("no position update")
                .unwrap();
            let position = *rx.borrow_and_update();
            assert!(POSITION_RANGE.contains(&position.x_pct));
            assert!(POSITION_RANGE.contains(&position.y_pct));
        }
        assert!(timer.is_running());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_no_update_after_stop() {
        let timer = JitterTimer::start(
            &Handle::current(),
            PERIOD,
            POSITION_RANGE,
            OverlayPosition::INITIAL,
        );
        let mut rx = timer.subscribe();
        timeout(PERIOD * 10, rx.changed()).await.unwrap().unwrap();

        timer.stop();
        timeout(PERIOD * 10, async {
            while timer.is_running() {
                sleep(Duration::from_millis(1)).await;
            }
        })
        .await
        .expect("timer task did not stop");

        let last = *rx.borrow_and_update();
        sleep(PERIOD * 3).await;
        assert!(!rx.has_changed().unwrap_or(false));
        assert_eq!(*rx.borrow(), last);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_drop_stops_timer() {
        let timer = JitterTimer::start(
            &Handle::current(),
            PERIOD,
            POSITION_RANGE,
            OverlayPosition::INITIAL,
        );
        let mut rx = timer.subscribe();
        drop(timer);

        // The sender goes away once the task has exited.
        let closed = timeout(PERIOD * 10, async {
            while rx.changed().await.is_ok() {}
        })
        .await;
        assert!(closed.is_ok(), "timer survived drop");
    }
}
