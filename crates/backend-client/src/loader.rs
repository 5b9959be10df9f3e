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

//! Dashboard loader.
//!
//! A [`Dashboard`] owns the latest known value of each backend resource and
//! the error message of the last failed reload. [`Dashboard::load_all`]
//! refreshes all three resources as one batch.
//!
//! Reloads may overlap (the reload button has no guard). Every reload takes a
//! generation ticket when it starts and its outcome is only applied if no
//! newer reload has been applied yet, so a slow stale reload never overwrites
//! fresher data.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::endpoints::{Endpoints, Resource};
use crate::fetch::{Fetch, FetchError};

/// How the three requests of a reload are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinPolicy {
    /// All or nothing: any failure discards the whole batch.
    #[default]
    FailFast,
    /// Each resource is updated on its own; failures keep their prior value.
    SettleEach,
}

/// Latest known value of each resource. `None` until first loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub health: Option<Value>,
    pub info: Option<Value>,
    pub quote: Option<Value>,
}

impl Snapshot {
    #[must_use]
    pub fn get(&self, resource: Resource) -> Option<&Value> {
        match resource {
            Resource::Health => self.health.as_ref(),
            Resource::Info => self.info.as_ref(),
            Resource::Quote => self.quote.as_ref(),
        }
    }

    fn set(&mut self, resource: Resource, value: Value) {
        let slot = match resource {
            Resource::Health => &mut self.health,
            Resource::Info => &mut self.info,
            Resource::Quote => &mut self.quote,
        };
        *slot = Some(value);
    }
}

/// Everything the presentation layer needs to render the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub snapshot: Snapshot,
    /// Message of the last failed reload, empty when the last reload succeeded
    /// or one is in flight.
    pub error: String,
    /// True while the most recently issued reload has not settled.
    pub loading: bool,
    /// When the last successful result was applied.
    pub last_loaded: Option<DateTime<Utc>>,
    /// Generation of the last applied reload (0 = none).
    pub generation: u64,
}

impl DashboardState {
    #[must_use]
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

#[derive(Default)]
struct Shared {
    state: DashboardState,
    /// Latest generation handed out by `begin`.
    issued: u64,
}

/// View model for the three backend resources.
///
/// Cloning is cheap and every clone shares the same state, which lets a reload
/// run on a background task while the UI keeps reading.
#[derive(Clone)]
pub struct Dashboard {
    endpoints: Arc<Endpoints>,
    fetcher: Arc<dyn Fetch>,
    policy: JoinPolicy,
    shared: Arc<RwLock<Shared>>,
}

impl fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dashboard")
            .field("endpoints", &self.endpoints)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    #[must_use]
    pub fn new(endpoints: Endpoints, fetcher: Arc<dyn Fetch>, policy: JoinPolicy) -> Self {
        Self {
            endpoints: Arc::new(endpoints),
            fetcher,
            policy,
            shared: Arc::new(RwLock::new(Shared::default())),
        }
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Copy of the current state for rendering.
    #[must_use]
    pub fn state(&self) -> DashboardState {
        self.shared
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .clone()
    }

    /// Reload all three resources.
    ///
    /// The error is cleared as soon as the reload starts. The returned result
    /// mirrors what was (or, for a stale reload, would have been) applied.
    pub async fn load_all(&self) -> Result<(), FetchError> {
        let ticket = self.begin();
        info!(
            "Reloading dashboard from '{}' (generation {})",
            self.endpoints.base(),
            ticket
        );

        let fetcher = &self.fetcher;
        let health = fetcher.get_json(self.endpoints.health());
        let info = fetcher.get_json(self.endpoints.info());
        let quote = fetcher.get_json(self.endpoints.quote());

        match self.policy {
            JoinPolicy::FailFast => match tokio::try_join!(health, info, quote) {
                Ok((health, info, quote)) => {
                    self.apply(ticket, |state| {
                        state.snapshot = Snapshot {
                            health: Some(health),
                            info: Some(info),
                            quote: Some(quote),
                        };
                        state.error.clear();
                        state.last_loaded = Some(Utc::now());
                    });
                    info!("Dashboard generation {} loaded", ticket);
                    Ok(())
                }
                Err(e) => {
                    warn!("Dashboard generation {} failed: {}", ticket, e);
                    let message = e.to_string();
                    self.apply(ticket, |state| state.error = message);
                    Err(e)
                }
            },
            JoinPolicy::SettleEach => {
                let (health, info, quote) = tokio::join!(health, info, quote);
                let results = [
                    (Resource::Health, health),
                    (Resource::Info, info),
                    (Resource::Quote, quote),
                ];
                self.settle_each(ticket, results)
            }
        }
    }

    /// Spawn [`Dashboard::load_all`] on `handle`, calling `on_settled` once it
    /// finishes (typically to request a repaint).
    pub fn spawn_reload<F>(&self, handle: &Handle, on_settled: F) -> JoinHandle<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let dashboard = self.clone();
        handle.spawn(async move {
            if let Err(e) = dashboard.load_all().await {
                debug!("Background reload ended with error: {}", e);
            }
            on_settled();
        })
    }

    fn settle_each(
        &self,
        ticket: u64,
        results: [(Resource, Result<Value, FetchError>); 3],
    ) -> Result<(), FetchError> {
        let mut first_error = None;
        let mut messages = Vec::new();
        let mut values = Vec::new();

        for (resource, result) in results {
            match result {
                Ok(value) => values.push((resource, value)),
                Err(e) => {
                    warn!("Dashboard generation {} failed for {}: {}", ticket, resource, e);
                    messages.push(e.to_string());
                    first_error.get_or_insert(e);
                }
            }
        }

        self.apply(ticket, |state| {
            if !values.is_empty() {
                state.last_loaded = Some(Utc::now());
            }
            for (resource, value) in values {
                state.snapshot.set(resource, value);
            }
            state.error = messages.join("; ");
        });

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Hand out a new generation and reset the error for the new reload.
    fn begin(&self) -> u64 {
        let mut shared = self.shared.write().unwrap_or_else(PoisonError::into_inner);
        shared.issued += 1;
        shared.state.error.clear();
        shared.state.loading = true;
        shared.issued
    }

    /// Apply the outcome of reload `ticket` unless a newer one already landed.
    fn apply(&self, ticket: u64, update: impl FnOnce(&mut DashboardState)) {
        let mut shared = self.shared.write().unwrap_or_else(PoisonError::into_inner);

        if ticket > shared.state.generation {
            update(&mut shared.state);
            shared.state.generation = ticket;
        } else {
            debug!(
                "Discarding stale generation {} (generation {} already applied)",
                ticket, shared.state.generation
            );
        }

        if ticket == shared.issued {
            shared.state.loading = false;
        }
    }
}
