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

//! Client library for the CI/CD training backend.
//!
//! The backend exposes three JSON resources: `/health`, `/api/info` and
//! `/api/quote`. This crate loads them as one batch and keeps the latest
//! values for a presentation layer to render.
//!
//! - **Endpoints**: the fixed URL set derived from a base URL
//! - **Fetch layer**: [`Fetch`] trait with a `reqwest` implementation
//! - **Loader**: [`Dashboard`], the shared state plus the reload operation
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use backend_client::{Dashboard, Endpoints, HttpFetcher, JoinPolicy};
//!
//! #[tokio::main]
//! async fn main() {
//!     let dashboard = Dashboard::new(
//!         Endpoints::from_base("http://localhost:3000"),
//!         Arc::new(HttpFetcher::new()),
//!         JoinPolicy::FailFast,
//!     );
//!
//!     if let Err(e) = dashboard.load_all().await {
//!         eprintln!("reload failed: {e}");
//!     }
//!     println!("{:?}", dashboard.state().snapshot.health);
//! }
//! ```

pub mod endpoints;
pub mod fetch;
pub mod loader;
pub mod render;

pub use endpoints::{Endpoints, Resource};
pub use fetch::{Fetch, FetchError, HttpFetcher};
pub use loader::{Dashboard, DashboardState, JoinPolicy, Snapshot};
