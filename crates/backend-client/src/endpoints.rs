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

//! Backend resources and the endpoint set derived from a base URL.

use std::fmt;

/// One of the three JSON resources exposed by the training backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Health,
    Info,
    Quote,
}

impl Resource {
    /// All resources, in the order they are fetched and displayed.
    pub const ALL: [Resource; 3] = [Resource::Health, Resource::Info, Resource::Quote];

    /// Path suffix appended to the base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Resource::Health => "/health",
            Resource::Info => "/api/info",
            Resource::Quote => "/api/quote",
        }
    }

    /// Card title used by the dashboard.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Resource::Health => "Health",
            Resource::Info => "Info (version / env / sha)",
            Resource::Quote => "Quote (simulated data)",
        }
    }

    /// Chip label describing the endpoint.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Resource::Health => "Health endpoint",
            Resource::Info => "Info endpoint",
            Resource::Quote => "Quote endpoint",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Health => "health",
            Resource::Info => "info",
            Resource::Quote => "quote",
        };
        f.write_str(name)
    }
}

/// The fixed set of URLs a dashboard loads.
///
/// Built once from the configured base URL by plain concatenation, so an
/// empty base yields the bare paths. The fields are private: an endpoint set
/// never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
    health: String,
    info: String,
    quote: String,
}

impl Endpoints {
    /// Derive the endpoint set from a base URL such as `https://api.example.test`.
    #[must_use]
    pub fn from_base(base: &str) -> Self {
        Self {
            base: base.to_string(),
            health: format!("{base}{}", Resource::Health.path()),
            info: format!("{base}{}", Resource::Info.path()),
            quote: format!("{base}{}", Resource::Quote.path()),
        }
    }

    /// The base URL this set was derived from.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn health(&self) -> &str {
        &self.health
    }

    #[must_use]
    pub fn info(&self) -> &str {
        &self.info
    }

    #[must_use]
    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// URL of a single resource.
    #[must_use]
    pub fn url(&self, resource: Resource) -> &str {
        match resource {
            Resource::Health => &self.health,
            Resource::Info => &self.info,
            Resource::Quote => &self.quote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_from_base() {
        let endpoints = Endpoints::from_base("https://api.example.test");
        assert_eq!(endpoints.health(), "https://api.example.test/health");
        assert_eq!(endpoints.info(), "https://api.example.test/api/info");
        assert_eq!(endpoints.quote(), "https://api.example.test/api/quote");
        assert_eq!(endpoints.base(), "https://api.example.test");
    }

    #[test]
    fn test_endpoints_empty_base() {
        let endpoints = Endpoints::from_base("");
        assert_eq!(endpoints.health(), "/health");
        assert_eq!(endpoints.info(), "/api/info");
        assert_eq!(endpoints.quote(), "/api/quote");
    }

    #[test]
    fn test_endpoints_concatenate_verbatim() {
        // No slash normalisation: the base is used exactly as configured.
        let endpoints = Endpoints::from_base("http://localhost:3000/");
        assert_eq!(endpoints.health(), "http://localhost:3000//health");
    }

    #[test]
    fn test_url_matches_accessors() {
        let endpoints = Endpoints::from_base("http://backend:8080");
        for resource in Resource::ALL {
            assert!(endpoints.url(resource).ends_with(resource.path()));
        }
        assert_eq!(endpoints.url(Resource::Info), endpoints.info());
    }
}
