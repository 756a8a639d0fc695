//! Geo-distance provider
//!
//! Asks an OSRM-compatible routing service for the road route between two
//! points. Any failure (connect error, timeout, bad status, unreadable body,
//! no route) degrades to the geometric estimate, so `distance` always
//! returns a usable leg.

use log::{debug, warn};
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;

use crate::core::config::RouterConfig;
use crate::core::error::{Error, Result};
use crate::core::geo::{Coordinate, TravelLeg};

/// OSRM `/route` response, reduced to the fields we read
#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// meters
    distance: f64,
    /// seconds
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

/// Where a leg's numbers came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegSource {
    Road,
    Estimate,
}

/// Road-routing client with a geometric fallback
#[derive(Debug, Clone)]
pub struct GeoDistanceProvider {
    client: Option<Client>,
    base_url: String,
    profile: String,
}

impl GeoDistanceProvider {
    /// Create a provider from configuration. If the HTTP client cannot be
    /// built the provider runs offline instead of failing.
    pub fn new(config: &RouterConfig) -> Self {
        if config.offline {
            return Self::offline();
        }

        match build_client(config) {
            Ok(client) => Self {
                client: Some(client),
                base_url: config.osrm_base_url.trim_end_matches('/').to_string(),
                profile: config.profile.clone(),
            },
            Err(e) => {
                warn!("⚠️  Could not create routing client ({e}), using geometric estimates only");
                Self::offline()
            }
        }
    }

    /// A provider that never touches the network
    pub fn offline() -> Self {
        Self {
            client: None,
            base_url: String::new(),
            profile: String::new(),
        }
    }

    /// Whether live routing will be attempted
    pub fn is_live(&self) -> bool {
        self.client.is_some()
    }

    /// Travel distance, duration and path between two points
    pub async fn distance(&self, from: Coordinate, to: Coordinate) -> TravelLeg {
        self.distance_with_source(from, to).await.0
    }

    /// Like `distance`, also reporting whether the road service answered
    pub async fn distance_with_source(&self, from: Coordinate, to: Coordinate) -> (TravelLeg, LegSource) {
        let Some(client) = &self.client else {
            return (TravelLeg::estimate(from, to), LegSource::Estimate);
        };

        match self.query_route(client, from, to).await {
            Ok(leg) => (leg, LegSource::Road),
            Err(e) => {
                warn!(
                    "⚠️  Road routing failed for ({:.4},{:.4}) -> ({:.4},{:.4}): {e}. Falling back to haversine estimate",
                    from.lat, from.lng, to.lat, to.lng
                );
                (TravelLeg::estimate(from, to), LegSource::Estimate)
            }
        }
    }

    fn route_url(&self, from: Coordinate, to: Coordinate) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url, self.profile, from.lng, from.lat, to.lng, to.lat
        )
    }

    async fn query_route(&self, client: &Client, from: Coordinate, to: Coordinate) -> Result<TravelLeg> {
        let url = self.route_url(from, to);
        debug!("Routing query: {url}");

        let response = client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::HttpError(format!("routing service returned {status}")));
        }

        let body: OsrmRouteResponse = response.json().await?;
        if let Some(code) = body.code.filter(|code| code != "Ok") {
            let detail = body.message.unwrap_or_default();
            return Err(Error::NoRoute(format!("{code} {detail}").trim_end().to_string()));
        }

        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| Error::NoRoute("empty route list".to_string()))?;

        if !route.distance.is_finite()
            || route.distance < 0.0
            || !route.duration.is_finite()
            || route.duration < 0.0
        {
            return Err(Error::HttpError("routing service returned invalid distance or duration".to_string()));
        }

        let geometry = if route.geometry.coordinates.len() >= 2 {
            route.geometry.coordinates
        } else {
            vec![from.to_position(), to.to_position()]
        };

        Ok(TravelLeg {
            distance_km: route.distance / 1000.0,
            duration_hours: route.duration / 3600.0,
            geometry,
        })
    }
}

fn build_client(config: &RouterConfig) -> Result<Client> {
    let client = ClientBuilder::new()
        .timeout(config.request_timeout())
        .connect_timeout(config.connect_timeout())
        .pool_max_idle_per_host(config.max_concurrent_requests)
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}
