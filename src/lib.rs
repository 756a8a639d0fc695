//! # carbon-route Library
//!
//! A carbon-aware delivery route optimizer for small farm-to-market routes.
//!
//! Given a produce source and a buyer location, the optimizer picks
//! distribution hubs that lie roughly on the way, builds a pairwise travel
//! matrix (live road routing through an OSRM-compatible service, with a
//! geometric fallback per pair), orders the stops with nearest-neighbor and
//! 2-opt, and reports distance, time, emissions, fuel cost and the carbon
//! saved against an unoptimized route.
//!
//! ## Features
//!
//! - **Live road distances**: OSRM `/route` queries, issued concurrently
//! - **Never fails on the network**: any routing error degrades to a
//!   haversine estimate for that pair only
//! - **Offline mode**: fully synchronous, geometric-only planning
//! - **Progress tracking**: optional callbacks over pairwise routing queries
//! - **C bindings**: behind the `c-bindings` feature
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use carbon_route::LocationQuery;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let from = LocationQuery::new("Nashik", "Maharashtra");
//!     let to = LocationQuery::new("Mumbai", "Maharashtra");
//!
//!     let route = carbon_route::optimize_route(&from, &to, 12.0).await?;
//!     println!("{:.1} km, {:.2} kg CO2", route.total_distance_km, route.carbon_emission_kg);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Offline Planning
//!
//! ```rust
//! use carbon_route::LocationQuery;
//!
//! let from = LocationQuery::new("Delhi", "Delhi");
//! let to = LocationQuery::new("Mumbai", "Maharashtra");
//!
//! let route = carbon_route::optimize_route_offline(&from, &to, 60.0).unwrap();
//! assert_eq!(route.path.first().unwrap().id, "farmer_source");
//! assert_eq!(route.path.last().unwrap().id, "vendor_dest");
//! ```

use std::sync::Arc;

use log::{debug, info};
use serde::Serialize;

// Re-export core types that users might need
pub use crate::core::assembler::{OptimalRoute, RoadClass, RouteSegment, VehicleClass};
pub use crate::core::config::RouterConfig;
pub use crate::core::error::{Error, Result};
pub use crate::core::geo::{haversine_km, Coordinate, TravelLeg};
pub use crate::core::hubs::select_hubs;
pub use crate::core::matrix::{DistanceMatrix, ProgressCallback};
pub use crate::core::metrics::{carbon_metrics, CarbonMetrics, EfficiencyRating};
pub use crate::core::node::{LocationQuery, Node, NodeRole};
pub use crate::core::provider::GeoDistanceProvider;
pub use crate::core::registry::{resolve_coordinate, suggest_district, DISTRIBUTION_HUBS};
pub use crate::core::segregation::{segregation, Grade, GradeSegregation};
pub use crate::core::solver::{SolverStrategy, TspSolution};
pub use crate::core::trace::{SolverStep, StepKind};

// Internal modules
pub mod core;

// C-compatible FFI bindings (optional)
#[cfg(feature = "c-bindings")]
pub mod ffi;

/// Library version
pub const VERSION: &str = env!("CARBON_ROUTE_VERSION");

/// Resolved nodes for one request, before any routing: the source first,
/// selected hubs in detour order, the destination last.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    pub nodes: Vec<Node>,
}

impl RoutePlan {
    pub fn source(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn destination(&self) -> &Node {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Hubs between source and destination
    pub fn hubs(&self) -> &[Node] {
        &self.nodes[1..self.nodes.len() - 1]
    }
}

/// Everything produced by one optimization
#[derive(Debug, Clone, Serialize)]
pub struct RouteOutcome {
    pub route: OptimalRoute,
    pub metrics: CarbonMetrics,
    pub steps: Vec<SolverStep>,
}

/// Route optimizer holding its configuration and routing client
#[derive(Debug, Clone)]
pub struct RouteOptimizer {
    config: RouterConfig,
    provider: GeoDistanceProvider,
}

impl Default for RouteOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteOptimizer {
    /// Optimizer with the default configuration
    pub fn new() -> Self {
        let config = RouterConfig::default();
        let provider = GeoDistanceProvider::new(&config);
        Self { config, provider }
    }

    /// Optimizer with a custom configuration
    ///
    /// # Examples
    /// ```rust
    /// use carbon_route::{RouteOptimizer, RouterConfig};
    ///
    /// let optimizer = RouteOptimizer::with_config(RouterConfig {
    ///     osrm_base_url: "http://localhost:5000".to_string(),
    ///     max_hubs: 3,
    ///     ..Default::default()
    /// })
    /// .unwrap();
    /// assert_eq!(optimizer.config().max_hubs, 3);
    /// ```
    pub fn with_config(config: RouterConfig) -> Result<Self> {
        config.validate()?;
        let provider = GeoDistanceProvider::new(&config);
        Ok(Self { config, provider })
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Resolve both locations and select hubs, without any routing
    pub fn plan(&self, source: &LocationQuery, destination: &LocationQuery) -> Result<RoutePlan> {
        let source = core::registry::source_node(source);
        let destination = core::registry::destination_node(destination);

        if source.coordinate == destination.coordinate {
            return Err(Error::InvalidInput(format!(
                "Source '{}' and destination '{}' resolve to the same location",
                source.district, destination.district
            )));
        }

        let hubs = select_hubs(source.coordinate, destination.coordinate, self.config.max_hubs);
        debug!(
            "Selected {} hub(s): [{}]",
            hubs.len(),
            hubs.iter().map(|h| h.id.as_str()).collect::<Vec<_>>().join(", ")
        );

        let mut nodes = Vec::with_capacity(hubs.len() + 2);
        nodes.push(source);
        nodes.extend(hubs);
        nodes.push(destination);
        Ok(RoutePlan { nodes })
    }

    /// Optimize a route using live road routing where available
    pub async fn optimize(
        &self,
        source: &LocationQuery,
        destination: &LocationQuery,
        quantity: f64,
    ) -> Result<OptimalRoute> {
        Ok(self.optimize_detailed(source, destination, quantity, None).await?.route)
    }

    /// Optimize with a callback receiving (completed, total) routing queries
    ///
    /// # Examples
    /// ```rust,no_run
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use carbon_route::{LocationQuery, RouteOptimizer};
    ///
    /// let optimizer = RouteOptimizer::new();
    /// let route = optimizer
    ///     .optimize_with_progress(
    ///         &LocationQuery::new("Delhi", "Delhi"),
    ///         &LocationQuery::new("Mumbai", "Maharashtra"),
    ///         25.0,
    ///         |done, total| println!("Routing {done}/{total}"),
    ///     )
    ///     .await?;
    /// println!("{} stops", route.path.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn optimize_with_progress<F>(
        &self,
        source: &LocationQuery,
        destination: &LocationQuery,
        quantity: f64,
        progress: F,
    ) -> Result<OptimalRoute>
    where
        F: Fn(u64, u64) + Send + Sync + 'static,
    {
        let progress: ProgressCallback = Arc::new(progress);
        Ok(self
            .optimize_detailed(source, destination, quantity, Some(progress))
            .await?
            .route)
    }

    /// Optimize and also return the metrics and solver trace
    pub async fn optimize_detailed(
        &self,
        source: &LocationQuery,
        destination: &LocationQuery,
        quantity: f64,
        progress: Option<ProgressCallback>,
    ) -> Result<RouteOutcome> {
        validate_quantity(quantity)?;
        let plan = self.plan(source, destination)?;

        let matrix = core::build_matrix(
            &self.provider,
            &plan.nodes,
            self.config.max_concurrent_requests,
            progress,
        )
        .await;

        Ok(finish(&plan, &matrix, quantity))
    }

    /// Optimize using geometric estimates only; never touches the network
    pub fn optimize_offline(
        &self,
        source: &LocationQuery,
        destination: &LocationQuery,
        quantity: f64,
    ) -> Result<OptimalRoute> {
        Ok(self.optimize_offline_detailed(source, destination, quantity)?.route)
    }

    pub fn optimize_offline_detailed(
        &self,
        source: &LocationQuery,
        destination: &LocationQuery,
        quantity: f64,
    ) -> Result<RouteOutcome> {
        validate_quantity(quantity)?;
        let plan = self.plan(source, destination)?;
        let matrix = core::build_geometric_matrix(&plan.nodes);
        Ok(finish(&plan, &matrix, quantity))
    }
}

fn validate_quantity(quantity: f64) -> Result<()> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "Quantity must be a positive number, got {quantity}"
        )));
    }
    Ok(())
}

fn finish(plan: &RoutePlan, matrix: &DistanceMatrix, quantity: f64) -> RouteOutcome {
    let solution = core::solve(matrix, 0, plan.nodes.len() - 1);
    let route = core::assemble(&plan.nodes, &solution, matrix, quantity);
    let metrics = carbon_metrics(&route);
    let steps = core::trace::trace(&plan.nodes, matrix, &solution);

    info!(
        "Route {} -> {}: {} stops, {:.1} km, {:.1} h, {:.2} kg CO2 ({}, {})",
        plan.source().district,
        plan.destination().district,
        route.path.len(),
        route.total_distance_km,
        route.estimated_time_hours,
        route.carbon_emission_kg,
        route.vehicle.label(),
        route.strategy,
    );

    RouteOutcome { route, metrics, steps }
}

/// Optimize a route with the default configuration
///
/// # Arguments
/// * `source` - Where the produce is picked up
/// * `destination` - Where it is delivered
/// * `quantity` - Load size, used to choose the vehicle class
pub async fn optimize_route(
    source: &LocationQuery,
    destination: &LocationQuery,
    quantity: f64,
) -> Result<OptimalRoute> {
    RouteOptimizer::new().optimize(source, destination, quantity).await
}

/// Optimize a route from geometric estimates only, synchronously
pub fn optimize_route_offline(
    source: &LocationQuery,
    destination: &LocationQuery,
    quantity: f64,
) -> Result<OptimalRoute> {
    let config = RouterConfig {
        offline: true,
        ..Default::default()
    };
    let optimizer = RouteOptimizer {
        provider: GeoDistanceProvider::offline(),
        config,
    };
    optimizer.optimize_offline(source, destination, quantity)
}
