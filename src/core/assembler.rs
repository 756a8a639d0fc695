//! Route assembly
//!
//! Turns a solved visiting order into the final route: per-leg segments with
//! road class and emissions, totals, and the concatenated path geometry.

use serde::{Deserialize, Serialize};

use crate::core::matrix::DistanceMatrix;
use crate::core::node::Node;
use crate::core::solver::{SolverStrategy, TspSolution};

/// Emissions avoided relative to an unoptimized route, which burns this
/// multiple of the optimized route's carbon
pub const UNOPTIMIZED_CARBON_FACTOR: f64 = 1.35;

/// Fuel cost in INR per kilometer
pub const FUEL_COST_PER_KM: f64 = 8.5;

/// Vehicle class chosen from the load quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    LargeTruck,
    MediumTruck,
    SmallTruck,
    Van,
}

impl VehicleClass {
    pub fn from_quantity(quantity: f64) -> Self {
        if quantity > 50.0 {
            VehicleClass::LargeTruck
        } else if quantity > 20.0 {
            VehicleClass::MediumTruck
        } else if quantity > 5.0 {
            VehicleClass::SmallTruck
        } else {
            VehicleClass::Van
        }
    }

    /// Emission factor in kg CO2 per km
    pub fn carbon_per_km(self) -> f64 {
        match self {
            VehicleClass::LargeTruck => 0.27,
            VehicleClass::MediumTruck => 0.21,
            VehicleClass::SmallTruck => 0.15,
            VehicleClass::Van => 0.12,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VehicleClass::LargeTruck => "Large Truck",
            VehicleClass::MediumTruck => "Medium Truck",
            VehicleClass::SmallTruck => "Small Truck",
            VehicleClass::Van => "Van",
        }
    }
}

/// Road class label for a leg, by its length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoadClass {
    #[serde(rename = "National Highway")]
    NationalHighway,
    #[serde(rename = "State Highway")]
    StateHighway,
    #[serde(rename = "District Road")]
    DistrictRoad,
}

impl RoadClass {
    pub fn from_distance(distance_km: f64) -> Self {
        if distance_km > 100.0 {
            RoadClass::NationalHighway
        } else if distance_km > 50.0 {
            RoadClass::StateHighway
        } else {
            RoadClass::DistrictRoad
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoadClass::NationalHighway => "National Highway",
            RoadClass::StateHighway => "State Highway",
            RoadClass::DistrictRoad => "District Road",
        }
    }
}

/// One leg of the route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub from: Node,
    pub to: Node,
    pub distance_km: f64,
    pub duration_hours: f64,
    pub road_class: RoadClass,
    pub carbon_kg: f64,
    /// `[lng, lat]` positions from `from` to `to`
    pub geometry: Vec<[f64; 2]>,
}

/// A complete optimized delivery route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalRoute {
    /// Nodes in visiting order, source first and destination last
    pub path: Vec<Node>,
    /// Visiting order as indices into the planned node list
    pub order: Vec<usize>,
    pub segments: Vec<RouteSegment>,
    pub total_distance_km: f64,
    pub estimated_time_hours: f64,
    pub carbon_emission_kg: f64,
    pub carbon_saved_kg: f64,
    pub fuel_cost_inr: f64,
    pub vehicle: VehicleClass,
    pub strategy: SolverStrategy,
    /// Whether every leg came from live road routing
    pub road_routed: bool,
    /// Full route path as `[lng, lat]` positions
    pub geometry: Vec<[f64; 2]>,
}

/// Build the final route from a solved order over `nodes`
pub fn assemble(
    nodes: &[Node],
    solution: &TspSolution,
    matrix: &DistanceMatrix,
    quantity: f64,
) -> OptimalRoute {
    let vehicle = VehicleClass::from_quantity(quantity);
    let carbon_per_km = vehicle.carbon_per_km();

    let mut segments = Vec::with_capacity(solution.order.len().saturating_sub(1));
    let mut geometry: Vec<[f64; 2]> = Vec::new();

    for leg in solution.order.windows(2) {
        let (from, to) = (leg[0], leg[1]);
        let distance_km = matrix.distance(from, to);
        let leg_geometry = matrix
            .geometry(from, to)
            .map(<[[f64; 2]]>::to_vec)
            .unwrap_or_else(|| {
                vec![
                    nodes[from].coordinate.to_position(),
                    nodes[to].coordinate.to_position(),
                ]
            });

        // Consecutive legs share their junction point
        let skip = usize::from(!geometry.is_empty());
        geometry.extend(leg_geometry.iter().skip(skip));

        segments.push(RouteSegment {
            from: nodes[from].clone(),
            to: nodes[to].clone(),
            distance_km,
            duration_hours: matrix.duration(from, to),
            road_class: RoadClass::from_distance(distance_km),
            carbon_kg: distance_km * carbon_per_km,
            geometry: leg_geometry,
        });
    }

    let total_distance_km: f64 = segments.iter().map(|s| s.distance_km).sum();
    let estimated_time_hours: f64 = segments.iter().map(|s| s.duration_hours).sum();
    let carbon_emission_kg: f64 = segments.iter().map(|s| s.carbon_kg).sum();
    let carbon_saved_kg = carbon_emission_kg * UNOPTIMIZED_CARBON_FACTOR - carbon_emission_kg;

    OptimalRoute {
        path: solution.order.iter().map(|&i| nodes[i].clone()).collect(),
        order: solution.order.clone(),
        segments,
        total_distance_km,
        estimated_time_hours,
        carbon_emission_kg,
        carbon_saved_kg,
        fuel_cost_inr: total_distance_km * FUEL_COST_PER_KM,
        vehicle,
        strategy: solution.strategy,
        road_routed: matrix.is_fully_road_routed(),
        geometry,
    }
}
