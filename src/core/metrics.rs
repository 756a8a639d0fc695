//! Carbon metrics derived from an assembled route

use serde::{Deserialize, Serialize};

use crate::core::assembler::OptimalRoute;

/// kg CO2 absorbed by one tree in a year
pub const TREE_CO2_PER_YEAR_KG: f64 = 22.0;

/// kg CO2 to charge a smartphone once
pub const SMARTPHONE_CHARGE_KG: f64 = 0.005;

/// kg CO2 emitted by an average car per km
pub const CAR_KG_PER_KM: f64 = 0.12;

/// Letter rating of a route by its emitted carbon
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EfficiencyRating {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
}

impl EfficiencyRating {
    pub fn from_emission(carbon_kg: f64) -> Self {
        if carbon_kg < 5.0 {
            EfficiencyRating::APlus
        } else if carbon_kg < 10.0 {
            EfficiencyRating::A
        } else if carbon_kg < 20.0 {
            EfficiencyRating::B
        } else if carbon_kg < 40.0 {
            EfficiencyRating::C
        } else {
            EfficiencyRating::D
        }
    }
}

impl std::fmt::Display for EfficiencyRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EfficiencyRating::APlus => "A+",
            EfficiencyRating::A => "A",
            EfficiencyRating::B => "B",
            EfficiencyRating::C => "C",
            EfficiencyRating::D => "D",
        };
        f.write_str(s)
    }
}

/// Everyday equivalents of the carbon a route saves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonMetrics {
    pub trees_equivalent: f64,
    pub smartphone_charges: u64,
    pub car_km_equivalent: u64,
    pub percentage_saved: u32,
    pub efficiency_rating: EfficiencyRating,
}

/// Compute the metrics for a route
pub fn carbon_metrics(route: &OptimalRoute) -> CarbonMetrics {
    metrics_for(route.carbon_emission_kg, route.carbon_saved_kg)
}

/// Compute the metrics from emitted and saved carbon in kg
pub fn metrics_for(emitted_kg: f64, saved_kg: f64) -> CarbonMetrics {
    let denominator = emitted_kg + saved_kg;
    let percentage_saved = if denominator > 0.0 {
        (saved_kg / denominator * 100.0).round() as u32
    } else {
        0
    };

    CarbonMetrics {
        trees_equivalent: saved_kg / TREE_CO2_PER_YEAR_KG,
        smartphone_charges: (saved_kg / SMARTPHONE_CHARGE_KG).round() as u64,
        car_km_equivalent: (saved_kg / CAR_KG_PER_KM).round() as u64,
        percentage_saved,
        efficiency_rating: EfficiencyRating::from_emission(emitted_kg),
    }
}
