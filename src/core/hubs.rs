//! Hub selection
//!
//! Picks registry hubs that lie roughly on the way between source and
//! destination, using the cheap geometric distance only.

use crate::core::geo::{haversine_km, Coordinate};
use crate::core::node::Node;
use crate::core::registry::DISTRIBUTION_HUBS;

/// Default number of hubs inserted into a route
pub const DEFAULT_MAX_HUBS: usize = 2;

/// Detour ratios at or below this are treated as degenerate
const MIN_DETOUR_RATIO: f64 = 0.1;

/// Detour ratios at or above this are an unreasonable diversion
const MAX_DETOUR_RATIO: f64 = 1.5;

/// Hubs closer than this to an endpoint coincide with it
const HUB_COINCIDENCE_KM: f64 = 1.0;

/// Detour ratio of travelling source -> via -> destination instead of direct.
/// `None` when source and destination coincide.
pub fn detour_ratio(source: Coordinate, via: Coordinate, destination: Coordinate) -> Option<f64> {
    let direct = haversine_km(source, destination);
    if direct <= 0.0 {
        return None;
    }
    Some((haversine_km(source, via) + haversine_km(via, destination)) / direct)
}

/// Select up to `max_count` hubs from the static registry
pub fn select_hubs(source: Coordinate, destination: Coordinate, max_count: usize) -> Vec<Node> {
    select_hubs_from(&DISTRIBUTION_HUBS, source, destination, max_count)
}

/// Select up to `max_count` hubs from an explicit candidate list, ordered by
/// ascending detour ratio. Equal ratios keep registry order.
pub fn select_hubs_from(
    candidates: &[Node],
    source: Coordinate,
    destination: Coordinate,
    max_count: usize,
) -> Vec<Node> {
    let mut scored: Vec<(f64, &Node)> = candidates
        .iter()
        .filter(|hub| {
            haversine_km(source, hub.coordinate) >= HUB_COINCIDENCE_KM
                && haversine_km(hub.coordinate, destination) >= HUB_COINCIDENCE_KM
        })
        .filter_map(|hub| {
            detour_ratio(source, hub.coordinate, destination).map(|ratio| (ratio, hub))
        })
        .filter(|(ratio, _)| *ratio > MIN_DETOUR_RATIO && *ratio < MAX_DETOUR_RATIO)
        .collect();

    scored.sort_by(|a, b| a.0.total_cmp(&b.0));

    scored
        .into_iter()
        .take(max_count)
        .map(|(_, hub)| hub.clone())
        .collect()
}
