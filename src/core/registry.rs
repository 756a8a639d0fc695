//! Static lookup data: district coordinates and distribution hubs
//!
//! Both tables are built once on first use and never mutated. Location
//! resolution never fails: unknown names fall back to the national centroid
//! and a fuzzy "did you mean" hint is logged.

use std::collections::HashMap;

use log::warn;
use once_cell::sync::Lazy;
use strsim::{jaro_winkler, normalized_levenshtein};

use crate::core::geo::Coordinate;
use crate::core::node::{LocationQuery, Node, NodeRole};

/// Geographic centroid of India, used when a location cannot be resolved
pub const DEFAULT_COORDINATE: Coordinate = Coordinate::new(20.5937, 78.9629);

/// Minimum combined similarity for a district suggestion
const SUGGESTION_THRESHOLD: f64 = 0.82;

/// District (and a few state capital) coordinates keyed by normalized name
pub static DISTRICT_COORDINATES: Lazy<HashMap<&'static str, Coordinate>> = Lazy::new(|| {
    [
        // Maharashtra
        ("mumbai", 19.0760, 72.8777),
        ("pune", 18.5204, 73.8567),
        ("nagpur", 21.1458, 79.0882),
        ("nashik", 19.9975, 73.7898),
        ("aurangabad", 19.8762, 75.3433),
        ("solapur", 17.6599, 75.9064),
        ("kolhapur", 16.7050, 74.2433),
        ("sangli", 16.8524, 74.5815),
        ("satara", 17.6805, 74.0183),
        ("ratnagiri", 16.9902, 73.3120),
        ("ahmednagar", 19.0948, 74.7480),
        // Gujarat
        ("ahmedabad", 23.0225, 72.5714),
        ("surat", 21.1702, 72.8311),
        ("vadodara", 22.3072, 73.1812),
        ("rajkot", 22.3039, 70.8022),
        // Karnataka
        ("bangalore", 12.9716, 77.5946),
        ("mysore", 12.2958, 76.6394),
        ("mangalore", 12.9141, 74.8560),
        ("belgaum", 15.8497, 74.4977),
        ("hubli", 15.3647, 75.1240),
        // Tamil Nadu
        ("chennai", 13.0827, 80.2707),
        ("coimbatore", 11.0168, 76.9558),
        ("madurai", 9.9252, 78.1198),
        ("salem", 11.6643, 78.1460),
        // Delhi NCR
        ("delhi", 28.7041, 77.1025),
        ("gurgaon", 28.4595, 77.0266),
        ("noida", 28.5355, 77.3910),
        ("faridabad", 28.4089, 77.3178),
        // Uttar Pradesh
        ("lucknow", 26.8467, 80.9462),
        ("kanpur", 26.4499, 80.3319),
        ("agra", 27.1767, 78.0081),
        ("varanasi", 25.3176, 82.9739),
        ("allahabad", 25.4358, 81.8463),
        // Rajasthan
        ("jaipur", 26.9124, 75.7873),
        ("jodhpur", 26.2389, 73.0243),
        ("udaipur", 24.5854, 73.7125),
        ("kota", 25.2138, 75.8648),
        // West Bengal
        ("kolkata", 22.5726, 88.3639),
        ("howrah", 22.5958, 88.2636),
        ("durgapur", 23.5204, 87.3119),
        // Telangana
        ("hyderabad", 17.3850, 78.4867),
        ("warangal", 17.9784, 79.5941),
        ("nizamabad", 18.6725, 78.0941),
        // Madhya Pradesh
        ("indore", 22.7196, 75.8577),
        ("bhopal", 23.2599, 77.4126),
        ("jabalpur", 23.1815, 79.9864),
        ("gwalior", 26.2183, 78.1828),
        // Punjab & Haryana
        ("chandigarh", 30.7333, 76.7794),
        ("ludhiana", 30.9010, 75.8573),
        ("amritsar", 31.6340, 74.8723),
        ("jalandhar", 31.3260, 75.5762),
        // Others
        ("shimla", 31.1048, 77.1734),
        ("dehradun", 30.3165, 78.0322),
        ("patna", 25.5941, 85.1376),
        ("ranchi", 23.3441, 85.3096),
        ("bhubaneswar", 20.2961, 85.8245),
        ("guwahati", 26.1445, 91.7362),
        ("thiruvananthapuram", 8.5241, 76.9366),
        ("kochi", 9.9312, 76.2673),
    ]
    .into_iter()
    .map(|(name, lat, lng)| (name, Coordinate::new(lat, lng)))
    .collect()
});

/// Fixed registry of distribution hubs
pub static DISTRIBUTION_HUBS: Lazy<Vec<Node>> = Lazy::new(|| {
    [
        ("hub_mumbai", "Mumbai Central Hub", 19.0760, 72.8777, "Mumbai", "Maharashtra"),
        ("hub_pune", "Pune Distribution Center", 18.5204, 73.8567, "Pune", "Maharashtra"),
        ("hub_delhi", "Delhi NCR Hub", 28.7041, 77.1025, "Delhi", "Delhi"),
        ("hub_bangalore", "Bangalore Agri Hub", 12.9716, 77.5946, "Bangalore", "Karnataka"),
        ("hub_chennai", "Chennai Port Hub", 13.0827, 80.2707, "Chennai", "Tamil Nadu"),
        ("hub_kolkata", "Kolkata East Hub", 22.5726, 88.3639, "Kolkata", "West Bengal"),
        ("hub_hyderabad", "Hyderabad Central", 17.3850, 78.4867, "Hyderabad", "Telangana"),
        ("hub_ahmedabad", "Ahmedabad APMC", 23.0225, 72.5714, "Ahmedabad", "Gujarat"),
        ("hub_jaipur", "Jaipur Mandi Hub", 26.9124, 75.7873, "Jaipur", "Rajasthan"),
        ("hub_lucknow", "Lucknow Agri Center", 26.8467, 80.9462, "Lucknow", "Uttar Pradesh"),
        ("hub_nagpur", "Nagpur Orange Hub", 21.1458, 79.0882, "Nagpur", "Maharashtra"),
        ("hub_indore", "Indore Grain Hub", 22.7196, 75.8577, "Indore", "Madhya Pradesh"),
    ]
    .into_iter()
    .map(|(id, name, lat, lng, district, state)| Node {
        id: id.to_string(),
        name: name.to_string(),
        role: NodeRole::Hub,
        coordinate: Coordinate::new(lat, lng),
        district: district.to_string(),
        state: state.to_string(),
    })
    .collect()
});

/// How a location query was turned into a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedBy {
    District,
    State,
    Default,
}

/// Lowercase and strip all whitespace: "Navi Mumbai" -> "navimumbai"
pub fn normalize_key(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolve a district/state pair: district first, then state, then the
/// national centroid.
pub fn resolve_coordinate(district: &str, state: &str) -> (Coordinate, ResolvedBy) {
    if let Some(coord) = DISTRICT_COORDINATES.get(normalize_key(district).as_str()) {
        return (*coord, ResolvedBy::District);
    }
    if let Some(coord) = DISTRICT_COORDINATES.get(normalize_key(state).as_str()) {
        return (*coord, ResolvedBy::State);
    }

    match suggest_district(district) {
        Some(suggestion) => warn!(
            "District '{district}' ({state}) not found, did you mean '{suggestion}'? Using national centroid"
        ),
        None => warn!("District '{district}' ({state}) not found, using national centroid"),
    }
    (DEFAULT_COORDINATE, ResolvedBy::Default)
}

/// Suggest the closest known district for a misspelled name
pub fn suggest_district(name: &str) -> Option<String> {
    let key = normalize_key(name);
    if key.len() < 3 || DISTRICT_COORDINATES.contains_key(key.as_str()) {
        return None;
    }

    let mut best: Option<(&str, f64)> = None;
    for &candidate in DISTRICT_COORDINATES.keys() {
        // Jaro-Winkler rewards shared prefixes, Levenshtein catches dropped letters
        let score = jaro_winkler(&key, candidate) * 0.7 + normalized_levenshtein(&key, candidate) * 0.3;
        let better = match best {
            None => true,
            // Tie-break on name so the answer does not depend on hash order
            Some((name, s)) => score > s || (score == s && candidate < name),
        };
        if score >= SUGGESTION_THRESHOLD && better {
            best = Some((candidate, score));
        }
    }

    best.map(|(name, _)| name.to_string())
}

fn create_node(id: &str, default_prefix: &str, role: NodeRole, query: &LocationQuery) -> Node {
    let (coordinate, _) = resolve_coordinate(&query.district, &query.state);
    let name = query
        .name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("{default_prefix} at {}", query.district));

    Node {
        id: id.to_string(),
        name,
        role,
        coordinate,
        district: query.district.clone(),
        state: query.state.clone(),
    }
}

/// Build the per-request source node
pub fn source_node(query: &LocationQuery) -> Node {
    create_node("farmer_source", "Farmer", NodeRole::Source, query)
}

/// Build the per-request destination node
pub fn destination_node(query: &LocationQuery) -> Node {
    create_node("vendor_dest", "Vendor", NodeRole::Destination, query)
}
