//! Delivery network nodes and the location queries that produce them

use serde::{Deserialize, Serialize};

use crate::core::geo::Coordinate;

/// Role a node plays in a delivery route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Source,
    Hub,
    Destination,
    Warehouse,
}

/// A point in the delivery network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub role: NodeRole,
    pub coordinate: Coordinate,
    pub district: String,
    pub state: String,
}

/// A named place as supplied by a caller: district and state, optionally a
/// display name for the party located there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationQuery {
    pub district: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl LocationQuery {
    pub fn new(district: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            district: district.into(),
            state: state.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Parse `district[,state]` as accepted on the command line
    pub fn parse(input: &str) -> Self {
        let mut parts = input.splitn(2, ',');
        let district = parts.next().unwrap_or("").trim();
        let state = parts.next().unwrap_or("").trim();
        Self::new(district, state)
    }
}
