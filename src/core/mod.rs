//! Core library modules for carbon-route
//!
//! Leaf-first: geo primitives and registries, the routing provider, hub
//! selection, matrix building, solving, assembly and metrics.

pub mod assembler;
pub mod config;
pub mod error;
pub mod geo;
pub mod hubs;
pub mod matrix;
pub mod metrics;
pub mod node;
pub mod provider;
pub mod registry;
pub mod segregation;
pub mod solver;
pub mod trace;

// Re-export main types for internal use
pub use assembler::{assemble, OptimalRoute};
pub use matrix::{build_geometric_matrix, build_matrix, DistanceMatrix, ProgressCallback};
pub use provider::GeoDistanceProvider;
pub use solver::solve;
