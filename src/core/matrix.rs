//! Distance matrix construction
//!
//! One routing query per unordered node pair. Queries run concurrently with
//! a bounded fan-out and the builder waits for every pair before returning.
//! A failed query only degrades its own entry (the provider falls back), so
//! a matrix build never aborts.

use std::collections::HashMap;
use std::sync::Arc;

use futures::StreamExt;
use log::debug;

use crate::core::geo::TravelLeg;
use crate::core::node::Node;
use crate::core::provider::{GeoDistanceProvider, LegSource};

/// Progress callback receiving (completed pairs, total pairs)
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Square, symmetric travel matrix with per-pair path geometry.
///
/// Distances are in kilometers and durations in hours, stored flat so that
/// entry (i, j) lives at `i * n + j`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    distances: Vec<f64>,
    durations: Vec<f64>,
    geometries: HashMap<(usize, usize), Vec<[f64; 2]>>,
    road_pairs: usize,
}

impl DistanceMatrix {
    /// A zero matrix with no geometry
    pub fn new(n: usize) -> Self {
        Self {
            n,
            distances: vec![0.0; n * n],
            durations: vec![0.0; n * n],
            geometries: HashMap::new(),
            road_pairs: 0,
        }
    }

    /// Build from a square distance table (durations at zero); mainly for
    /// driving the solver directly.
    ///
    /// Panics if the table is not square.
    pub fn from_distances(rows: &[Vec<f64>]) -> Self {
        let n = rows.len();
        let mut matrix = Self::new(n);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), n, "distance table must be square");
            for (j, &d) in row.iter().enumerate() {
                matrix.distances[i * n + j] = d;
            }
        }
        matrix
    }

    /// Record the leg between i and j in both directions
    pub fn insert_pair(&mut self, i: usize, j: usize, leg: TravelLeg) {
        let n = self.n;
        self.distances[i * n + j] = leg.distance_km;
        self.distances[j * n + i] = leg.distance_km;
        self.durations[i * n + j] = leg.duration_hours;
        self.durations[j * n + i] = leg.duration_hours;

        self.geometries.insert((j, i), leg.reversed().geometry);
        self.geometries.insert((i, j), leg.geometry);
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances[i * self.n + j]
    }

    #[inline]
    pub fn duration(&self, i: usize, j: usize) -> f64 {
        self.durations[i * self.n + j]
    }

    /// Path geometry travelling from i to j, if that pair was built
    pub fn geometry(&self, i: usize, j: usize) -> Option<&[[f64; 2]]> {
        self.geometries.get(&(i, j)).map(Vec::as_slice)
    }

    /// Number of unordered pairs answered by the road service
    pub fn road_pairs(&self) -> usize {
        self.road_pairs
    }

    /// Whether every pair came from live road routing
    pub fn is_fully_road_routed(&self) -> bool {
        self.road_pairs == pair_count(self.n)
    }
}

/// Number of unordered pairs of distinct indices among `n` nodes
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

fn pairs(n: usize) -> Vec<(usize, usize)> {
    (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect()
}

/// Build the matrix through the provider, issuing pairwise queries concurrently
pub async fn build_matrix(
    provider: &GeoDistanceProvider,
    nodes: &[Node],
    max_concurrent: usize,
    progress: Option<ProgressCallback>,
) -> DistanceMatrix {
    let n = nodes.len();
    let total = pair_count(n) as u64;
    let mut matrix = DistanceMatrix::new(n);

    debug!("Building {n}x{n} distance matrix ({total} pairs, up to {max_concurrent} in flight)");

    let results = futures::stream::iter(pairs(n))
        .map(|(i, j)| {
            let from = nodes[i].coordinate;
            let to = nodes[j].coordinate;
            async move {
                let (leg, source) = provider.distance_with_source(from, to).await;
                (i, j, leg, source)
            }
        })
        .buffer_unordered(max_concurrent.max(1));

    tokio::pin!(results);

    let mut completed = 0u64;
    while let Some((i, j, leg, source)) = results.next().await {
        if source == LegSource::Road {
            matrix.road_pairs += 1;
        }
        debug!(
            "Pair {} -> {}: {:.1} km, {:.2} h ({:?})",
            nodes[i].id, nodes[j].id, leg.distance_km, leg.duration_hours, source
        );
        matrix.insert_pair(i, j, leg);

        completed += 1;
        if let Some(ref progress) = progress {
            progress(completed, total);
        }
    }

    matrix
}

/// Build the matrix from geometric estimates only, without suspending
pub fn build_geometric_matrix(nodes: &[Node]) -> DistanceMatrix {
    let n = nodes.len();
    let mut matrix = DistanceMatrix::new(n);
    for (i, j) in pairs(n) {
        matrix.insert_pair(i, j, TravelLeg::estimate(nodes[i].coordinate, nodes[j].coordinate));
    }
    matrix
}
