//! Step-by-step explanation of how a route was solved

use serde::Serialize;

use crate::core::matrix::DistanceMatrix;
use crate::core::node::Node;
use crate::core::solver::TspSolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Init,
    Matrix,
    Select,
    #[serde(rename = "2opt")]
    TwoOpt,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverStep {
    /// 1-based
    pub step: usize,
    pub kind: StepKind,
    pub message: String,
    /// Node indices visited so far
    pub nodes: Vec<usize>,
}

/// Numbered steps describing how `solution` was reached over `nodes`
pub fn trace(nodes: &[Node], matrix: &DistanceMatrix, solution: &TspSolution) -> Vec<SolverStep> {
    let order = &solution.order;
    let mut steps = Vec::with_capacity(order.len() + 3);

    let mut push = |kind: StepKind, message: String, visited: Vec<usize>| {
        steps.push(SolverStep {
            step: steps.len() + 1,
            kind,
            message,
            nodes: visited,
        });
    };

    push(
        StepKind::Init,
        format!("Initialize route with {} nodes (source, hubs, destination)", nodes.len()),
        order.first().map(|&s| vec![s]).unwrap_or_default(),
    );

    let matrix_source = if matrix.is_fully_road_routed() {
        "live road routing".to_string()
    } else if matrix.road_pairs() > 0 {
        format!(
            "live road routing for {} of {} pairs, geometric estimate for the rest",
            matrix.road_pairs(),
            crate::core::matrix::pair_count(matrix.len())
        )
    } else {
        "geometric estimate".to_string()
    };
    push(
        StepKind::Matrix,
        format!("Build {0}x{0} distance matrix from {matrix_source}", matrix.len()),
        Vec::new(),
    );

    for (i, leg) in order.windows(2).enumerate() {
        let (from, to) = (leg[0], leg[1]);
        push(
            StepKind::Select,
            format!(
                "Nearest neighbor: {} -> {} ({:.1} km)",
                nodes[from].name,
                nodes[to].name,
                matrix.distance(from, to)
            ),
            order[..i + 2].to_vec(),
        );
    }

    let two_opt = if solution.reversals > 0 {
        format!(
            "Apply 2-opt: {} reversal(s), {:.1} km -> {:.1} km ({:.1}% shorter)",
            solution.reversals, solution.greedy_distance, solution.total_distance, solution.improvement_pct
        )
    } else {
        "Apply 2-opt: greedy route already locally optimal".to_string()
    };
    push(StepKind::TwoOpt, two_opt, order.clone());

    push(
        StepKind::Complete,
        format!(
            "Route found through {} nodes, {:.1} km ({})",
            order.len(),
            solution.total_distance,
            solution.strategy
        ),
        order.clone(),
    );

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::matrix::build_geometric_matrix;
    use crate::core::node::LocationQuery;
    use crate::core::registry::{destination_node, source_node, DISTRIBUTION_HUBS};
    use crate::core::solver::solve;

    #[test]
    fn test_trace_shape() {
        let nodes = vec![
            source_node(&LocationQuery::new("Delhi", "Delhi")),
            DISTRIBUTION_HUBS[8].clone(),
            DISTRIBUTION_HUBS[11].clone(),
            destination_node(&LocationQuery::new("Mumbai", "Maharashtra")),
        ];
        let matrix = build_geometric_matrix(&nodes);
        let solution = solve(&matrix, 0, 3);
        let steps = trace(&nodes, &matrix, &solution);

        // init, matrix, three legs, 2opt, complete
        assert_eq!(steps.len(), 7);
        let kinds: Vec<StepKind> = steps.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StepKind::Init,
                StepKind::Matrix,
                StepKind::Select,
                StepKind::Select,
                StepKind::Select,
                StepKind::TwoOpt,
                StepKind::Complete,
            ]
        );
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.step, i + 1);
        }

        assert_eq!(steps[0].nodes, vec![0]);
        assert!(steps[1].message.contains("geometric estimate"));
        assert_eq!(steps[2].nodes, solution.order[..2].to_vec());
        assert!(steps[2].message.starts_with("Nearest neighbor: Farmer at Delhi -> "));
        assert_eq!(steps[6].nodes, solution.order);
    }

    #[test]
    fn test_step_kind_serialization() {
        assert_eq!(serde_json::to_string(&StepKind::TwoOpt).unwrap(), "\"2opt\"");
        assert_eq!(serde_json::to_string(&StepKind::Select).unwrap(), "\"select\"");
    }
}
