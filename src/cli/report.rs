//! Human-readable route report for stdout

use std::fmt;

use carbon_route::{CarbonMetrics, GradeSegregation, OptimalRoute, RoutePlan, SolverStep};

/// Full text report for a solved route
pub struct RouteReport<'a> {
    pub route: &'a OptimalRoute,
    pub metrics: &'a CarbonMetrics,
    pub grade: Option<&'a GradeSegregation>,
    pub steps: Option<&'a [SolverStep]>,
}

impl fmt::Display for RouteReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let route = self.route;
        let metrics = self.metrics;

        let stops: Vec<&str> = route.path.iter().map(|n| n.name.as_str()).collect();
        writeln!(f, "🚚 Route: {}", stops.join(" → "))?;
        writeln!(
            f,
            "   {} via {} ({})",
            route.vehicle.label(),
            route.strategy,
            if route.road_routed { "road network" } else { "estimated distances" }
        )?;
        writeln!(f)?;

        for (i, segment) in route.segments.iter().enumerate() {
            writeln!(
                f,
                "  {}. {} → {}: {:.1} km, {:.1} h, {}, {:.2} kg CO2",
                i + 1,
                segment.from.name,
                segment.to.name,
                segment.distance_km,
                segment.duration_hours,
                segment.road_class.label(),
                segment.carbon_kg
            )?;
        }
        writeln!(f)?;

        writeln!(f, "📏 Distance:   {:.1} km", route.total_distance_km)?;
        writeln!(f, "⏱️  Time:       {:.1} h", route.estimated_time_hours)?;
        writeln!(f, "⛽ Fuel cost:  ₹{:.0}", route.fuel_cost_inr)?;
        writeln!(
            f,
            "🌍 Carbon:     {:.2} kg CO2 emitted, {:.2} kg saved ({}%), rating {}",
            route.carbon_emission_kg, route.carbon_saved_kg, metrics.percentage_saved, metrics.efficiency_rating
        )?;
        writeln!(
            f,
            "🌳 Equivalent: {:.2} trees/year, {} phone charges, {} car-km",
            metrics.trees_equivalent, metrics.smartphone_charges, metrics.car_km_equivalent
        )?;

        if let Some(grade) = self.grade {
            writeln!(f)?;
            writeln!(f, "📦 Grade {} (priority {}): {}", grade.grade, grade.priority, grade.description)?;
            writeln!(
                f,
                "   {} / {} / {} / {}",
                grade.handling, grade.storage, grade.packaging, grade.route
            )?;
        }

        if let Some(steps) = self.steps {
            writeln!(f)?;
            writeln!(f, "🔍 Solver steps:")?;
            for step in steps {
                writeln!(f, "  {:>2}. {}", step.step, step.message)?;
            }
        }

        Ok(())
    }
}

/// Planned stops for `--dry-run`
pub struct PlanReport<'a>(pub &'a RoutePlan);

impl fmt::Display for PlanReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes = &self.0.nodes;
        writeln!(f, "🔍 [DRY RUN] Planned stops:")?;
        for node in nodes {
            writeln!(
                f,
                "  - {} [{:?}] ({:.4}, {:.4})",
                node.name, node.role, node.coordinate.lat, node.coordinate.lng
            )?;
        }
        let pairs = nodes.len() * nodes.len().saturating_sub(1) / 2;
        writeln!(f, "Would issue {pairs} road routing queries")
    }
}
