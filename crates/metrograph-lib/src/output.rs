use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::map::Map;
use crate::node::{LineColor, Metric};
use crate::routing::RoutePlan;

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

/// Step taken during traversal of a planned route.
///
/// `line`, `leg_distance`, and `leg_fare` describe the track ridden *into*
/// this stop; the first step carries `None` for all three.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_fare: Option<u32>,
}

/// Structured representation of a planned route that higher-level consumers
/// can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub metric: Metric,
    pub hops: usize,
    pub total: f64,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a structured summary with zones and
    /// per-leg line data resolved against the map.
    pub fn from_plan(map: &Map, plan: &RoutePlan) -> Result<Self> {
        if plan.steps.is_empty() {
            return Err(Error::EmptyRoutePlan);
        }

        let mut steps = Vec::with_capacity(plan.steps.len());
        for (index, name) in plan.steps.iter().enumerate() {
            let node = map.get_node(name)?;
            let leg = index
                .checked_sub(1)
                .and_then(|previous| map.nodes().get(&plan.steps[previous]))
                .and_then(|previous| previous.track(name));
            steps.push(RouteStep {
                index,
                name: name.clone(),
                zone: node.zone.clone(),
                line: leg.map(|edge| edge.color),
                leg_distance: leg.map(|edge| edge.distance),
                leg_fare: leg.map(|edge| edge.fare),
            });
        }

        let start = steps
            .first()
            .map(|step| RouteEndpoint {
                name: step.name.clone(),
                zone: step.zone.clone(),
            })
            .expect("validated non-empty steps");
        let goal = steps
            .last()
            .map(|step| RouteEndpoint {
                name: step.name.clone(),
                zone: step.zone.clone(),
            })
            .expect("validated non-empty steps");

        Ok(Self {
            metric: plan.metric,
            hops: plan.hop_count(),
            total: plan.total,
            start,
            goal,
            steps,
        })
    }

    /// Render the summary as plain terminal text.
    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, metric: {}, total: {:.2})",
            self.start.name, self.goal.name, self.hops, self.metric, self.total
        );

        for step in &self.steps {
            let mut line = format!("{:>3}: {}", step.index, step.name);
            if let Some(zone) = &step.zone {
                let _ = write!(line, " [zone {zone}]");
            }
            if let Some(color) = step.line {
                let _ = write!(line, " via {color}");
            }
            if let (Some(distance), Some(fare)) = (step.leg_distance, step.leg_fare) {
                let _ = write!(line, " ({distance:.2}, fare {fare})");
            }
            let _ = writeln!(buffer, "{line}");
        }

        buffer
    }
}
