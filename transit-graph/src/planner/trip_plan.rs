use serde::Serialize;
use std::fmt::Display;

/// which planner query produced a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    /// one trip from source to target
    Direct,
    /// two trips with a change at the same stop
    Transfer,
    /// two trips with a short walk between nearby stops
    WalkingTransfer,
}

impl Display for PlanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PlanKind::Direct => "direct",
            PlanKind::Transfer => "transfer",
            PlanKind::WalkingTransfer => "walking transfer",
        };
        write!(f, "{s}")
    }
}

/// a stop location to show on a map
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub lon: f64,
    pub lat: f64,
}

/// a trip plan: described steps in travel order, plus the location of each
/// stop visited.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripPlan {
    pub kind: PlanKind,
    pub steps: Vec<String>,
    pub markers: Vec<Marker>,
}

impl Display for TripPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} plan:", self.kind)?;
        for step in self.steps.iter() {
            writeln!(f, "  {step}")?;
        }
        Ok(())
    }
}
