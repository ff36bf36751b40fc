use crate::completion_schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Generated day-by-day itinerary with a cost estimate and travel cautions.
#[completion_schema(name = "Itinerary")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ItineraryResult {
    /// Day plans in chronological order, one per trip day
    #[schemars(length(min = 1))]
    pub itinerary: Vec<DayPlan>,
    /// Estimated total cost for a single traveler
    pub estimated_cost: u64,
    /// Things the traveler should watch out for
    pub cautions: Vec<String>,
}

/// One day of the trip split into four time-of-day blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DayPlan {
    /// 1-based day number
    pub day: u32,
    pub morning: ActivityBlock,
    pub afternoon: ActivityBlock,
    pub evening: ActivityBlock,
    pub night: ActivityBlock,
}

/// Activity planned for one part of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ActivityBlock {
    /// Short label, e.g. "Haeundae beach walk"
    pub summary: String,
    /// Longer description of what to do
    pub detail: String,
}

impl ItineraryResult {
    pub fn day_count(&self) -> usize {
        self.itinerary.len()
    }
}

impl DayPlan {
    /// Copy of this day's activities under a different day number.
    pub fn renumbered(&self, day: u32) -> Self {
        Self {
            day,
            ..self.clone()
        }
    }

    pub fn blocks(&self) -> [(&'static str, &ActivityBlock); 4] {
        [
            ("morning", &self.morning),
            ("afternoon", &self.afternoon),
            ("evening", &self.evening),
            ("night", &self.night),
        ]
    }
}

impl ActivityBlock {
    pub fn new(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}
