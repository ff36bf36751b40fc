use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{itinerary::ItineraryResult, request::ItineraryRequest};

/// Whether a stored itinerary shows up in public listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// Request fields kept alongside a stored itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSummary {
    pub destination: String,
    pub duration: u32,
    pub age_group: Option<String>,
    pub group_size: Option<u32>,
    pub purpose: Option<String>,
    pub travel_type: Option<String>,
}

impl From<&ItineraryRequest> for RequestSummary {
    fn from(request: &ItineraryRequest) -> Self {
        Self {
            destination: request.destination.trim().to_string(),
            duration: request.duration,
            age_group: request.age_group.clone(),
            group_size: request.group_size,
            purpose: request.purpose.clone(),
            travel_type: request.travel_type.clone(),
        }
    }
}

/// Itinerary handed to a store; the store assigns id, counters and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItineraryRecord {
    pub summary: RequestSummary,
    pub plan: ItineraryResult,
    pub visibility: Visibility,
}

/// Itinerary as persisted for later browsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredItineraryRecord {
    pub id: u64,
    #[serde(flatten)]
    pub summary: RequestSummary,
    pub plan: ItineraryResult,
    pub visibility: Visibility,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredItineraryRecord {
    pub fn from_new(id: u64, record: NewItineraryRecord, now: DateTime<Utc>) -> Self {
        Self {
            id,
            summary: record.summary,
            plan: record.plan,
            visibility: record.visibility,
            view_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}
