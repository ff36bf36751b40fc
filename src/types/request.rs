use serde::{Deserialize, Serialize};

/// Inbound travel request.
///
/// Optional fields stay `None` when the caller omitted them; an empty string is a
/// distinct, present value that the prompt builder later treats like an omission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryRequest {
    /// Destination city or region, e.g. "Busan"
    pub destination: String,
    /// Trip length in days, 1 to 30 inclusive
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
    /// Number of travelers, 1 to 50 inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_type: Option<String>,
}

impl ItineraryRequest {
    pub fn new(destination: impl Into<String>, duration: u32) -> Self {
        Self {
            destination: destination.into(),
            duration,
            age_group: None,
            group_size: None,
            purpose: None,
            travel_type: None,
        }
    }

    pub fn with_age_group(mut self, age_group: impl Into<String>) -> Self {
        self.age_group = Some(age_group.into());
        self
    }

    pub fn with_group_size(mut self, group_size: u32) -> Self {
        self.group_size = Some(group_size);
        self
    }

    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    pub fn with_travel_type(mut self, travel_type: impl Into<String>) -> Self {
        self.travel_type = Some(travel_type.into());
        self
    }
}
