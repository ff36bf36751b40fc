use crate::types::ItineraryRequest;

pub const DEFAULT_AGE_GROUP: &str = "unspecified age group";
pub const DEFAULT_PURPOSE: &str = "general sightseeing";
pub const DEFAULT_TRAVEL_TYPE: &str = "balanced trip";
pub const SOLO_GROUP: &str = "solo";
pub const COST_CURRENCY: &str = "Korean won (KRW)";

const OUTPUT_FORMAT: &str = r#"{
  "itinerary": [
    {
      "day": 1,
      "morning": {
        "summary": "short summary of the morning activity",
        "detail": "detailed description of the morning activity"
      },
      "afternoon": {
        "summary": "short summary of the afternoon activity",
        "detail": "detailed description of the afternoon activity"
      },
      "evening": {
        "summary": "short summary of the evening activity",
        "detail": "detailed description of the evening activity"
      },
      "night": {
        "summary": "short summary of the night activity",
        "detail": "detailed description of the night activity"
      }
    }
  ],
  "estimated_cost": <estimated cost as an integer, digits only>,
  "cautions": ["caution 1", "caution 2"]
}"#;

/// Fully resolved prompt input; every optional request field already has its fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    destination: String,
    duration: u32,
    age_group: String,
    group_size: String,
    purpose: String,
    travel_type: String,
}

impl PromptContext {
    pub fn from_request(request: &ItineraryRequest) -> Self {
        Self {
            destination: request.destination.trim().to_string(),
            duration: request.duration,
            age_group: label_or_default(request.age_group.as_deref(), DEFAULT_AGE_GROUP),
            group_size: group_size_label(request.group_size),
            purpose: label_or_default(request.purpose.as_deref(), DEFAULT_PURPOSE),
            travel_type: label_or_default(request.travel_type.as_deref(), DEFAULT_TRAVEL_TYPE),
        }
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn age_group(&self) -> &str {
        &self.age_group
    }

    pub fn group_size(&self) -> &str {
        &self.group_size
    }

    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    pub fn travel_type(&self) -> &str {
        &self.travel_type
    }

    pub fn render(&self) -> String {
        format!(
            "I am planning a {duration}-day trip to {destination}.\n\
             Age group: {age_group}. Traveling as: {group_size}.\n\
             Purpose of the trip: \"{purpose}\". Travel style: \"{travel_type}\".\n\
             \n\
             Respond with exactly one JSON object in the following format. \
             Return only the JSON, with no explanations, markdown, or any other text:\n\
             \n\
             {format}\n\
             \n\
             Produce exactly {duration} entries in \"itinerary\", numbered from day 1 to day {duration}. \
             Make every day realistic and specific to {destination}. \
             Estimate \"estimated_cost\" for a single traveler in {currency}.",
            duration = self.duration,
            destination = self.destination,
            age_group = self.age_group,
            group_size = self.group_size,
            purpose = self.purpose,
            travel_type = self.travel_type,
            format = OUTPUT_FORMAT,
            currency = COST_CURRENCY,
        )
    }
}

/// Render the generation prompt for a validated request.
pub fn build_prompt(request: &ItineraryRequest) -> String {
    PromptContext::from_request(request).render()
}

fn label_or_default(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => default.to_string(),
    }
}

fn group_size_label(group_size: Option<u32>) -> String {
    match group_size {
        None | Some(1) => SOLO_GROUP.to_string(),
        Some(count) => format!("{count} people"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let context = PromptContext::from_request(&ItineraryRequest::new("Busan", 3));

        assert_eq!(context.age_group(), DEFAULT_AGE_GROUP);
        assert_eq!(context.group_size(), SOLO_GROUP);
        assert_eq!(context.purpose(), DEFAULT_PURPOSE);
        assert_eq!(context.travel_type(), DEFAULT_TRAVEL_TYPE);
    }

    #[test]
    fn test_empty_strings_resolve_to_defaults() {
        let request = ItineraryRequest::new("Busan", 3)
            .with_age_group("")
            .with_purpose("  ")
            .with_travel_type("");
        let context = PromptContext::from_request(&request);

        assert_eq!(context.age_group(), DEFAULT_AGE_GROUP);
        assert_eq!(context.purpose(), DEFAULT_PURPOSE);
        assert_eq!(context.travel_type(), DEFAULT_TRAVEL_TYPE);
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let request = ItineraryRequest::new("Jeju", 4)
            .with_age_group("20s")
            .with_group_size(3)
            .with_purpose("healing and rest")
            .with_travel_type("relaxed");

        assert_eq!(build_prompt(&request), build_prompt(&request.clone()));
    }

    #[test]
    fn test_group_size_one_renders_as_solo() {
        let absent = build_prompt(&ItineraryRequest::new("Seoul", 2));
        let one = build_prompt(&ItineraryRequest::new("Seoul", 2).with_group_size(1));

        assert_eq!(absent, one);
        assert!(one.contains("Traveling as: solo."));
    }

    #[test]
    fn test_group_size_many_renders_count() {
        let prompt = build_prompt(&ItineraryRequest::new("Seoul", 2).with_group_size(4));
        assert!(prompt.contains("Traveling as: 4 people."));
    }

    #[test]
    fn test_prompt_embeds_output_contract() {
        let prompt = build_prompt(
            &ItineraryRequest::new("Gangneung", 5).with_purpose("coffee street tour"),
        );

        assert!(prompt.contains("5-day trip to Gangneung"));
        assert!(prompt.contains("\"coffee street tour\""));
        assert!(prompt.contains("Return only the JSON"));
        assert!(prompt.contains("\"estimated_cost\""));
        assert!(prompt.contains("\"cautions\""));
        for block in ["morning", "afternoon", "evening", "night"] {
            assert!(prompt.contains(&format!("\"{block}\"")), "missing {block}");
        }
        assert!(prompt.contains("numbered from day 1 to day 5"));
    }
}
