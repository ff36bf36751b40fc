use serde_json::Value;
use tracing::debug;

use crate::{
    error::{Result, TripError},
    schemas::{validate_structured_payload, CompletionSchema},
    types::{deserialize_structured_response, ItineraryResult},
};

/// Decode extracted JSON into an itinerary.
///
/// Structure only: syntax errors, schema violations, wrong types and an empty
/// itinerary all become `MalformedResponse` carrying `raw_text`, the untouched model
/// output. Day counts and cost sanity are left to later stages.
pub fn decode_itinerary(json_text: &str, raw_text: &str) -> Result<ItineraryResult> {
    let malformed = |reason: String| {
        debug!(
            target: "tripwand::decoder",
            reason = %reason,
            raw_response = %raw_text,
            "model response rejected"
        );
        TripError::malformed(reason, raw_text)
    };

    let payload: Value = serde_json::from_str(json_text)
        .map_err(|err| malformed(format!("response is not valid JSON: {err}")))?;

    if !payload.is_object() {
        return Err(malformed("response JSON is not an object".to_string()));
    }

    let schema = ItineraryResult::schema();
    validate_structured_payload(schema, &payload).map_err(|err| malformed(schema_reason(err)))?;

    let result: ItineraryResult = deserialize_structured_response(&payload, schema)
        .map_err(|err| malformed(schema_reason(err)))?;

    if result.itinerary.is_empty() {
        return Err(malformed("itinerary contains no days".to_string()));
    }

    Ok(result)
}

fn schema_reason(err: TripError) -> String {
    match err {
        TripError::Schema(reason) => reason,
        other => other.to_string(),
    }
}
