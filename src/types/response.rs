use std::any::{type_name, TypeId};

use serde_json::Value;

use crate::{
    error::{Result, TripError},
    schemas::{CompletionSchema, SchemaHandle},
};

/// Deserialize `payload` into `T`, reporting the JSON path of the first mismatch.
pub fn deserialize_structured_response<T>(payload: &Value, schema: &SchemaHandle) -> Result<T>
where
    T: CompletionSchema,
{
    ensure_schema_matches::<T>(schema)?;

    serde_path_to_error::deserialize(payload).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        TripError::Schema(format!(
            "failed to deserialize `{}` at {}: {}",
            schema.schema_name(),
            location,
            err.inner()
        ))
    })
}

fn ensure_schema_matches<T: 'static>(schema: &SchemaHandle) -> Result<()> {
    if schema.type_id() != TypeId::of::<T>() {
        return Err(TripError::Schema(format!(
            "schema `{}` does not match target type `{}`",
            schema.schema_name(),
            type_name::<T>(),
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::itinerary::ItineraryResult;
    use serde_json::json;

    #[test]
    fn test_reports_path_of_wrong_type() {
        let payload = json!({
            "itinerary": [{
                "day": "one",
                "morning": {"summary": "a", "detail": "b"},
                "afternoon": {"summary": "a", "detail": "b"},
                "evening": {"summary": "a", "detail": "b"},
                "night": {"summary": "a", "detail": "b"}
            }],
            "estimated_cost": 10,
            "cautions": []
        });

        let err = deserialize_structured_response::<ItineraryResult>(
            &payload,
            ItineraryResult::schema(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("itinerary[0].day"), "{err}");
    }
}
