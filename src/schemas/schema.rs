use std::any::TypeId;

use schemars::schema::{RootSchema, Schema};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// JSON schema of a completion type, built once by `#[completion_schema]`.
#[derive(Debug)]
pub struct SchemaHandle {
    schema_name: &'static str,
    type_name: &'static str,
    type_id: TypeId,
    schema_json: Value,
}

impl SchemaHandle {
    pub fn from_root_schema<T: 'static>(
        schema_name: &'static str,
        type_name: &'static str,
        root: RootSchema,
    ) -> Self {
        // A RootSchema is plain data; serializing it only fails on a schemars bug.
        let schema_json = serde_json::to_value(root)
            .unwrap_or_else(|err| panic!("schema for {type_name} is not serializable: {err}"));

        Self {
            schema_name,
            type_name,
            type_id: TypeId::of::<T>(),
            schema_json,
        }
    }

    pub fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn schema_json(&self) -> &Value {
        &self.schema_json
    }

    /// Top-level property names the schema marks as required.
    pub fn required_fields(&self) -> Vec<&str> {
        self.schema_json["required"]
            .as_array()
            .map(|fields| fields.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Types the model is asked to produce. Implemented by `#[completion_schema]`.
pub trait CompletionSchema: DeserializeOwned + Send + Sync + 'static {
    fn schema() -> &'static SchemaHandle;
}

/// Stamp the schema name, description and field docs onto a generated root schema.
///
/// The title is always the schema name. An explicit description replaces the one
/// schemars took from the doc comment; field docs only fill gaps.
pub fn apply_doc_comments(
    root: &mut RootSchema,
    title: &'static str,
    description: Option<&'static str>,
    field_docs: &[(&'static str, &'static str)],
) {
    let metadata = root.schema.metadata();
    metadata.title = Some(title.to_string());
    if let Some(description) = description {
        metadata.description = Some(description.to_string());
    }

    let Some(object) = root.schema.object.as_mut() else {
        return;
    };
    for (field, doc) in field_docs {
        if let Some(Schema::Object(property)) = object.properties.get_mut(*field) {
            property
                .metadata()
                .description
                .get_or_insert_with(|| (*doc).to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::itinerary::ItineraryResult;

    #[test]
    fn test_itinerary_schema_handle() {
        let handle = ItineraryResult::schema();

        assert_eq!(handle.schema_name(), "Itinerary");
        assert_eq!(handle.type_name(), "ItineraryResult");
        assert_eq!(handle.type_id(), TypeId::of::<ItineraryResult>());

        let mut required = handle.required_fields();
        required.sort_unstable();
        assert_eq!(required, vec!["cautions", "estimated_cost", "itinerary"]);
    }

    #[test]
    fn test_doc_comments_become_descriptions() {
        let schema = ItineraryResult::schema().schema_json();

        assert_eq!(schema["title"], "Itinerary");
        assert!(schema["description"]
            .as_str()
            .unwrap()
            .contains("day-by-day itinerary"));
        assert_eq!(
            schema["properties"]["estimated_cost"]["description"],
            "Estimated total cost for a single traveler"
        );
    }

    #[test]
    fn test_empty_itinerary_rejected_by_schema() {
        let schema = ItineraryResult::schema().schema_json();
        assert_eq!(schema["properties"]["itinerary"]["minItems"], 1);
    }
}
