use schemars::JsonSchema;
use serde::Deserialize;
use tripwand::{completion_schema, CompletionSchema};

/// Packing list for a trip.
#[completion_schema]
#[derive(Debug, Deserialize, JsonSchema)]
#[allow(dead_code)]
struct PackingList {
    /// Items to bring
    items: Vec<String>,
    /// Optional note for the traveler
    #[serde(default)]
    note: Option<String>,
}

#[completion_schema(name = "Budget", description = "Per-category trip budget")]
#[derive(Debug, Deserialize, JsonSchema)]
#[allow(dead_code)]
struct BudgetSheet {
    lodging: u64,
    meals: u64,
}

#[test]
fn test_schema_name_defaults_to_struct_ident() {
    let handle = PackingList::schema();

    assert_eq!(handle.schema_name(), "PackingList");
    assert_eq!(handle.type_name(), "PackingList");
    assert_eq!(handle.schema_json()["title"], "PackingList");
    assert_eq!(handle.schema_json()["description"], "Packing list for a trip.");
    assert_eq!(handle.required_fields(), vec!["items"]);
}

#[test]
fn test_explicit_arguments_override_docs() {
    let handle = BudgetSheet::schema();

    assert_eq!(handle.schema_name(), "Budget");
    assert_eq!(handle.type_name(), "BudgetSheet");
    assert_eq!(handle.schema_json()["title"], "Budget");
    assert_eq!(handle.schema_json()["description"], "Per-category trip budget");
}

#[test]
fn test_schema_handle_is_cached() {
    assert!(std::ptr::eq(PackingList::schema(), PackingList::schema()));
}

#[test]
fn test_field_docs_reach_properties() {
    let schema = PackingList::schema().schema_json();

    assert_eq!(schema["properties"]["items"]["description"], "Items to bring");
    assert_eq!(schema["properties"]["items"]["type"], "array");
}
