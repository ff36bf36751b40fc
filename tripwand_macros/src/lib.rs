//! Procedural macros for tripwand.
//!
//! `#[completion_schema]` turns a response struct into a `CompletionSchema`
//! whose JSON schema is generated once and cached for the life of the process.

mod completion_schema;
mod schema_extraction;

use proc_macro::TokenStream;

/// Derive a cached `tripwand::schemas::SchemaHandle` for a named-field struct.
///
/// Accepts optional `name = "..."` and `description = "..."` arguments; otherwise the
/// struct ident and its doc comment are used.
#[proc_macro_attribute]
pub fn completion_schema(attr: TokenStream, item: TokenStream) -> TokenStream {
    completion_schema::completion_schema(attr, item)
}
