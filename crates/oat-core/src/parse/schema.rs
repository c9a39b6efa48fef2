use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A raw JSON Schema node as it appears in an OpenAPI 3.0 document.
///
/// Several keyword groups may be present at once (e.g. `$ref` next to
/// `properties`); which one wins is decided by the schema normalizer, not
/// here. `type` is kept as a plain string so unknown types reach the
/// normalizer and fail there with a schema error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,

    // Object properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,

    /// Only a list of strings is kept; any other value (e.g. a property
    /// level `required: true`) is dropped.
    #[serde(
        default,
        deserialize_with = "string_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub required: Option<Vec<String>>,

    // Array items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    // Composition
    #[serde(rename = "allOf", skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<Schema>>,

    #[serde(rename = "oneOf", skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Schema>>,

    #[serde(rename = "anyOf", skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<Schema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<Schema>>,
}

fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match serde_json::from_value(value) {
        Ok(names) => Some(names),
        Err(e) => {
            log::debug!("ignoring `required` that is not a list of names: {e}");
            None
        }
    }))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn required_list_is_kept() {
        let schema: Schema = serde_json::from_value(json!({ "required": ["a", "b"] })).unwrap();
        assert_eq!(schema.required, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn malformed_required_is_dropped() {
        for required in [json!(true), json!("a"), json!(["a", 1]), json!(null)] {
            let schema: Schema = serde_json::from_value(json!({
                "type": "string",
                "required": required
            }))
            .unwrap();
            assert!(schema.required.is_none(), "{required}");
        }

        let schema: Schema = serde_json::from_value(json!({ "type": "string" })).unwrap();
        assert!(schema.required.is_none());
    }
}
