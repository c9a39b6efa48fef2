pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod request_body;
pub mod schema;
pub mod server;
pub mod spec;

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::ParseError;
use spec::OpenApiSpec;

/// Parse an OpenAPI spec from YAML.
pub fn from_yaml(input: &str) -> Result<OpenApiSpec, ParseError> {
    // YAML mappings may use non-string keys (`200:`); go through the YAML
    // value model so they are stringified instead of rejected.
    let yaml: serde_yaml_ng::Value = serde_yaml_ng::from_str(input)?;
    let value = serde_json::to_value(yaml).map_err(ParseError::Json)?;
    from_value(value)
}

/// Parse an OpenAPI spec from JSON.
pub fn from_json(input: &str) -> Result<OpenApiSpec, ParseError> {
    let value: Value = serde_json::from_str(input).map_err(ParseError::Json)?;
    from_value(value)
}

/// Read a spec file, choosing the decoder from its extension.
pub fn from_path(path: &Path) -> Result<OpenApiSpec, ParseError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !matches!(ext, "json" | "yaml" | "yml") {
        return Err(ParseError::UnsupportedExtension(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match ext {
        "json" => from_json(&content),
        _ => from_yaml(&content),
    }
}

/// Check the version of an already decoded document, then deserialize it.
pub fn from_value(value: Value) -> Result<OpenApiSpec, ParseError> {
    validate_version(&value)?;
    serde_json::from_value(value).map_err(ParseError::SpecParsing)
}

fn validate_version(document: &Value) -> Result<(), ParseError> {
    let version = match document.get("openapi") {
        Some(Value::String(v)) => v,
        Some(other) => return Err(ParseError::UnsupportedVersion(other.to_string())),
        None => return Err(ParseError::UnsupportedVersion("<missing>".to_string())),
    };
    let supported = version
        .strip_prefix("3.0.")
        .is_some_and(|patch| patch.chars().count() == 1);
    if !supported {
        return Err(ParseError::UnsupportedVersion(version.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_3_0_patch_versions() {
        for v in ["3.0.0", "3.0.3"] {
            assert!(validate_version(&json!({ "openapi": v })).is_ok(), "{v}");
        }
    }

    #[test]
    fn rejects_other_versions() {
        for doc in [
            json!({}),
            json!({ "openapi": 3.0 }),
            json!({ "openapi": "2.0" }),
            json!({ "openapi": "3.1.0" }),
            json!({ "openapi": "3.0.10" }),
            json!({ "openapi": "3.0" }),
        ] {
            let err = validate_version(&doc).unwrap_err();
            assert!(matches!(err, ParseError::UnsupportedVersion(_)), "{doc}");
        }
    }

    #[test]
    fn structural_mismatch_is_a_spec_parsing_error() {
        let doc = json!({ "openapi": "3.0.1", "paths": ["not", "a", "map"] });
        let err = from_value(doc).unwrap_err();
        assert!(matches!(err, ParseError::SpecParsing(_)));
    }

    #[test]
    fn yaml_integer_keys_are_tolerated() {
        let yaml = r#"
openapi: 3.0.2
paths:
  /ping:
    get:
      operationId: ping
      responses:
        200:
          description: ok
"#;
        let spec = from_yaml(yaml).unwrap();
        assert_eq!(spec.paths.len(), 1);
    }
}
