use std::borrow::Cow;

use serde_json::Value;

use crate::error::VisitError;
use crate::ir::{NormalizedSchema, ParameterGroup};
use crate::parse::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use crate::parse::ref_resolve::ComponentTable;
use crate::parse::schema::Schema;

use super::request_body::select_media_type;
use super::schema::SchemaNormalizer;

/// The only supported serialization of query parameters (`style: form`, exploded).
pub const QUERY_STYLE: &str = "form";
/// The only supported serialization of path parameters (`style: simple`, not exploded).
pub const PATH_STYLE: &str = "simple";

/// Path and query parameters of one operation. A group is `None` when the
/// operation has no parameter of that kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedParameters {
    pub path: Option<ParameterGroup>,
    pub query: Option<ParameterGroup>,
}

pub fn resolve_parameter<'p>(
    table: &ComponentTable<'_>,
    parameter: &'p ParameterOrRef,
) -> Result<Cow<'p, Parameter>, VisitError> {
    match parameter {
        ParameterOrRef::Ref { ref_path } => Ok(Cow::Owned(table.resolve_as(ref_path)?)),
        ParameterOrRef::Parameter(p) => Ok(Cow::Borrowed(p)),
    }
}

pub fn resolve_parameters<'p>(
    table: &ComponentTable<'_>,
    parameters: &'p [ParameterOrRef],
) -> Result<Vec<Cow<'p, Parameter>>, VisitError> {
    parameters
        .iter()
        .map(|p| resolve_parameter(table, p))
        .collect()
}

/// Combine path-item and operation parameters. An operation parameter
/// replaces a path-item parameter with the same name and location.
pub fn merge_parameters<'p>(
    path_level: Vec<Cow<'p, Parameter>>,
    operation_level: Vec<Cow<'p, Parameter>>,
) -> Vec<Cow<'p, Parameter>> {
    let mut merged: Vec<Cow<'p, Parameter>> = path_level
        .into_iter()
        .filter(|shared| {
            !operation_level
                .iter()
                .any(|own| own.name == shared.name && own.location == shared.location)
        })
        .collect();
    merged.extend(operation_level);
    merged
}

/// Split parameters into path and query groups.
pub fn extract_parameters(
    normalizer: &mut SchemaNormalizer<'_, '_>,
    parameters: &[Cow<'_, Parameter>],
) -> Result<ExtractedParameters, VisitError> {
    let mut path = ParameterGroup::default();
    let mut query = ParameterGroup::default();

    for param in parameters {
        let Some(schema) = parameter_schema(param)? else {
            log::debug!("parameter '{}' has neither schema nor content, skipping", param.name);
            continue;
        };

        let normalized = normalizer.normalize(schema)?;
        if !normalized.is_parameter_type() {
            return Err(VisitError::UnsupportedParameterType {
                name: param.name.clone(),
            });
        }
        if matches!(normalized, NormalizedSchema::Array { .. }) {
            let default = declared_default(normalizer.table(), schema)?;
            if default.is_some_and(|d| !is_primitive_default(d)) {
                return Err(VisitError::UnsupportedDefaultValue {
                    name: param.name.clone(),
                });
            }
        }

        let group = match param.location {
            ParameterLocation::Query => {
                check_style(param, QUERY_STYLE, true)?;
                &mut query
            }
            ParameterLocation::Path => {
                check_style(param, PATH_STYLE, false)?;
                &mut path
            }
            ParameterLocation::Header | ParameterLocation::Cookie => {
                log::debug!("ignoring {} parameter '{}'", param.location, param.name);
                continue;
            }
        };
        if param.required {
            group.required.insert(param.name.clone());
        }
        group.properties.insert(param.name.clone(), normalized);
    }

    Ok(ExtractedParameters {
        path: (!path.is_empty()).then_some(path),
        query: (!query.is_empty()).then_some(query),
    })
}

/// `content` takes precedence over `schema`.
fn parameter_schema(param: &Parameter) -> Result<Option<&Schema>, VisitError> {
    match (&param.content, &param.schema) {
        (Some(content), _) => {
            let (_, media_type) = select_media_type(content)?;
            Ok(media_type.schema.as_ref())
        }
        (None, schema) => Ok(schema.as_ref()),
    }
}

fn check_style(param: &Parameter, style: &str, explode: bool) -> Result<(), VisitError> {
    let style_ok = param.style.as_deref().is_none_or(|s| s == style);
    let explode_ok = param.explode.is_none_or(|e| e == explode);
    if style_ok && explode_ok {
        return Ok(());
    }
    Err(VisitError::UnsupportedParameterStyle {
        name: param.name.clone(),
        location: param.location.as_str(),
        style: param.style.clone(),
        explode: param.explode,
    })
}

/// The `default` a parameter schema declares, looking through a `$ref` when
/// the schema itself has none.
fn declared_default<'s>(
    table: &ComponentTable<'s>,
    schema: &'s Schema,
) -> Result<Option<&'s Value>, VisitError> {
    if schema.default_value.is_some() {
        return Ok(schema.default_value.as_ref());
    }
    match &schema.ref_path {
        Some(reference) => Ok(table.resolve(reference)?.get("default")),
        None => Ok(None),
    }
}

/// A scalar, or an array of scalars.
fn is_primitive_default(value: &Value) -> bool {
    match value {
        Value::Object(_) => false,
        Value::Array(items) => items.iter().all(|v| !v.is_object() && !v.is_array()),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use serde_json::json;

    use super::*;

    fn param(value: Value) -> Parameter {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn operation_parameters_override_path_parameters() {
        let shared = [
            param(json!({ "name": "id", "in": "path", "required": true })),
            param(json!({ "name": "limit", "in": "query" })),
        ];
        let own = [param(json!({ "name": "limit", "in": "query", "required": true }))];

        let merged = merge_parameters(
            shared.iter().map(Cow::Borrowed).collect(),
            own.iter().map(Cow::Borrowed).collect(),
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "id");
        assert_eq!(merged[1].name, "limit");
        assert!(merged[1].required);
    }

    #[test]
    fn same_name_in_different_locations_is_kept() {
        let shared = [param(json!({ "name": "id", "in": "path" }))];
        let own = [param(json!({ "name": "id", "in": "query" }))];
        let merged = merge_parameters(
            shared.iter().map(Cow::Borrowed).collect(),
            own.iter().map(Cow::Borrowed).collect(),
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn primitive_defaults() {
        assert!(is_primitive_default(&json!("a")));
        assert!(is_primitive_default(&json!(["a", 1, true])));
        assert!(!is_primitive_default(&json!({ "a": 1 })));
        assert!(!is_primitive_default(&json!([{ "a": 1 }])));
        assert!(!is_primitive_default(&json!([[1]])));
    }

    #[test]
    fn path_style_rules() {
        let ok = param(json!({ "name": "id", "in": "path", "style": "simple", "explode": false }));
        assert!(check_style(&ok, PATH_STYLE, false).is_ok());

        let exploded = param(json!({ "name": "id", "in": "path", "explode": true }));
        let err = check_style(&exploded, PATH_STYLE, false).unwrap_err();
        assert!(matches!(
            err,
            VisitError::UnsupportedParameterStyle { location: "path", explode: Some(true), .. }
        ));

        let label = param(json!({ "name": "id", "in": "path", "style": "label" }));
        assert!(check_style(&label, PATH_STYLE, false).is_err());
    }

    #[test]
    fn declared_default_follows_reference_chains() {
        let comps: IndexMap<String, Value> = serde_json::from_value(json!({
            "schemas": {
                "Tags": { "$ref": "#/components/schemas/TagList" },
                "TagList": {
                    "type": "array",
                    "items": { "type": "string" },
                    "default": [{ "name": "a" }]
                }
            }
        }))
        .unwrap();
        let table = ComponentTable::new(&comps);

        let by_ref: Schema =
            serde_json::from_value(json!({ "$ref": "#/components/schemas/Tags" })).unwrap();
        assert_eq!(
            declared_default(&table, &by_ref).unwrap(),
            Some(&json!([{ "name": "a" }]))
        );

        let own: Schema = serde_json::from_value(json!({
            "$ref": "#/components/schemas/Tags",
            "default": ["b"]
        }))
        .unwrap();
        assert_eq!(declared_default(&table, &own).unwrap(), Some(&json!(["b"])));
    }
}
