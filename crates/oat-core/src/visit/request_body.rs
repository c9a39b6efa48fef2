use std::borrow::Cow;

use indexmap::IndexMap;

use crate::error::VisitError;
use crate::ir::NormalizedSchema;
use crate::parse::media_type::MediaType;
use crate::parse::request_body::{RequestBody, RequestBodyOrRef};

use super::schema::SchemaNormalizer;

/// Whether a media-type key is one the tool layer can send: `application/*json`,
/// `text/*plain` or `*/*`. Parameters after `;` are ignored.
pub fn is_json_compatible(media_type: &str) -> bool {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    let Some((top, sub)) = essence.split_once('/') else {
        return false;
    };
    match top {
        "application" => sub.ends_with("json"),
        "text" => sub.ends_with("plain"),
        "*" => sub == "*",
        _ => false,
    }
}

/// First JSON-compatible entry of a content map, in declaration order.
pub fn select_media_type(
    content: &IndexMap<String, MediaType>,
) -> Result<(&str, &MediaType), VisitError> {
    content
        .iter()
        .find(|(key, _)| is_json_compatible(key))
        .map(|(key, mt)| (key.as_str(), mt))
        .ok_or_else(|| VisitError::UnsupportedContentType {
            available: content.keys().cloned().collect(),
        })
}

/// Normalize the schema of the JSON-compatible media type of a request body.
pub fn extract_request_body(
    normalizer: &mut SchemaNormalizer<'_, '_>,
    body: &RequestBodyOrRef,
) -> Result<NormalizedSchema, VisitError> {
    let body: Cow<'_, RequestBody> = match body {
        RequestBodyOrRef::Ref { ref_path } => Cow::Owned(normalizer.table().resolve_as(ref_path)?),
        RequestBodyOrRef::RequestBody(rb) => Cow::Borrowed(rb),
    };

    let (media_type, entry) = select_media_type(&body.content)?;
    let schema = entry.schema.as_ref().ok_or_else(|| {
        VisitError::SchemaParsing(format!("media type '{media_type}' has no schema"))
    })?;
    normalizer.normalize(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_compatible_media_types() {
        for mt in [
            "application/json",
            "application/vnd.api+json",
            "application/json; charset=utf-8",
            "text/plain",
            "*/*",
        ] {
            assert!(is_json_compatible(mt), "{mt}");
        }
        for mt in [
            "application/xml",
            "multipart/form-data",
            "application/x-www-form-urlencoded",
            "text/html",
            "application/*",
            "json",
        ] {
            assert!(!is_json_compatible(mt), "{mt}");
        }
    }

    #[test]
    fn first_compatible_entry_wins() {
        let mut content = IndexMap::new();
        content.insert("application/xml".to_string(), MediaType::default());
        content.insert("text/plain".to_string(), MediaType::default());
        content.insert("application/json".to_string(), MediaType::default());
        let (key, _) = select_media_type(&content).unwrap();
        assert_eq!(key, "text/plain");
    }
}
