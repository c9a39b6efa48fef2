use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::media_type::MediaType;
use super::ref_resolve::ref_or_inline;

/// The part of a request body the visitor reads: its content map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    pub content: IndexMap<String, MediaType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestBodyOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    RequestBody(RequestBody),
}

impl<'de> Deserialize<'de> for RequestBodyOrRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ref_or_inline(
            deserializer,
            |ref_path| RequestBodyOrRef::Ref { ref_path },
            RequestBodyOrRef::RequestBody,
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reference_wins_over_other_keys() {
        let body: RequestBodyOrRef = serde_json::from_value(json!({
            "$ref": "#/components/requestBodies/NewPet",
            "description": "ignored"
        }))
        .unwrap();
        assert!(matches!(body, RequestBodyOrRef::Ref { ref_path } if ref_path.ends_with("NewPet")));
    }

    #[test]
    fn malformed_inline_body_keeps_its_error() {
        let err = serde_json::from_value::<RequestBodyOrRef>(json!({ "description": "x" }))
            .unwrap_err();
        assert!(err.to_string().contains("missing field `content`"), "{err}");
    }
}
