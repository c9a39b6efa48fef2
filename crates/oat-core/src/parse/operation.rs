use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::parameter::ParameterOrRef;
use super::ref_resolve::ref_or_inline;
use super::request_body::RequestBodyOrRef;

/// An API operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodyOrRef>,
}

/// A path item, containing operations keyed by HTTP method.
///
/// Operations and shared parameters stay raw until the visitor reaches them,
/// so a malformed one is reported together with its method and path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Value>,
}

/// A reference or inline path item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathItemOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    PathItem(Box<PathItem>),
}

impl<'de> Deserialize<'de> for PathItemOrRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ref_or_inline(
            deserializer,
            |ref_path| PathItemOrRef::Ref { ref_path },
            |item| PathItemOrRef::PathItem(Box::new(item)),
        )
    }
}
