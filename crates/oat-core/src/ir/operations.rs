use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use super::schemas::NormalizedSchema;

/// HTTP methods that produce tools, in the order they are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// Path or query parameters of one tool. Every property is a primitive or an
/// array of primitives.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ParameterGroup {
    pub properties: IndexMap<String, NormalizedSchema>,

    #[serde(skip_serializing_if = "IndexSet::is_empty")]
    pub required: IndexSet<String>,
}

impl ParameterGroup {
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// One invocable HTTP operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub path: String,
    pub method: HttpMethod,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_parameters: Option<ParameterGroup>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_parameters: Option<ParameterGroup>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<NormalizedSchema>,
}
