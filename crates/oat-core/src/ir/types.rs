use serde::Serialize;

use super::operations::ToolDescriptor;

/// Result of visiting one OpenAPI document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSpecification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,

    pub tools: Vec<ToolDescriptor>,
}

impl ApiSpecification {
    pub fn tool(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }
}
