use serde::Deserialize;
use serde_json::Value;

use crate::error::VisitError;
use crate::ir::{HttpMethod, ToolDescriptor};
use crate::parse::operation::{Operation, PathItem, PathItemOrRef};
use crate::parse::parameter::ParameterOrRef;

use super::parameters::{extract_parameters, merge_parameters, resolve_parameters};
use super::request_body::extract_request_body;
use super::schema::SchemaNormalizer;

/// Append one tool per supported method of a path item, in
/// [`HttpMethod::ALL`] order.
pub fn visit_path(
    normalizer: &mut SchemaNormalizer<'_, '_>,
    path: &str,
    item: &Value,
    out: &mut Vec<ToolDescriptor>,
) -> Result<(), VisitError> {
    let item = path_item(normalizer, item).map_err(|e| e.in_path(path))?;

    for method in HttpMethod::ALL {
        let Some(node) = operation_for(&item, method) else {
            continue;
        };
        let tool = visit_operation(normalizer, path, method, node, item.parameters.as_ref())
            .map_err(|e| e.in_operation(method.as_str(), path))?;
        out.push(tool);
    }
    Ok(())
}

fn path_item(normalizer: &SchemaNormalizer<'_, '_>, item: &Value) -> Result<PathItem, VisitError> {
    let item = PathItemOrRef::deserialize(item).map_err(|source| VisitError::Malformed {
        what: "path item",
        source,
    })?;
    match item {
        PathItemOrRef::Ref { ref_path } => normalizer.table().resolve_as(&ref_path),
        PathItemOrRef::PathItem(item) => Ok(*item),
    }
}

fn operation_for(item: &PathItem, method: HttpMethod) -> Option<&Value> {
    match method {
        HttpMethod::Get => item.get.as_ref(),
        HttpMethod::Post => item.post.as_ref(),
        HttpMethod::Put => item.put.as_ref(),
        HttpMethod::Delete => item.delete.as_ref(),
        HttpMethod::Options => item.options.as_ref(),
        HttpMethod::Head => item.head.as_ref(),
        HttpMethod::Patch => item.patch.as_ref(),
    }
    .filter(|node| !node.is_null())
}

fn visit_operation(
    normalizer: &mut SchemaNormalizer<'_, '_>,
    path: &str,
    method: HttpMethod,
    node: &Value,
    shared_parameters: Option<&Value>,
) -> Result<ToolDescriptor, VisitError> {
    let op = Operation::deserialize(node).map_err(|source| VisitError::Malformed {
        what: "operation",
        source,
    })?;
    let shared_parameters: Vec<ParameterOrRef> = match shared_parameters {
        Some(node) => Vec::deserialize(node).map_err(|source| VisitError::Malformed {
            what: "path-level parameters",
            source,
        })?,
        None => Vec::new(),
    };

    let missing = |field| VisitError::MissingField {
        field,
        method: method.as_str(),
        path: path.to_string(),
    };

    let name = non_empty(&op.operation_id).ok_or_else(|| missing("operationId"))?;
    let description = non_empty(&op.description)
        .or_else(|| non_empty(&op.summary))
        .ok_or_else(|| missing("description"))?;

    let table = normalizer.table();
    let parameters = merge_parameters(
        resolve_parameters(table, &shared_parameters)?,
        resolve_parameters(table, &op.parameters)?,
    );
    let parameters = extract_parameters(normalizer, &parameters)?;

    let request_body = op
        .request_body
        .as_ref()
        .map(|body| extract_request_body(normalizer, body))
        .transpose()?;

    Ok(ToolDescriptor {
        name: name.to_string(),
        description: description.to_string(),
        path: path.to_string(),
        method,
        path_parameters: parameters.path,
        query_parameters: parameters.query,
        request_body,
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}
