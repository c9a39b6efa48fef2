//! OpenAPI 3.0 documents in, flat lists of invocable tool descriptors out.
//!
//! [`parse`] loads and version-checks a document, [`visit`] resolves its
//! references and normalizes every operation into an [`ir::ToolDescriptor`].

pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod visit;

use config::VisitOptions;
use error::VisitError;
use ir::ApiSpecification;

/// Version-check, deserialize and visit an already decoded document.
pub fn convert(
    document: serde_json::Value,
    options: VisitOptions,
) -> Result<ApiSpecification, VisitError> {
    let spec = parse::from_value(document)?;
    visit::visit_with_options(&spec, options)
}
