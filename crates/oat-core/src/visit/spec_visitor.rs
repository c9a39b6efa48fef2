use crate::config::VisitOptions;
use crate::error::VisitError;
use crate::ir::ApiSpecification;
use crate::parse::ref_resolve::ComponentTable;
use crate::parse::server::Server;
use crate::parse::spec::OpenApiSpec;

use super::operation::visit_path;
use super::schema::SchemaNormalizer;

/// Walks one OpenAPI document and produces its tool list.
///
/// A visitor is consumed by [`SpecVisitor::visit`]; build a new one per
/// document.
pub struct SpecVisitor<'a> {
    spec: &'a OpenApiSpec,
    options: VisitOptions,
}

impl<'a> SpecVisitor<'a> {
    pub fn new(spec: &'a OpenApiSpec, options: VisitOptions) -> Self {
        Self { spec, options }
    }

    pub fn visit(self) -> Result<ApiSpecification, VisitError> {
        let service_url = service_url(&self.spec.servers);

        let table = ComponentTable::new(&self.spec.components);
        log::debug!("registered {} components", table.len());

        let mut normalizer = SchemaNormalizer::new(&table, self.options);
        let mut tools = Vec::new();
        for (path, item) in &self.spec.paths {
            visit_path(&mut normalizer, path, item, &mut tools)?;
        }

        log::debug!(
            "visited {} paths, produced {} tools",
            self.spec.paths.len(),
            tools.len()
        );
        Ok(ApiSpecification { service_url, tools })
    }
}

/// Visit a parsed spec with default options.
pub fn visit(spec: &OpenApiSpec) -> Result<ApiSpecification, VisitError> {
    visit_with_options(spec, VisitOptions::default())
}

/// Visit with explicit extraction options.
pub fn visit_with_options(
    spec: &OpenApiSpec,
    options: VisitOptions,
) -> Result<ApiSpecification, VisitError> {
    SpecVisitor::new(spec, options).visit()
}

fn service_url(servers: &[Server]) -> Option<String> {
    if servers.len() > 1 {
        log::warn!(
            "{} servers declared, using the first one ({})",
            servers.len(),
            servers[0].url
        );
    }
    servers.first().map(|s| s.url.clone())
}
