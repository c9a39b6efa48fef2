pub mod operation;
pub mod parameters;
pub mod request_body;
pub mod schema;
pub mod spec_visitor;

pub use schema::SchemaNormalizer;
pub use spec_visitor::{SpecVisitor, visit, visit_with_options};
