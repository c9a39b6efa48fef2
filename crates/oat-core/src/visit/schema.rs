use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;

use crate::config::VisitOptions;
use crate::error::{ParseError, VisitError};
use crate::ir::{NormalizedSchema, PrimitiveSchema, PrimitiveType};
use crate::parse::ref_resolve::ComponentTable;
use crate::parse::schema::Schema;

/// Deepest schema nesting accepted before the document is rejected as
/// excessively large.
pub const MAX_SCHEMA_DEPTH: usize = 128;

/// Pattern synthesized for `format: date` strings.
pub const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

/// Pattern synthesized for `format: date-time` strings (RFC 3339).
pub const DATE_TIME_PATTERN: &str =
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2})$";

/// The single shape a raw schema node is treated as.
enum Shape<'s> {
    Object,
    Array(&'s Schema),
    Primitive(PrimitiveType),
    AnyOf(&'s [Schema]),
    OneOf(&'s [Schema]),
    AllOf(&'s [Schema]),
    Not(&'s Schema),
    Ref(&'s str),
}

/// Classify a node. Keyword groups are checked in a fixed priority order and
/// the first match wins, so a node carrying both `properties` and `$ref` is
/// an object.
fn shape(schema: &Schema) -> Result<Shape<'_>, VisitError> {
    let schema_type = schema.schema_type.as_deref();

    if schema.properties.is_some() || schema_type == Some("object") {
        return Ok(Shape::Object);
    }
    if schema_type == Some("array") || (schema_type.is_none() && schema.items.is_some()) {
        return schema
            .items
            .as_deref()
            .map(Shape::Array)
            .ok_or_else(|| VisitError::SchemaParsing("array schema without `items`".to_string()));
    }
    if let Some(primitive) = schema_type.and_then(PrimitiveType::from_openapi) {
        return Ok(Shape::Primitive(primitive));
    }
    if let Some(variants) = &schema.any_of {
        return Ok(Shape::AnyOf(variants));
    }
    if let Some(variants) = &schema.one_of {
        return Ok(Shape::OneOf(variants));
    }
    if let Some(variants) = &schema.all_of {
        return Ok(Shape::AllOf(variants));
    }
    if let Some(inner) = &schema.not {
        return Ok(Shape::Not(inner));
    }
    if let Some(reference) = &schema.ref_path {
        return Ok(Shape::Ref(reference));
    }

    Err(VisitError::SchemaParsing(match schema_type {
        Some(t) => format!("unsupported schema type '{t}'"),
        None => "schema matches no supported shape".to_string(),
    }))
}

/// Converts raw schemas into [`NormalizedSchema`], resolving `$ref`s through
/// the component table.
///
/// Keeps the chain of references currently being expanded; meeting one of
/// them again means the document is cyclic.
pub struct SchemaNormalizer<'t, 'a> {
    table: &'t ComponentTable<'a>,
    options: VisitOptions,
    resolving: Vec<String>,
    depth: usize,
}

impl<'t, 'a> SchemaNormalizer<'t, 'a> {
    pub fn new(table: &'t ComponentTable<'a>, options: VisitOptions) -> Self {
        Self {
            table,
            options,
            resolving: Vec::new(),
            depth: 0,
        }
    }

    pub fn table(&self) -> &'t ComponentTable<'a> {
        self.table
    }

    pub fn normalize(&mut self, schema: &Schema) -> Result<NormalizedSchema, VisitError> {
        if self.depth >= MAX_SCHEMA_DEPTH {
            return Err(VisitError::CyclicReferenceOrExcessiveSize {
                reason: format!("schema nesting exceeds {MAX_SCHEMA_DEPTH} levels"),
            });
        }
        self.depth += 1;
        let result = self.normalize_shape(schema);
        self.depth -= 1;
        result
    }

    fn normalize_shape(&mut self, schema: &Schema) -> Result<NormalizedSchema, VisitError> {
        match shape(schema)? {
            Shape::Object => self.normalize_object(schema),
            Shape::Array(items) => Ok(NormalizedSchema::Array {
                items: Box::new(self.normalize(items)?),
            }),
            Shape::Primitive(primitive_type) => Ok(NormalizedSchema::Primitive(
                self.primitive(primitive_type, schema),
            )),
            Shape::AnyOf(variants) => Ok(NormalizedSchema::AnyOf(self.normalize_all(variants)?)),
            Shape::OneOf(variants) => Ok(NormalizedSchema::OneOf(self.normalize_all(variants)?)),
            Shape::AllOf(variants) => Ok(NormalizedSchema::AllOf(self.normalize_all(variants)?)),
            Shape::Not(inner) => Ok(NormalizedSchema::Not(Box::new(self.normalize(inner)?))),
            Shape::Ref(reference) => self.normalize_ref(reference),
        }
    }

    fn normalize_object(&mut self, schema: &Schema) -> Result<NormalizedSchema, VisitError> {
        let mut properties = IndexMap::new();
        for (name, prop) in schema.properties.iter().flatten() {
            properties.insert(name.clone(), self.normalize(prop)?);
        }
        let required: IndexSet<String> = schema.required.iter().flatten().cloned().collect();
        Ok(NormalizedSchema::Object {
            properties,
            required,
        })
    }

    fn normalize_all(&mut self, schemas: &[Schema]) -> Result<Vec<NormalizedSchema>, VisitError> {
        schemas.iter().map(|s| self.normalize(s)).collect()
    }

    fn normalize_ref(&mut self, reference: &str) -> Result<NormalizedSchema, VisitError> {
        if self.resolving.iter().any(|r| r == reference) {
            let mut chain = self.resolving.clone();
            chain.push(reference.to_string());
            return Err(VisitError::CyclicReferenceOrExcessiveSize {
                reason: format!("circular reference {}", chain.join(" -> ")),
            });
        }

        let target = self.table.lookup(reference)?;
        let schema = Schema::deserialize(target).map_err(|source| ParseError::Component {
            reference: reference.to_string(),
            source,
        })?;

        self.resolving.push(reference.to_string());
        let result = self.normalize(&schema);
        self.resolving.pop();
        result
    }

    fn primitive(&self, primitive_type: PrimitiveType, schema: &Schema) -> PrimitiveSchema {
        let mut primitive = PrimitiveSchema::new(primitive_type);
        if self.options.extract_description {
            primitive.description = schema.description.clone();
        }
        if self.options.extract_default {
            primitive.default_value = schema.default_value.clone();
        }
        if primitive_type == PrimitiveType::String {
            primitive.enum_values = schema.enum_values.clone();
            primitive.format = schema.format.clone();
            primitive.pattern = schema
                .pattern
                .clone()
                .or_else(|| format_pattern(schema.format.as_deref()).map(str::to_string));
        }
        primitive
    }
}

fn format_pattern(format: Option<&str>) -> Option<&'static str> {
    match format {
        Some("date") => Some(DATE_PATTERN),
        Some("date-time") => Some(DATE_TIME_PATTERN),
        _ => None,
    }
}
