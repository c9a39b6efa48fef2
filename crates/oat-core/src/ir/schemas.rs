use indexmap::{IndexMap, IndexSet};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A reference-free schema, reduced to shape plus a few annotations.
///
/// Serializes in JSON Schema form, e.g. `{"type": "array", "items": ...}` or
/// `{"anyOf": [...]}`.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedSchema {
    Object {
        properties: IndexMap<String, NormalizedSchema>,
        required: IndexSet<String>,
    },
    Array {
        items: Box<NormalizedSchema>,
    },
    Primitive(PrimitiveSchema),
    AnyOf(Vec<NormalizedSchema>),
    OneOf(Vec<NormalizedSchema>),
    AllOf(Vec<NormalizedSchema>),
    Not(Box<NormalizedSchema>),
}

impl NormalizedSchema {
    pub fn as_primitive(&self) -> Option<&PrimitiveSchema> {
        match self {
            NormalizedSchema::Primitive(p) => Some(p),
            _ => None,
        }
    }

    /// Primitive, or an array whose items are primitive. The only shapes a
    /// path or query parameter may take.
    pub fn is_parameter_type(&self) -> bool {
        match self {
            NormalizedSchema::Primitive(_) => true,
            NormalizedSchema::Array { items } => items.as_primitive().is_some(),
            _ => false,
        }
    }
}

impl Serialize for NormalizedSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let NormalizedSchema::Primitive(p) = self {
            return p.serialize(serializer);
        }

        let mut map = serializer.serialize_map(None)?;
        match self {
            NormalizedSchema::Object {
                properties,
                required,
            } => {
                map.serialize_entry("type", "object")?;
                map.serialize_entry("properties", properties)?;
                if !required.is_empty() {
                    map.serialize_entry("required", required)?;
                }
            }
            NormalizedSchema::Array { items } => {
                map.serialize_entry("type", "array")?;
                map.serialize_entry("items", items)?;
            }
            NormalizedSchema::AnyOf(variants) => map.serialize_entry("anyOf", variants)?,
            NormalizedSchema::OneOf(variants) => map.serialize_entry("oneOf", variants)?,
            NormalizedSchema::AllOf(variants) => map.serialize_entry("allOf", variants)?,
            NormalizedSchema::Not(inner) => map.serialize_entry("not", inner)?,
            NormalizedSchema::Primitive(_) => {}
        }
        map.end()
    }
}

/// Scalar type of a primitive schema. OpenAPI `number` maps to `Float`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    String,
    Integer,
    Boolean,
    Float,
}

impl PrimitiveType {
    pub fn from_openapi(schema_type: &str) -> Option<Self> {
        match schema_type {
            "string" => Some(PrimitiveType::String),
            "integer" => Some(PrimitiveType::Integer),
            "boolean" => Some(PrimitiveType::Boolean),
            "number" => Some(PrimitiveType::Float),
            _ => None,
        }
    }
}

/// A primitive schema. `description` and `default` are only populated when
/// extraction is enabled; `format`, `pattern` and `enum` only for strings.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PrimitiveSchema {
    #[serde(rename = "type")]
    pub primitive_type: PrimitiveType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,
}

impl PrimitiveSchema {
    pub fn new(primitive_type: PrimitiveType) -> Self {
        Self {
            primitive_type,
            description: None,
            default_value: None,
            format: None,
            pattern: None,
            enum_values: None,
        }
    }
}
