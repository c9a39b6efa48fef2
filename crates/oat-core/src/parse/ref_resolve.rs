use std::collections::HashMap;

use indexmap::IndexMap;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ParseError, ResolveError, VisitError};

const COMPONENTS_PREFIX: &str = "#/components/";

/// Lookup table from `#/components/<kind>/<name>` to the raw component it
/// designates. Built once per visit and never mutated afterwards.
#[derive(Debug, Default)]
pub struct ComponentTable<'a> {
    entries: HashMap<String, &'a Value>,
}

impl<'a> ComponentTable<'a> {
    /// Register every entry of every mapping-valued component group.
    /// Groups that are not mappings are skipped.
    pub fn new(components: &'a IndexMap<String, Value>) -> Self {
        let mut entries = HashMap::new();
        for (kind, group) in components {
            let Some(group) = group.as_object() else {
                log::debug!("skipping non-mapping component group '{kind}'");
                continue;
            };
            for (name, component) in group {
                entries.insert(component_ref(kind, name), component);
            }
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Single lookup step; a component that is itself a reference is
    /// returned as-is.
    pub fn lookup(&self, reference: &str) -> Result<&'a Value, ResolveError> {
        self.entries
            .get(reference)
            .copied()
            .ok_or_else(|| ResolveError::InvalidReference(reference.to_string()))
    }

    /// Look up `reference` and keep following while the target is itself a
    /// reference. A chain that comes back to a reference it already passed
    /// through is reported as circular.
    pub fn resolve(&self, reference: &str) -> Result<&'a Value, ResolveError> {
        let mut chain = vec![reference];
        let mut current = self.lookup(reference)?;
        while let Some(next) = reference_of(current) {
            if chain.contains(&next) {
                chain.push(next);
                return Err(ResolveError::CircularReference(chain.join(" -> ")));
            }
            chain.push(next);
            current = self.lookup(next)?;
        }
        Ok(current)
    }

    /// Resolve `reference` and deserialize the target into the shape the
    /// referencing site expects.
    pub fn resolve_as<T: DeserializeOwned>(&self, reference: &str) -> Result<T, VisitError> {
        let value = self.resolve(reference)?;
        T::deserialize(value).map_err(|source| {
            ParseError::Component {
                reference: reference.to_string(),
                source,
            }
            .into()
        })
    }
}

/// Build the reference string for a component.
pub fn component_ref(kind: &str, name: &str) -> String {
    format!("{COMPONENTS_PREFIX}{kind}/{name}")
}

/// The `$ref` target of a raw value, if the value is a reference object.
pub fn reference_of(value: &Value) -> Option<&str> {
    value.get("$ref").and_then(Value::as_str)
}

/// Deserialize either a reference object or an inline `T`. Unlike an untagged
/// enum, a malformed inline value reports its own error instead of a generic
/// "no variant matched".
pub(crate) fn ref_or_inline<'de, D, T, R>(
    deserializer: D,
    by_ref: impl FnOnce(String) -> R,
    inline: impl FnOnce(T) -> R,
) -> Result<R, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if let Some(reference) = reference_of(&value) {
        return Ok(by_ref(reference.to_string()));
    }
    T::deserialize(value).map(inline).map_err(D::Error::custom)
}
