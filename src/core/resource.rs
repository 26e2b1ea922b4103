//! Resource contract — identity, kind, dependency, and the export fragment.

use indexmap::IndexMap;
use std::fmt;

use super::error::BuildError;
use super::types::{Reference, ResourceKind, Value};

/// Check a logical resource name: non-empty ASCII alphanumeric.
pub fn validate_resource_name(name: &str) -> Result<(), BuildError> {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(BuildError::InvalidIdentifier {
            name: name.to_string(),
            reason: "resource names must be non-empty and alphanumeric",
        })
    }
}

/// A single declared infrastructure unit.
///
/// Concrete kinds implement `name`, `kind` and `properties` (and `depends`
/// when they declare an explicit ordering edge); `reference`, `attribute`
/// and `export` are derived from those.
///
/// Resources are not synchronized: a resource belongs to one logical
/// builder until it is handed to a stack, after which only shared reads
/// remain.
pub trait Resource: fmt::Debug {
    /// Logical name within the owning stack.
    fn name(&self) -> &str;

    /// Catalog kind, fixed at construction.
    fn kind(&self) -> ResourceKind;

    /// Name of a resource that must be realized before this one.
    fn depends(&self) -> Option<&str> {
        None
    }

    /// Kind-specific property payload. Recomputed on every call, so builder
    /// mutations made after construction are reflected.
    fn properties(&self) -> IndexMap<String, Value>;

    /// `!Ref` to this resource.
    fn reference(&self) -> Reference {
        Reference::new(self.name())
    }

    /// `!GetAtt` for one of this kind's declared attributes.
    fn attribute(&self, attribute: &str) -> Result<Reference, BuildError> {
        if !self.kind().attributes().contains(&attribute) {
            return Err(BuildError::InvalidAttribute {
                resource: self.name().to_string(),
                attribute: attribute.to_string(),
            });
        }
        Ok(Reference::GetAtt {
            name: self.name().to_string(),
            attribute: attribute.to_string(),
        })
    }

    /// Template fragment: `{Type, Properties, DependsOn?}`. `DependsOn` is
    /// omitted entirely when no dependency is set.
    fn export(&self) -> Value {
        let mut fragment = IndexMap::new();
        fragment.insert(
            "Type".to_string(),
            Value::String(self.kind().as_str().to_string()),
        );
        fragment.insert("Properties".to_string(), Value::Map(self.properties()));
        if let Some(dep) = self.depends() {
            fragment.insert("DependsOn".to_string(), Value::String(dep.to_string()));
        }
        Value::Map(fragment)
    }
}
