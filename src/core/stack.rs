//! Stack container — an ordered, uniquely-keyed set of resources exported
//! together as one template document.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::error::BuildError;
use super::resource::Resource;
use super::serializer;
use super::types::Value;

/// Template format version emitted in every exported document.
pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

const STACK_NAME_MAX_LEN: usize = 128;

static VALID_STACK_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-zA-Z][a-zA-Z0-9-]*$").expect("stack name pattern"));

/// A named, ordered collection of resources.
///
/// Building is single-writer: a stack must not be mutated from multiple
/// threads. `export` and `render` take `&self` and may be called repeatedly
/// (and concurrently) once construction is done.
#[derive(Debug)]
pub struct Stack {
    name: String,
    description: Option<String>,
    resources: IndexMap<String, Box<dyn Resource>>,
}

impl Stack {
    /// Create an empty stack. The name must start with a letter, contain
    /// only letters, digits and hyphens, and be at most 128 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, BuildError> {
        let name = name.into();
        if name.len() > STACK_NAME_MAX_LEN || !VALID_STACK_NAME.is_match(&name) {
            return Err(BuildError::InvalidIdentifier {
                name,
                reason: "stack names start with a letter, use letters, digits and hyphens, \
                         and are at most 128 characters",
            });
        }
        Ok(Self {
            name,
            description: None,
            resources: IndexMap::new(),
        })
    }

    /// Attach a human-readable description, emitted as the document's
    /// `Description` key.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Number of resources registered.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Add a single resource. The stack is unchanged when the name is
    /// already taken.
    pub fn add(&mut self, resource: impl Resource + 'static) -> Result<&mut Self, BuildError> {
        if self.resources.contains_key(resource.name()) {
            return Err(BuildError::DuplicateResourceName(
                resource.name().to_string(),
            ));
        }
        debug!(stack = %self.name, resource = resource.name(), kind = %resource.kind(), "add resource");
        self.resources
            .insert(resource.name().to_string(), Box::new(resource));
        Ok(self)
    }

    /// Merge another stack's resources into this one, in the other stack's
    /// insertion order. Fails without touching this stack if any incoming
    /// resource name collides with an existing one.
    pub fn merge(&mut self, other: Stack) -> Result<&mut Self, BuildError> {
        for name in other.resources.keys() {
            if self.resources.contains_key(name) {
                return Err(BuildError::DuplicateResourceName(name.clone()));
            }
        }
        debug!(stack = %self.name, from = %other.name, count = other.resources.len(), "merge stack");
        for (name, resource) in other.resources {
            self.resources.insert(name, resource);
        }
        Ok(self)
    }

    /// The resource registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<&dyn Resource, BuildError> {
        self.resources
            .get(name)
            .map(|resource| &**resource)
            .ok_or_else(|| BuildError::ResourceNotFound(name.to_string()))
    }

    /// Export the stack as a template value tree, resources in insertion
    /// order.
    pub fn export(&self) -> Value {
        let mut document = IndexMap::new();
        document.insert(
            "AWSTemplateFormatVersion".to_string(),
            Value::String(TEMPLATE_FORMAT_VERSION.to_string()),
        );
        if let Some(ref description) = self.description {
            document.insert("Description".to_string(), Value::String(description.clone()));
        }
        let mut resources = IndexMap::new();
        for (name, resource) in &self.resources {
            resources.insert(name.clone(), resource.export());
        }
        document.insert("Resources".to_string(), Value::Map(resources));
        Value::Map(document)
    }

    /// Render the stack as template text, the body handed to the
    /// provisioning backend.
    pub fn render(&self) -> String {
        serializer::render(&self.export())
    }
}
