//! Source-control repository resource.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

use crate::core::error::BuildError;
use crate::core::resource::{validate_resource_name, Resource};
use crate::core::types::{ResourceKind, Value};

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-zA-Z0-9]+").expect("alnum pattern"));

/// A hosted source repository.
///
/// The logical name is the display name with every non-alphanumeric run
/// stripped, so display names with separators stay addressable in a stack;
/// the backend keeps the original display name.
#[derive(Debug)]
pub struct Repository {
    name: String,
    repository_name: String,
    description: String,
}

impl Repository {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, BuildError> {
        let repository_name = name.into();
        let name = NON_ALNUM.replace_all(&repository_name, "").into_owned();
        validate_resource_name(&name)?;
        Ok(Self {
            name,
            repository_name,
            description: description.into(),
        })
    }
}

impl Resource for Repository {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::CodeCommitRepository
    }

    fn properties(&self) -> IndexMap<String, Value> {
        IndexMap::from([
            (
                "RepositoryName".to_string(),
                Value::String(self.repository_name.clone()),
            ),
            (
                "RepositoryDescription".to_string(),
                Value::String(self.description.clone()),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_sanitized_into_logical_name() {
        let repo = Repository::new("team/widget-api", "widget sources").unwrap();
        assert_eq!(repo.name(), "teamwidgetapi");
        assert_eq!(
            repo.properties()
                .get("RepositoryName")
                .and_then(Value::as_str),
            Some("team/widget-api")
        );
    }

    #[test]
    fn test_all_symbol_name_rejected() {
        assert!(Repository::new("---", "no letters").is_err());
    }

    #[test]
    fn test_properties_carry_description() {
        let repo = Repository::new("tools", "internal tooling").unwrap();
        assert_eq!(repo.kind(), ResourceKind::CodeCommitRepository);
        assert_eq!(
            repo.properties()
                .get("RepositoryDescription")
                .and_then(Value::as_str),
            Some("internal tooling")
        );
    }

    #[test]
    fn test_declared_attributes_referencable() {
        let repo = Repository::new("tools", "internal tooling").unwrap();
        assert!(repo.attribute("CloneUrlHttp").is_ok());
        assert!(repo.attribute("CloneUrlGit").is_err());
    }
}
