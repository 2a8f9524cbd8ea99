//! Data structures describing page asset dependencies and their resolution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Kind of client-side asset a dependency refers to.
///
/// Only `Css` and `Javascript` participate in composite batching; `Other`
/// covers dependencies that are resolved and passed through to registration
/// untouched (favicons, web fonts declared as plain links, and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum DependencyType {
    /// A stylesheet, combinable into a composite CSS resource.
    Css,
    /// A script, combinable into a composite JavaScript resource.
    Javascript,
    /// Anything else; resolved but never combined.
    Other,
}

impl DependencyType {
    /// Wire tag used for the `t` query parameter of composite URLs.
    ///
    /// Returns `None` for types that never appear in a composite URL.
    pub fn query_tag(self) -> Option<&'static str> {
        match self {
            Self::Css => Some("Css"),
            Self::Javascript => Some("Javascript"),
            Self::Other => None,
        }
    }

    /// Parse the wire tag back into a type, as the composite handler does.
    pub fn from_query_tag(tag: &str) -> Option<Self> {
        match tag {
            "Css" => Some(Self::Css),
            "Javascript" => Some(Self::Javascript),
            _ => None,
        }
    }
}

/// A single declared file dependency, as authored by the page or control.
///
/// `file_path` is the raw path as written at the declaration site; it is not
/// touched during aggregation. Resolution produces an independent
/// [`ResolvedDependency`] instead of mutating this record.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    /// Raw file path as declared (app-relative, alias-relative or absolute).
    pub file_path: String,
    /// Asset kind, deciding which composite batch the file belongs to.
    pub dependency_type: DependencyType,
    /// Registration priority; lower sorts first, ties keep declaration order.
    pub priority: i32,
    /// Optional name of a registered path alias to resolve against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_name_alias: Option<String>,
}

impl Dependency {
    /// Convenience constructor for a dependency without a path alias.
    pub fn new(
        file_path: impl Into<String>,
        dependency_type: DependencyType,
        priority: i32,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            dependency_type,
            priority,
            path_name_alias: None,
        }
    }

    /// Attach a path alias name to resolve this dependency against.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.path_name_alias = Some(alias.into());
        self
    }
}

/// A dependency after path resolution.
///
/// Carries the final request path that will appear in generated markup along
/// with the fields aggregation still needs for partitioning and ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependency {
    /// Fully resolved request path, cache-busted already when in debug mode.
    pub request_path: String,
    /// Asset kind carried over from the declaration.
    pub dependency_type: DependencyType,
    /// Priority carried over from the declaration.
    pub priority: i32,
}

/// Registered named base paths that dependencies can resolve against.
///
/// Lookup is an exact string match on the alias name. Registering the same
/// name twice keeps the later base path.
#[derive(Debug, Clone, Default)]
pub struct PathAliasSet {
    aliases: BTreeMap<String, String>,
}

impl PathAliasSet {
    /// Create an empty alias set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named base path.
    pub fn insert(&mut self, name: impl Into<String>, resolved_path: impl Into<String>) {
        self.aliases.insert(name.into(), resolved_path.into());
    }

    /// Look up the raw base path registered under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// Returns `true` when no aliases are registered.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl<N: Into<String>, P: Into<String>> FromIterator<(N, P)> for PathAliasSet {
    fn from_iter<I: IntoIterator<Item = (N, P)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, path) in iter {
            set.insert(name, path);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_tags_round_trip_for_combinable_types() {
        for ty in [DependencyType::Css, DependencyType::Javascript] {
            let tag = ty.query_tag().unwrap();
            assert_eq!(DependencyType::from_query_tag(tag), Some(ty));
        }
    }

    #[test]
    fn other_type_has_no_query_tag() {
        assert_eq!(DependencyType::Other.query_tag(), None);
        assert_eq!(DependencyType::from_query_tag("Other"), None);
    }

    #[test]
    fn later_alias_registration_wins() {
        let mut aliases = PathAliasSet::new();
        aliases.insert("Styles", "/static/v1");
        aliases.insert("Styles", "/static/v2");
        assert_eq!(aliases.get("Styles"), Some("/static/v2"));
    }

    #[test]
    fn alias_lookup_is_exact() {
        let aliases: PathAliasSet = [("Scripts", "/js")].into_iter().collect();
        assert_eq!(aliases.get("Scripts"), Some("/js"));
        assert_eq!(aliases.get("scripts"), None);
    }
}
