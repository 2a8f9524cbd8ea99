//! Path resolution turning declared file paths into request paths.

use crate::config::CompositorConfig;
use crate::error::AggregationError;
use crate::models::{Dependency, PathAliasSet, ResolvedDependency};
use crate::version::append_version_query;

/// Resolver for dependencies that do not name a path alias.
///
/// Implementations expand whatever app-relative markers the hosting
/// environment understands into server-root-relative request paths. The
/// compositor treats this as an opaque string transform.
pub trait UrlResolver {
    /// Resolve a raw declared path into the path used in generated markup.
    fn resolve_url(&self, raw_path: &str) -> String;
}

/// Default resolver expanding a leading `~/` marker against an application
/// root mounted below the server root.
#[derive(Debug, Clone)]
pub struct RootRelativeResolver {
    app_root: String,
}

impl RootRelativeResolver {
    /// Create a resolver for an application mounted at `app_root`.
    pub fn new(app_root: impl Into<String>) -> Self {
        Self {
            app_root: app_root.into(),
        }
    }
}

impl Default for RootRelativeResolver {
    fn default() -> Self {
        Self::new("/")
    }
}

impl UrlResolver for RootRelativeResolver {
    fn resolve_url(&self, raw_path: &str) -> String {
        match raw_path.strip_prefix("~/") {
            Some(relative) => {
                format!("{}{relative}", ensure_trailing_slash(&self.app_root))
            }
            None => raw_path.to_string(),
        }
    }
}

/// Resolve every dependency exactly once, in declaration order.
///
/// Dependencies naming a path alias are prefixed with the alias base path;
/// all others go through `resolver`. In debug mode the cache-busting suffix
/// is applied here so even un-batched files carry the version marker. An
/// alias miss aborts the whole call with no partial results.
pub fn resolve_dependencies(
    dependencies: &[Dependency],
    aliases: &PathAliasSet,
    resolver: &dyn UrlResolver,
    config: &CompositorConfig,
) -> Result<Vec<ResolvedDependency>, AggregationError> {
    dependencies
        .iter()
        .map(|dependency| resolve_one(dependency, aliases, resolver, config))
        .collect()
}

fn resolve_one(
    dependency: &Dependency,
    aliases: &PathAliasSet,
    resolver: &dyn UrlResolver,
    config: &CompositorConfig,
) -> Result<ResolvedDependency, AggregationError> {
    let resolved = match alias_name(dependency) {
        Some(alias) => {
            let base = aliases.get(alias).ok_or_else(|| {
                AggregationError::UnknownPathAlias {
                    alias: alias.to_string(),
                    file_path: dependency.file_path.clone(),
                }
            })?;
            format!("{}{}", ensure_trailing_slash(base), dependency.file_path)
        }
        None => resolver.resolve_url(&dependency.file_path),
    };

    let request_path = if config.is_debug_mode {
        append_version_query(&resolved, config.version)
    } else {
        resolved
    };

    Ok(ResolvedDependency {
        request_path,
        dependency_type: dependency.dependency_type,
        priority: dependency.priority,
    })
}

/// An empty alias string means "no alias", matching how declaration markup
/// omits the attribute.
fn alias_name(dependency: &Dependency) -> Option<&str> {
    dependency
        .path_name_alias
        .as_deref()
        .filter(|name| !name.is_empty())
}

fn ensure_trailing_slash(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DependencyType;

    fn config() -> CompositorConfig {
        CompositorConfig::default()
    }

    #[test]
    fn alias_base_paths_gain_exactly_one_trailing_slash() {
        let aliases: PathAliasSet = [("Static", "/static")].into_iter().collect();
        let deps = vec![
            Dependency::new("a.js", DependencyType::Javascript, 1).with_alias("Static"),
        ];

        let resolved =
            resolve_dependencies(&deps, &aliases, &RootRelativeResolver::default(), &config())
                .unwrap();
        assert_eq!(resolved[0].request_path, "/static/a.js");

        let aliases: PathAliasSet = [("Static", "/static/")].into_iter().collect();
        let resolved =
            resolve_dependencies(&deps, &aliases, &RootRelativeResolver::default(), &config())
                .unwrap();
        assert_eq!(resolved[0].request_path, "/static/a.js");
    }

    #[test]
    fn missing_alias_is_a_configuration_error() {
        let deps = vec![
            Dependency::new("a.js", DependencyType::Javascript, 1).with_alias("missing"),
        ];

        let err = resolve_dependencies(
            &deps,
            &PathAliasSet::new(),
            &RootRelativeResolver::default(),
            &config(),
        )
        .unwrap_err();

        let AggregationError::UnknownPathAlias { alias, file_path } = err;
        assert_eq!(alias, "missing");
        assert_eq!(file_path, "a.js");
    }

    #[test]
    fn empty_alias_means_default_resolution() {
        let deps = vec![
            Dependency::new("~/scripts/a.js", DependencyType::Javascript, 1).with_alias(""),
        ];

        let resolved = resolve_dependencies(
            &deps,
            &PathAliasSet::new(),
            &RootRelativeResolver::new("/app"),
            &config(),
        )
        .unwrap();
        assert_eq!(resolved[0].request_path, "/app/scripts/a.js");
    }

    #[test]
    fn app_relative_markers_expand_against_the_app_root() {
        let resolver = RootRelativeResolver::new("/portal/");
        assert_eq!(resolver.resolve_url("~/css/site.css"), "/portal/css/site.css");
        assert_eq!(resolver.resolve_url("/already/rooted.css"), "/already/rooted.css");
        assert_eq!(resolver.resolve_url("relative.css"), "relative.css");
    }

    #[test]
    fn debug_mode_cache_busts_during_resolution() {
        let mut config = config();
        config.is_debug_mode = true;
        config.version = 9;

        let deps = vec![Dependency::new("/a.css", DependencyType::Css, 1)];
        let resolved = resolve_dependencies(
            &deps,
            &PathAliasSet::new(),
            &RootRelativeResolver::default(),
            &config,
        )
        .unwrap();
        assert_eq!(resolved[0].request_path, "/a.css?cdv=9");
    }

    #[test]
    fn declaration_order_is_preserved() {
        let deps = vec![
            Dependency::new("/b.css", DependencyType::Css, 2),
            Dependency::new("/a.css", DependencyType::Css, 1),
        ];
        let resolved = resolve_dependencies(
            &deps,
            &PathAliasSet::new(),
            &RootRelativeResolver::default(),
            &config(),
        )
        .unwrap();

        assert_eq!(resolved[0].request_path, "/b.css");
        assert_eq!(resolved[1].request_path, "/a.css");
    }
}
