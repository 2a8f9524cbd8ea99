//! Aggregation entry point: partition, order and render dependency URLs.

use crate::composite::build_composite_url;
use crate::config::CompositorConfig;
use crate::error::AggregationError;
use crate::models::{Dependency, DependencyType, PathAliasSet, ResolvedDependency};
use crate::resolve::{UrlResolver, resolve_dependencies};
use crate::version::append_version_query;

/// Ordered URL lists produced by one aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateOutput {
    /// Stylesheet URLs in registration order: the composite URL first (when
    /// combining), then every individual file in priority order.
    pub css_urls: Vec<String>,
    /// Script URLs in registration order, shaped like `css_urls`.
    pub js_urls: Vec<String>,
    /// Resolved URLs of non-combinable dependencies, in declaration order.
    ///
    /// These bypass sorting and batching entirely and are handed to the
    /// registration collaborator as-is.
    pub passthrough_urls: Vec<String>,
}

/// Aggregate a page's declared dependencies into ordered request URLs.
///
/// Resolution happens first and exactly once per dependency; an alias miss
/// aborts the whole call. The CSS and JavaScript subsequences are then
/// stable-sorted by ascending priority, so equal priorities keep their
/// declaration order. Outside debug mode each non-empty subsequence yields
/// one composite URL covering the entire batch, followed by every
/// individual file's cache-busted URL as a registration fallback. Debug
/// mode skips the composite and emits only the individual URLs, which were
/// already cache-busted during resolution.
pub fn aggregate(
    dependencies: &[Dependency],
    aliases: &PathAliasSet,
    resolver: &dyn UrlResolver,
    config: &CompositorConfig,
) -> Result<AggregateOutput, AggregationError> {
    let resolved = resolve_dependencies(dependencies, aliases, resolver, config)?;

    let css = sorted_subsequence(&resolved, DependencyType::Css);
    let js = sorted_subsequence(&resolved, DependencyType::Javascript);

    Ok(AggregateOutput {
        css_urls: render_urls(&css, DependencyType::Css, config),
        js_urls: render_urls(&js, DependencyType::Javascript, config),
        passthrough_urls: resolved
            .iter()
            .filter(|dependency| dependency.dependency_type == DependencyType::Other)
            .map(|dependency| dependency.request_path.clone())
            .collect(),
    })
}

/// Extract one type's subsequence, preserving relative order, then
/// stable-sort it by priority.
fn sorted_subsequence(
    resolved: &[ResolvedDependency],
    dependency_type: DependencyType,
) -> Vec<&ResolvedDependency> {
    let mut subsequence: Vec<&ResolvedDependency> = resolved
        .iter()
        .filter(|dependency| dependency.dependency_type == dependency_type)
        .collect();
    subsequence.sort_by_key(|dependency| dependency.priority);
    subsequence
}

fn render_urls(
    subsequence: &[&ResolvedDependency],
    dependency_type: DependencyType,
    config: &CompositorConfig,
) -> Vec<String> {
    if subsequence.is_empty() {
        return Vec::new();
    }

    let mut urls = Vec::with_capacity(subsequence.len() + 1);

    if !config.is_debug_mode {
        let paths: Vec<String> = subsequence
            .iter()
            .map(|dependency| dependency.request_path.clone())
            .collect();
        if let Some(composite) = build_composite_url(&paths, dependency_type, config) {
            urls.push(composite);
        }
    }

    for dependency in subsequence {
        urls.push(append_version_query(&dependency.request_path, config.version));
    }

    urls
}
