//! Combining fetched file contents into one composite response body.

use crate::config::CompositorConfig;
use crate::handler::css_urls::rewrite_css_urls;
use crate::models::DependencyType;

/// Collaborator that retrieves the raw text of a resolved request path.
///
/// Implementations typically read from the application's document root or
/// perform an internal sub-request; the combiner only sees the result.
pub trait ContentFetcher {
    /// Fetch the contents served at `path`.
    fn fetch(&self, path: &str) -> anyhow::Result<String>;
}

/// A pure source-to-source minification transform.
pub trait Minifier {
    /// Minify `source`, returning the compacted text.
    fn minify(&self, source: &str) -> String;
}

/// A file that could not be fetched while building a composite response.
#[derive(Debug)]
pub struct SkippedFile {
    /// The request path that failed.
    pub path: String,
    /// Why the fetch failed.
    pub reason: anyhow::Error,
}

/// The combined composite response body plus a record of what went into it.
#[derive(Debug)]
pub struct CombinedFile {
    /// Concatenated (and possibly minified) contents in batch order.
    pub content: String,
    /// Paths that contributed to `content`, in order.
    pub included: Vec<String>,
    /// Paths that were skipped because their contents could not be fetched.
    pub skipped: Vec<SkippedFile>,
}

/// Combines batches of files into single composite response bodies.
///
/// Minifiers are optional collaborators; when absent (or disabled in the
/// configuration) contents pass through verbatim. CSS contents always get
/// their `url()` references rewritten to absolute form first, since the
/// combined stylesheet is served from the handler's path rather than the
/// source file's.
pub struct CompositeProcessor<'a> {
    config: &'a CompositorConfig,
    fetcher: &'a dyn ContentFetcher,
    css_minifier: Option<&'a dyn Minifier>,
    js_minifier: Option<&'a dyn Minifier>,
}

impl<'a> CompositeProcessor<'a> {
    /// Create a processor with no minifiers attached.
    pub fn new(config: &'a CompositorConfig, fetcher: &'a dyn ContentFetcher) -> Self {
        Self {
            config,
            fetcher,
            css_minifier: None,
            js_minifier: None,
        }
    }

    /// Attach a CSS minifier, used when `enable_css_minify` is set.
    pub fn with_css_minifier(mut self, minifier: &'a dyn Minifier) -> Self {
        self.css_minifier = Some(minifier);
        self
    }

    /// Attach a JavaScript minifier, used when `enable_js_minify` is set.
    pub fn with_js_minifier(mut self, minifier: &'a dyn Minifier) -> Self {
        self.js_minifier = Some(minifier);
        self
    }

    /// Combine `paths` in order into one response body.
    ///
    /// A file whose contents cannot be fetched is skipped and recorded
    /// rather than failing the whole composite; a page is better served
    /// missing one asset than none.
    pub fn combine(&self, paths: &[String], dependency_type: DependencyType) -> CombinedFile {
        let mut combined = CombinedFile {
            content: String::new(),
            included: Vec::new(),
            skipped: Vec::new(),
        };

        for path in paths {
            let raw = match self.fetcher.fetch(path) {
                Ok(contents) => contents,
                Err(reason) => {
                    combined.skipped.push(SkippedFile {
                        path: path.clone(),
                        reason,
                    });
                    continue;
                }
            };

            let processed = self.process_contents(&raw, path, dependency_type);
            combined.content.push_str(&processed);
            if !processed.ends_with('\n') {
                combined.content.push('\n');
            }
            combined.included.push(path.clone());
        }

        combined
    }

    fn process_contents(
        &self,
        raw: &str,
        path: &str,
        dependency_type: DependencyType,
    ) -> String {
        match dependency_type {
            DependencyType::Css => {
                let absolute = rewrite_css_urls(raw, path);
                match self.css_minifier {
                    Some(minifier) if self.config.enable_css_minify => {
                        minifier.minify(&absolute)
                    }
                    _ => absolute,
                }
            }
            DependencyType::Javascript => match self.js_minifier {
                Some(minifier) if self.config.enable_js_minify => minifier.minify(raw),
                _ => raw.to_string(),
            },
            DependencyType::Other => raw.to_string(),
        }
    }
}
