//! Rewriting `url()` references in combined CSS to absolute form.
//!
//! Once stylesheets are served from the composite handler's path their
//! relative image and font references no longer resolve, so the combiner
//! rewrites them against each source file's own request path before
//! concatenation.

use regex::{Captures, Regex};

fn css_url_pattern() -> &'static Regex {
    use std::sync::OnceLock;

    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)url\(\s*(['"]?)([^'")]+)('|"|)\s*\)"#).expect("invalid css url regex")
    })
}

/// Rewrite relative `url(...)` references in `content` to root-absolute
/// paths resolved against `css_path`, the stylesheet's own request path.
///
/// Absolute (`/…`), protocol-relative, `http(s)://`, `data:` and fragment
/// references are left untouched. `./` and `../` segments are collapsed,
/// with `../` never escaping past the server root.
pub fn rewrite_css_urls(content: &str, css_path: &str) -> String {
    let base_dir = parent_dir(strip_query(css_path));

    css_url_pattern()
        .replace_all(content, |captures: &Captures<'_>| {
            let quote = &captures[1];
            let reference = captures[2].trim();

            if is_external_reference(reference) {
                return captures[0].to_string();
            }

            let absolute = join_and_normalize(base_dir, reference);
            format!("url({quote}{absolute}{quote})")
        })
        .into_owned()
}

fn is_external_reference(reference: &str) -> bool {
    reference.starts_with('/')
        || reference.starts_with('#')
        || reference.starts_with("data:")
        || reference
            .split_once(':')
            .is_some_and(|(scheme, _)| scheme.chars().all(|c| c.is_ascii_alphabetic()))
}

fn strip_query(path: &str) -> &str {
    match path.split_once('?') {
        Some((path, _)) => path,
        None => path,
    }
}

fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[..index],
        None => "",
    }
}

fn join_and_normalize(base_dir: &str, reference: &str) -> String {
    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();

    for segment in reference.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    format!("/{}", segments.join("/"))
}
