//! Cache-busting version suffix applied to generated URLs.

/// Append the `cdv=<version>` cache-busting parameter to a URL.
///
/// A version of `0` means "no suffix" and returns the URL unchanged. The
/// parameter joins with `&` when the URL already carries a query string and
/// with `?` otherwise. The transform is idempotent: a URL whose query
/// already names a `cdv` parameter is returned as-is, so debug-mode paths
/// that were cache-busted during resolution are not stamped twice.
pub fn append_version_query(url: &str, version: u32) -> String {
    if version == 0 || has_version_param(url) {
        return url.to_string();
    }

    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}cdv={version}")
}

fn has_version_param(url: &str) -> bool {
    match url.split_once('?') {
        Some((_, query)) => query.split('&').any(|pair| {
            pair.split_once('=')
                .is_some_and(|(name, _)| name == "cdv")
        }),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_zero_leaves_urls_untouched() {
        assert_eq!(append_version_query("/a.css", 0), "/a.css");
        assert_eq!(append_version_query("/a.css?x=1", 0), "/a.css?x=1");
    }

    #[test]
    fn starts_a_query_string_when_none_exists() {
        assert_eq!(append_version_query("/a.css", 5), "/a.css?cdv=5");
    }

    #[test]
    fn extends_an_existing_query_string() {
        assert_eq!(append_version_query("/a.css?x=1", 5), "/a.css?x=1&cdv=5");
    }

    #[test]
    fn is_idempotent() {
        let once = append_version_query("/a.css", 7);
        let twice = append_version_query(&once, 7);
        assert_eq!(once, twice);
    }

    #[test]
    fn does_not_mistake_other_params_for_the_version() {
        assert_eq!(
            append_version_query("/a.css?acdv=1", 3),
            "/a.css?acdv=1&cdv=3"
        );
    }
}
