//! Composite URL construction encoding a whole batch of files.

use base64::{Engine as _, engine::general_purpose};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use crate::config::CompositorConfig;
use crate::models::DependencyType;
use crate::version::append_version_query;

/// Separator between file paths inside an encoded batch.
pub(crate) const BATCH_SEPARATOR: char = ';';

/// Build the single handler URL representing an ordered batch of resolved
/// file paths.
///
/// The paths are joined with `;` (a trailing separator is emitted and must
/// be tolerated by the decoder), base64-encoded byte-for-byte, then
/// percent-encoded so the base64 alphabet's `+`, `/` and `=` survive query
/// embedding. The result is `<handler>?s=<batch>&t=<tag>` with the
/// cache-busting suffix applied last.
///
/// Returns `None` for types that do not participate in combination.
pub fn build_composite_url(
    paths: &[String],
    dependency_type: DependencyType,
    config: &CompositorConfig,
) -> Option<String> {
    let tag = dependency_type.query_tag()?;
    let batch = encode_batch(paths);
    let url = format!(
        "{}?s={}&t={}",
        config.composite_handler_path, batch, tag
    );
    Some(append_version_query(&url, config.version))
}

/// Encode an ordered path batch into the `s` query parameter value.
pub fn encode_batch<S: AsRef<str>>(paths: &[S]) -> String {
    let mut joined = String::new();
    for path in paths {
        joined.push_str(path.as_ref());
        joined.push(BATCH_SEPARATOR);
    }

    let encoded = general_purpose::STANDARD.encode(joined.as_bytes());
    utf8_percent_encode(&encoded, NON_ALPHANUMERIC).to_string()
}
