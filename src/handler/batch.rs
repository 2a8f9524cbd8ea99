//! Decoding composite handler queries back into ordered file batches.

use base64::{Engine as _, engine::general_purpose};
use percent_encoding::percent_decode_str;

use crate::composite::BATCH_SEPARATOR;
use crate::error::BatchDecodeError;
use crate::models::DependencyType;

/// A composite handler request parsed from its query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeRequest {
    /// Resolved file paths in combination order.
    pub paths: Vec<String>,
    /// Which asset kind the batch combines into.
    pub dependency_type: DependencyType,
    /// Cache-busting version carried on the URL, `0` when absent.
    pub version: u32,
}

/// Decode the `s` query parameter value back into the ordered path list.
///
/// Reverses [`crate::composite::encode_batch`]: percent-decode, base64
/// decode, split on `;`. Empty segments (notably the trailing one the
/// encoder always emits) are dropped.
pub fn decode_batch(encoded: &str) -> Result<Vec<String>, BatchDecodeError> {
    let unescaped = percent_decode_str(encoded).decode_utf8_lossy();
    let bytes = general_purpose::STANDARD.decode(unescaped.as_bytes())?;
    let joined = String::from_utf8(bytes)?;

    Ok(joined
        .split(BATCH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect())
}

/// Parse a raw composite handler query string (no leading `?`) into a
/// [`CompositeRequest`].
pub fn parse_composite_query(query: &str) -> Result<CompositeRequest, BatchDecodeError> {
    let mut file_set = None;
    let mut type_tag = None;
    let mut version = 0u32;

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        match name {
            "s" => file_set = Some(value),
            "t" => type_tag = Some(value),
            "cdv" => {
                version = value
                    .parse()
                    .map_err(|_| BatchDecodeError::InvalidVersion(value.to_string()))?;
            }
            _ => {}
        }
    }

    let file_set = file_set.ok_or(BatchDecodeError::MissingFileSet)?;
    let tag = type_tag.ok_or(BatchDecodeError::MissingTypeTag)?;
    let dependency_type = DependencyType::from_query_tag(tag)
        .ok_or_else(|| BatchDecodeError::UnknownTypeTag(tag.to_string()))?;

    Ok(CompositeRequest {
        paths: decode_batch(file_set)?,
        dependency_type,
        version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;

    use crate::composite::{build_composite_url, encode_batch};
    use crate::config::CompositorConfig;

    #[test]
    fn decode_reverses_encode() {
        let paths = vec!["/a.css".to_string(), "/static/b.css".to_string()];
        let decoded = decode_batch(&encode_batch(&paths)).unwrap();
        assert_eq!(decoded, paths);
    }

    #[test]
    fn tolerates_trailing_and_doubled_separators() {
        // base64("a.css;;b.css;")
        let raw = general_purpose::STANDARD.encode("a.css;;b.css;");
        let decoded = decode_batch(&raw).unwrap();
        assert_eq!(decoded, vec!["a.css".to_string(), "b.css".to_string()]);
    }

    #[test]
    fn rejects_garbled_batches() {
        assert!(matches!(
            decode_batch("!!not-base64!!"),
            Err(BatchDecodeError::InvalidBase64(_))
        ));
    }

    #[test]
    fn parses_a_generated_composite_url_end_to_end() {
        let config = CompositorConfig {
            version: 7,
            ..CompositorConfig::default()
        };
        let paths = vec!["/a.js".to_string(), "/b.js".to_string()];
        let url = build_composite_url(&paths, DependencyType::Javascript, &config).unwrap();
        let query = url.split_once('?').unwrap().1;

        let request = parse_composite_query(query).unwrap();
        assert_eq!(request, CompositeRequest {
            paths,
            dependency_type: DependencyType::Javascript,
            version: 7,
        });
    }

    #[test]
    fn missing_parameters_are_reported() {
        assert!(matches!(
            parse_composite_query("t=Css"),
            Err(BatchDecodeError::MissingFileSet)
        ));
        assert!(matches!(
            parse_composite_query("s="),
            Err(BatchDecodeError::MissingTypeTag)
        ));
    }

    #[test]
    fn unknown_type_tags_are_rejected() {
        let query = format!("s={}&t=Flash", encode_batch(&["a.swf"]));
        assert!(matches!(
            parse_composite_query(&query),
            Err(BatchDecodeError::UnknownTypeTag(tag)) if tag == "Flash"
        ));
    }

    #[test]
    fn bad_version_values_are_rejected() {
        let query = format!("s={}&t=Css&cdv=abc", encode_batch(&["a.css"]));
        assert!(matches!(
            parse_composite_query(&query),
            Err(BatchDecodeError::InvalidVersion(value)) if value == "abc"
        ));
    }

    #[test]
    fn empty_file_set_decodes_to_an_empty_batch() {
        let request = parse_composite_query("s=&t=Css").unwrap();
        assert!(request.paths.is_empty());
        assert_eq!(request.version, 0);
    }
}
