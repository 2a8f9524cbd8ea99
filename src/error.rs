//! Error types surfaced by aggregation and by handler-side batch parsing.

use thiserror::Error;

/// Errors raised while aggregating a page's declared dependencies.
///
/// Aggregation is all-or-nothing: any of these aborts the call with no
/// partial URL lists produced.
#[derive(Debug, Error)]
pub enum AggregationError {
    /// A dependency referenced a path alias that is not registered.
    ///
    /// This indicates a misconfigured page and intentionally fails the whole
    /// render rather than silently dropping the asset.
    #[error("path alias `{alias}` referenced by `{file_path}` is not registered")]
    UnknownPathAlias {
        /// The alias name the dependency asked for.
        alias: String,
        /// The raw file path of the offending dependency.
        file_path: String,
    },
}

/// Errors raised while parsing a composite handler query back into a batch.
#[derive(Debug, Error)]
pub enum BatchDecodeError {
    /// The query string carried no `s` parameter.
    #[error("composite query is missing the `s` file-set parameter")]
    MissingFileSet,

    /// The `s` parameter was not valid base64.
    #[error("composite file set is not valid base64")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The decoded file set was not valid UTF-8 text.
    #[error("composite file set decoded to non-text bytes")]
    InvalidText(#[from] std::string::FromUtf8Error),

    /// The query string carried no `t` parameter.
    #[error("composite query is missing the `t` type parameter")]
    MissingTypeTag,

    /// The `t` parameter named a type that cannot be combined.
    #[error("unknown composite type tag `{0}`")]
    UnknownTypeTag(String),

    /// The `cdv` parameter was present but not an integer.
    #[error("invalid `cdv` version value `{0}`")]
    InvalidVersion(String),
}
