//! Handler-side half of the composite contract.
//!
//! The aggregation core only emits composite URLs; these modules implement
//! what the companion HTTP handler needs to act on one: parsing the query
//! back into an ordered batch and combining the fetched contents into a
//! single response body.

mod batch;
mod combine;
mod css_urls;

pub use batch::{CompositeRequest, decode_batch, parse_composite_query};
pub use combine::{CombinedFile, CompositeProcessor, ContentFetcher, Minifier, SkippedFile};
pub use css_urls::rewrite_css_urls;
