#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod aggregate;
pub mod composite;
pub mod config;
pub mod error;
pub mod handler;
pub mod models;
pub mod resolve;
pub mod version;

pub use aggregate::{AggregateOutput, aggregate};
pub use composite::build_composite_url;
pub use config::CompositorConfig;
pub use error::{AggregationError, BatchDecodeError};
pub use models::{Dependency, DependencyType, PathAliasSet, ResolvedDependency};
pub use resolve::{RootRelativeResolver, UrlResolver};
pub use version::append_version_query;
