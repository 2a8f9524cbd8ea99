//! Command-line helper for building and inspecting composite asset URLs.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use asset_compositor::handler::parse_composite_query;
use asset_compositor::{CompositorConfig, DependencyType, build_composite_url};

#[derive(Parser)]
#[command(name = "asset-compositor", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode resolved file paths into a composite handler URL.
    Encode {
        /// Asset type of the batch.
        #[arg(long = "type", value_enum)]
        asset_type: AssetType,
        /// Base path of the composite handler.
        #[arg(long, default_value = "/combine.axd")]
        handler_path: String,
        /// Cache-busting version; 0 omits the suffix.
        #[arg(long, default_value_t = 0)]
        version: u32,
        /// Resolved file paths, in combination order.
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Decode a composite URL (or query string) back into its file list.
    Decode {
        /// A full composite URL or its query string.
        input: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AssetType {
    Css,
    Js,
}

impl From<AssetType> for DependencyType {
    fn from(value: AssetType) -> Self {
        match value {
            AssetType::Css => DependencyType::Css,
            AssetType::Js => DependencyType::Javascript,
        }
    }
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Command::Encode {
            asset_type,
            handler_path,
            version,
            paths,
        } => {
            let config = CompositorConfig {
                version,
                composite_handler_path: handler_path,
                ..CompositorConfig::default()
            };
            let url = build_composite_url(&paths, asset_type.into(), &config)
                .context("asset type cannot be combined")?;
            println!("{url}");
        }
        Command::Decode { input } => {
            let query = query_portion(&input)?;
            let request = parse_composite_query(query)
                .with_context(|| format!("failed to decode `{input}`"))?;

            println!("type: {:?}", request.dependency_type);
            println!("version: {}", request.version);
            for path in &request.paths {
                println!("{path}");
            }
        }
    }

    Ok(())
}

/// Accept either a full URL or a bare query string.
fn query_portion(input: &str) -> Result<&str> {
    if let Some((_, query)) = input.split_once('?') {
        return Ok(query);
    }
    if input.contains("s=") {
        return Ok(input);
    }
    bail!("`{input}` does not look like a composite URL or query string");
}
