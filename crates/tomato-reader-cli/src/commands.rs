/*
[INPUT]:  Parsed subcommand and ReaderConfig
[OUTPUT]: Pretty JSON describing the command result
[POS]:    Command layer - drives the adapter for each CLI subcommand
[UPDATE]: When adding subcommands or changing output shape
*/

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;
use reqwest::Method;
use serde::Serialize;
use tomato_reader_adapter::{DeviceProfile, OsEntropy};
use tracing::info;

use crate::config::ReaderConfig;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search books by keyword
    Search {
        keyword: String,
        #[arg(long, default_value_t = 20)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Show a book's detail
    Detail { item_id: String },
    /// List a book's chapters
    Catalog { item_id: String },
    /// Fetch chapter text
    Chapter { item_id: String, chapter_id: String },
    /// Print the device profile sent with requests
    Device {
        /// Emulate a random handset instead of the configured one
        #[arg(long)]
        randomize: bool,
    },
    /// Print the decorated form of a request without sending it
    Sign {
        #[arg(value_name = "METHOD")]
        method: String,
        #[arg(value_name = "URL")]
        url: String,
    },
}

#[derive(Debug, Serialize)]
struct SignedRequestView {
    method: String,
    url: String,
    headers: BTreeMap<String, String>,
}

/// Execute `command` and render its result as pretty JSON
pub async fn run(command: Command, config: &ReaderConfig) -> Result<String> {
    match command {
        Command::Search {
            keyword,
            limit,
            offset,
        } => {
            let client = config.build_client()?;
            let result = client
                .search_books(&keyword, limit, offset)
                .await
                .with_context(|| format!("search {keyword:?}"))?;
            info!(total = result.total, returned = result.books.len(), "search complete");
            render(&result)
        }
        Command::Detail { item_id } => {
            let client = config.build_client()?;
            let detail = client
                .book_detail(&item_id)
                .await
                .with_context(|| format!("book detail {item_id}"))?;
            render(&detail)
        }
        Command::Catalog { item_id } => {
            let client = config.build_client()?;
            let catalog = client
                .catalog(&item_id)
                .await
                .with_context(|| format!("catalog {item_id}"))?;
            info!(chapters = catalog.len(), "catalog fetched");
            render(&catalog)
        }
        Command::Chapter {
            item_id,
            chapter_id,
        } => {
            let client = config.build_client()?;
            let content = client
                .chapter_content(&item_id, &chapter_id)
                .await
                .with_context(|| format!("chapter {chapter_id} of {item_id}"))?;
            render(&content)
        }
        Command::Device { randomize } => {
            let identity = config.build_identity(Arc::new(OsEntropy));
            let profile = if randomize {
                DeviceProfile::randomized(
                    &mut rand::thread_rng(),
                    identity.device_id(),
                    identity.android_id(),
                )
            } else {
                identity.descriptors()
            };
            render(&profile)
        }
        Command::Sign { method, url } => {
            let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .with_context(|| format!("invalid method {method:?}"))?;
            let client = config.build_client()?;
            let builder = reqwest::Client::new().request(method, url.as_str());
            let request = client
                .prepare(builder)
                .with_context(|| format!("decorate {url}"))?;

            let headers = request
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.to_string(),
                        value.to_str().unwrap_or_default().to_string(),
                    )
                })
                .collect();
            render(&SignedRequestView {
                method: request.method().to_string(),
                url: request.url().to_string(),
                headers,
            })
        }
    }
}

fn render<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("render json")
}
