use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

use crate::catalog::{Catalog, Product};
use crate::scoring::WeightProfile;

/// Where the catalog document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` sources are fetched; anything else is a path.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            DataSource::Url(s.to_string())
        } else {
            DataSource::File(PathBuf::from(s))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => f.write_str(url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Read the raw catalog document
pub async fn fetch_document(source: &DataSource) -> Result<String> {
    match source {
        DataSource::Url(url) => {
            let response = reqwest::get(url)
                .await
                .with_context(|| format!("Failed to fetch catalog from {}", url))?
                .error_for_status()
                .with_context(|| format!("Catalog request to {} failed", url))?;
            response
                .text()
                .await
                .with_context(|| format!("Failed to read catalog body from {}", url))
        }
        DataSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read catalog file at {}", path.display())),
    }
}

/// Parse a catalog document: a JSON array of product records.
///
/// The document itself must be a valid array. Individual records that cannot
/// be read (no id, not an object) are skipped with a warning.
pub fn parse_products(json: &str) -> Result<Vec<Product>> {
    let records: Vec<Value> =
        serde_json::from_str(json).context("Catalog is not a JSON array of records")?;

    let total = records.len();
    let products: Vec<Product> = records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match Product::deserialize(record) {
            Ok(product) => Some(product),
            Err(e) => {
                log::warn!("Skipping catalog record #{}: {}", i, e);
                None
            }
        })
        .collect();

    if products.len() < total {
        log::warn!(
            "{} of {} catalog records could not be read",
            total - products.len(),
            total
        );
    }
    Ok(products)
}

/// Fetch the catalog, parse it and score every product.
///
/// This is the only I/O the application does. Scoring happens only once the
/// document has been read.
pub async fn load_catalog(source: &DataSource, profile: &WeightProfile) -> Result<Catalog> {
    log::info!("Loading catalog from {}", source);
    let document = fetch_document(source).await?;
    let products = parse_products(&document)
        .with_context(|| format!("Invalid catalog document from {}", source))?;
    let catalog = Catalog::new(products, profile);
    log::info!("Loaded {} products", catalog.len());
    Ok(catalog)
}
