//! Fixture loading - the JSON data directory behind a run
//!
//! A data directory holds four files, mirroring what an upstream scraper
//! would produce: `rfps.json` (candidate tenders), `products.json` (the
//! catalog), `pricing.json` and `test_requirements.json` (pricing
//! configuration). Loading is the only file I/O in the crate; the core
//! stages work on the loaded values.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::config::{RawPricingFile, RawTestRequirementsFile};
use crate::entities::product::Product;
use crate::entities::rfp::Rfp;

/// Errors while loading a data directory
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// `rfps.json` wrapper object
#[derive(Debug, Deserialize)]
struct RfpFile {
    #[serde(default)]
    sample_rfps: Vec<Rfp>,
}

/// `products.json` wrapper object
#[derive(Debug, Deserialize)]
struct ProductFile {
    #[serde(default)]
    products: Vec<Product>,
}

/// Everything a run needs, loaded once and read-only thereafter
#[derive(Debug)]
pub struct Dataset {
    pub rfps: Vec<Rfp>,
    pub products: Vec<Product>,
    pub pricing: RawPricingFile,
    pub test_requirements: RawTestRequirementsFile,
}

impl Dataset {
    /// Load all four fixture files from a directory
    pub fn load(dir: &Path) -> Result<Self, DatasetError> {
        let rfp_file: RfpFile = load_json(&dir.join("rfps.json"))?;
        let product_file: ProductFile = load_json(&dir.join("products.json"))?;
        let pricing: RawPricingFile = load_json(&dir.join("pricing.json"))?;
        let test_requirements: RawTestRequirementsFile =
            load_json(&dir.join("test_requirements.json"))?;

        Ok(Dataset {
            rfps: rfp_file.sample_rfps,
            products: product_file.products,
            pricing,
            test_requirements,
        })
    }

    /// Find an RFP by exact id
    pub fn rfp(&self, rfp_id: &str) -> Option<&Rfp> {
        self.rfps.iter().find(|r| r.rfp_id == rfp_id)
    }

    /// Find a product by exact SKU
    pub fn product(&self, sku: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.sku == sku)
    }
}

/// Read and parse one JSON file, naming the path in any error
fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
