// src/config.rs

use clap::Parser;
use color_eyre::eyre::{bail, Result, WrapErr};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Parser, Debug)]
#[command(name = "phishscope")]
#[command(about = "Terminal client for the PhishScope email threat analysis service", long_about = None)]
pub struct Args {
    /// Base URL of the analysis service
    #[arg(long, env = "PHISHSCOPE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

impl Args {
    pub fn service_url(&self) -> Result<Url> {
        parse_service_url(&self.base_url)
    }
}

/// Parses the service base URL, accepting only http and https.
pub fn parse_service_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).wrap_err_with(|| format!("invalid service URL: {raw}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("service URL must use http or https, got {}", url.scheme());
    }
    Ok(url)
}
