use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};

pub const DEFAULT_SOURCE_URL: &str = "https://overwatch.fandom.com/wiki/Perks";
pub const ENV_PREFIX: &str = "PERKS_";

pub const PERK_ICON_DIR: &str = "perk_icons";
pub const HERO_ICON_DIR: &str = "hero_icons";
const CSV_FILE: &str = "overwatch_perks.csv";
const XLSX_FILE: &str = "overwatch_perks.xlsx";
const HTML_FILE: &str = "index.html";

/// The `PERKS_*` env vars, all optional.
#[derive(Debug, Deserialize)]
pub struct ScrapingEnv {
    #[serde(default = "default_source_url")]
    source_url: String,
    #[serde(default = "default_output_dir")]
    output_dir: PathBuf,
    #[serde(default)]
    skip_images: bool,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub source_url: String,
    pub output_dir: PathBuf,
    pub skip_images: bool,
}

impl ScrapeConfig {
    pub fn new() -> anyhow::Result<Self> {
        let scraping_env = ScrapingEnv::load_from_env(ENV_PREFIX)?;
        Ok(Self::from(scraping_env))
    }

    pub fn with_output_dir(source_url: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_url: source_url.into(),
            output_dir: output_dir.into(),
            skip_images: false,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(CSV_FILE)
    }

    pub fn xlsx_path(&self) -> PathBuf {
        self.output_dir.join(XLSX_FILE)
    }

    pub fn html_path(&self) -> PathBuf {
        self.output_dir.join(HTML_FILE)
    }
}

impl From<ScrapingEnv> for ScrapeConfig {
    fn from(scraping_env: ScrapingEnv) -> Self {
        Self {
            source_url: scraping_env.source_url,
            output_dir: scraping_env.output_dir,
            skip_images: scraping_env.skip_images,
        }
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env(prefix: &str) -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config = envy::prefixed(prefix)
            .from_env::<Self>()
            .context("failed to load env variables into config struct")?;
        Ok(config)
    }

    fn load_from_vars<I>(prefix: &str, vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::prefixed(prefix)
            .from_iter::<_, Self>(vars)
            .context("failed to load variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
