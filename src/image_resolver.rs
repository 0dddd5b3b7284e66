use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use log::{info, warn};
use regex::Regex;
use tokio::{fs, io::AsyncWriteExt};

use crate::{
    config::{HERO_ICON_DIR, PERK_ICON_DIR},
    perk::PerkRecord,
    requests::RequestClient,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolveStats {
    pub downloaded: usize,
    pub cached: usize,
    pub failed: usize,
}

/// Downloads perk and hero icons under an output directory. A file that is
/// already on disk is never fetched again.
pub struct ImageResolver<'a> {
    request_client: &'a RequestClient,
    output_dir: PathBuf,
    // Anything that is not a word character, dot or dash.
    invalid_file_chars: Regex,
}

impl<'a> ImageResolver<'a> {
    pub fn new(request_client: &'a RequestClient, output_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let invalid_file_chars = Regex::new(r"[^\w.-]")?;
        Ok(Self {
            request_client,
            output_dir: output_dir.into(),
            invalid_file_chars,
        })
    }

    pub fn perk_icon_file_name(&self, hero: &str, perk: &str) -> String {
        self.clean_file_name(&format!("{}_{}.png", name_part(hero), name_part(perk)))
    }

    pub fn hero_icon_file_name(&self, hero: &str) -> String {
        self.clean_file_name(&format!("{}.png", name_part(hero)))
    }

    fn clean_file_name(&self, file_name: &str) -> String {
        self.invalid_file_chars.replace_all(file_name, "_").into_owned()
    }

    /// Fills in the local icon paths of every perk, downloading what is missing.
    /// Individual download failures leave an empty path; only failing to create
    /// the icon directories is an error.
    pub async fn resolve(&self, perks: &mut [PerkRecord]) -> anyhow::Result<ResolveStats> {
        for dir in [PERK_ICON_DIR, HERO_ICON_DIR] {
            let dir = self.output_dir.join(dir);
            fs::create_dir_all(&dir)
                .await
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }

        let mut stats = ResolveStats::default();
        let mut seen_heroes = HashSet::new();
        for perk in perks.iter_mut() {
            perk.local_icon_path = if perk.icon_url.is_empty() {
                String::new()
            } else {
                let file_name = self.perk_icon_file_name(&perk.hero, &perk.name);
                self.store(&perk.icon_url, PERK_ICON_DIR, &file_name, &mut stats).await
            };

            let hero_file_name = self.hero_icon_file_name(&perk.hero);
            if !perk.hero_icon_url.is_empty() && seen_heroes.insert(perk.hero.clone()) {
                self.store(&perk.hero_icon_url, HERO_ICON_DIR, &hero_file_name, &mut stats)
                    .await;
            }
            let hero_path = relative_path(HERO_ICON_DIR, &hero_file_name);
            perk.local_hero_icon_path = if self.exists(&hero_path).await {
                hero_path
            } else {
                String::new()
            };
        }

        info!(
            "Icons: {} downloaded, {} already cached, {} failed",
            stats.downloaded, stats.cached, stats.failed
        );
        Ok(stats)
    }

    /// Returns the path relative to the output dir, or "" when the icon could not be stored.
    async fn store(&self, url: &str, dir: &str, file_name: &str, stats: &mut ResolveStats) -> String {
        let path = relative_path(dir, file_name);
        if self.exists(&path).await {
            info!("Icon already exists: {path}");
            stats.cached += 1;
            return path;
        }

        info!("Downloading icon: {url} as {path}");
        match self.download(url, &self.output_dir.join(&path)).await {
            Ok(()) => {
                stats.downloaded += 1;
                path
            }
            Err(e) => {
                warn!("Failed to download {url}: {e:#}");
                stats.failed += 1;
                String::new()
            }
        }
    }

    async fn exists(&self, path: &str) -> bool {
        fs::try_exists(self.output_dir.join(path)).await.unwrap_or(false)
    }

    async fn download(&self, url: &str, destination: &Path) -> anyhow::Result<()> {
        let mut response = self.request_client.fetch_url_response(url).await?;
        let status = response.status();
        if !status.is_success() {
            bail!("status code {status}");
        }

        let mut file = fs::File::create(destination)
            .await
            .with_context(|| format!("failed to create {}", destination.display()))?;
        let written = async {
            while let Some(chunk) = response.chunk().await? {
                file.write_all(&chunk).await?;
            }
            file.flush().await?;
            anyhow::Ok(())
        }
        .await;

        if written.is_err() {
            // Don't leave a truncated file behind for the existence check to trust.
            drop(file);
            let _ = fs::remove_file(destination).await;
        }
        written
    }
}

fn name_part(name: &str) -> String {
    name.replace(' ', "_").replace('.', "")
}

fn relative_path(dir: &str, file_name: &str) -> String {
    format!("{dir}/{file_name}")
}
