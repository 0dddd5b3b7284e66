use crate::{config::ScrapeConfig, extractor::PerkExtractor, requests::RequestClient};

pub struct ScrapingContext {
    pub scrape_config: ScrapeConfig,
    pub perk_extractor: PerkExtractor,
    pub request_client: RequestClient,
}

impl ScrapingContext {
    pub fn new() -> anyhow::Result<Self> {
        let scrape_config = ScrapeConfig::new()?;
        Self::with_config(scrape_config)
    }

    pub fn with_config(scrape_config: ScrapeConfig) -> anyhow::Result<Self> {
        let perk_extractor = PerkExtractor::new()?;
        let request_client = RequestClient::new()?;
        Ok(ScrapingContext {
            scrape_config,
            perk_extractor,
            request_client,
        })
    }
}
