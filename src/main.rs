use log::{LevelFilter, error, info, warn};
use perkscrape::{ScrapingContext, download_icons, export_all, scrape_perks};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let context = ScrapingContext::new()?;
    info!("Scraping Overwatch perks data...");
    let mut perks = match scrape_perks(&context).await {
        Ok(perks) => perks,
        Err(e) => {
            error!("Failed to retrieve the page: {e:#}");
            return Err(e);
        }
    };
    if perks.is_empty() {
        warn!("Failed to scrape perks data, nothing to export");
        return Ok(());
    }
    info!("Successfully scraped {} perks!", perks.len());

    if context.scrape_config.skip_images {
        info!("Skipping icon downloads");
    } else {
        info!("Downloading perk icons...");
        download_icons(&context, &mut perks).await?;
    }

    export_all(&context.scrape_config, &perks)?;
    Ok(())
}
