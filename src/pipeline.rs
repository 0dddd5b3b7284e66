use anyhow::Context;
use log::info;

use crate::{
    config::ScrapeConfig,
    document::Document,
    exporter::{write_csv, write_html, write_xlsx},
    image_resolver::{ImageResolver, ResolveStats},
    perk::{PerkRecord, Role},
    scraping_context::ScrapingContext,
};

/// Fetches the source page and extracts every role's perks. Only the fetch can fail.
pub async fn scrape_perks(context: &ScrapingContext) -> anyhow::Result<Vec<PerkRecord>> {
    let url = &context.scrape_config.source_url;
    info!("Fetching {url}");
    let html = context.request_client.fetch_url_body(url).await?;
    let document = Document::parse(&html);
    Ok(context.perk_extractor.extract(&document, &Role::ALL))
}

pub async fn download_icons(
    context: &ScrapingContext,
    perks: &mut [PerkRecord],
) -> anyhow::Result<ResolveStats> {
    let resolver = ImageResolver::new(&context.request_client, context.scrape_config.output_dir())?;
    resolver.resolve(perks).await
}

pub fn export_all(scrape_config: &ScrapeConfig, perks: &[PerkRecord]) -> anyhow::Result<()> {
    let output_dir = scrape_config.output_dir();
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    write_csv(perks, &scrape_config.csv_path())?;
    write_xlsx(perks, &scrape_config.xlsx_path())?;
    write_html(perks, &scrape_config.html_path())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn wiki_page(image_host: &str) -> String {
        format!(
            r#"<html><body>
            <h2><span class="mw-headline" id="Perks">Perks</span></h2>
            <h3><span class="mw-headline" id="Support">Support</span></h3>
            <table class="wikitable">
                <tr><th>Hero</th><th>Perk</th><th>Type</th><th>Description</th></tr>
                <tr>
                    <td rowspan="2"><img data-src="{image_host}/ana.png"><b><a href="/wiki/Ana">Ana</a></b></td>
                    <td><img src="{image_host}/grenade.png"><a title="Ana#Biotic_Grenade">Biotic Grenade</a></td>
                    <td>Major Perk</td>
                    <td>Heals more.</td>
                </tr>
                <tr>
                    <td>Nano Boost Cooldown</td>
                    <td>Minor Perk</td>
                    <td>Shorter cooldown.</td>
                </tr>
            </table>
            </body></html>"#
        )
    }

    #[tokio::test]
    async fn scrapes_downloads_and_exports() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wiki/Perks"))
            .respond_with(ResponseTemplate::new(200).set_body_string(wiki_page(&server.uri())))
            .expect(1)
            .mount(&server)
            .await;
        for image in ["/ana.png", "/grenade.png"] {
            Mock::given(method("GET"))
                .and(path(image))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png".to_vec()))
                .expect(1)
                .mount(&server)
                .await;
        }

        let output = tempfile::tempdir().unwrap();
        let config = ScrapeConfig::with_output_dir(format!("{}/wiki/Perks", server.uri()), output.path());
        let context = ScrapingContext::with_config(config).unwrap();

        let mut perks = scrape_perks(&context).await.unwrap();
        assert_eq!(perks.len(), 2);
        assert!(perks.iter().all(|perk| perk.hero == "Ana"));

        let stats = download_icons(&context, &mut perks).await.unwrap();
        assert_eq!(stats.downloaded, 2);
        assert_eq!(perks[0].local_icon_path, "perk_icons/Ana_Biotic_Grenade.png");
        assert_eq!(perks[1].local_icon_path, "");
        assert_eq!(perks[1].local_hero_icon_path, "hero_icons/Ana.png");

        export_all(&context.scrape_config, &perks).unwrap();
        let csv = std::fs::read_to_string(context.scrape_config.csv_path()).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(context.scrape_config.xlsx_path().exists());
        let html = std::fs::read_to_string(context.scrape_config.html_path()).unwrap();
        assert!(html.contains("Nano Boost Cooldown"));
    }

    #[tokio::test]
    async fn failed_fetch_aborts_the_run() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let output = tempfile::tempdir().unwrap();
        let config = ScrapeConfig::with_output_dir(format!("{}/wiki/Perks", server.uri()), output.path());
        let context = ScrapingContext::with_config(config).unwrap();
        assert!(scrape_perks(&context).await.is_err());
    }
}
