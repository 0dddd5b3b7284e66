mod config;
mod document;
mod exporter;
mod extractor;
mod image_resolver;
mod perk;
mod pipeline;
mod requests;
mod scraping_context;
mod skip_reason;
mod text_manipulators;

pub use config::{LoadFromEnv, ScrapeConfig, ScrapingEnv};
pub use document::Document;
pub use exporter::{render_html, write_csv, write_html, write_xlsx};
pub use extractor::{ExtractionContext, PerkExtractor};
pub use image_resolver::{ImageResolver, ResolveStats};
pub use perk::{COLUMNS, PerkRecord, Role};
pub use pipeline::{download_icons, export_all, scrape_perks};
pub use requests::RequestClient;
pub use scraping_context::ScrapingContext;
pub use skip_reason::SkipReason;
