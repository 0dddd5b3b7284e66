use std::collections::HashMap;

use log::{debug, info, warn};
use scraper::{ElementRef, Selector};

use crate::{
    document::{attribute, find_first, parse_selector, Document},
    perk::{PerkRecord, Role},
    skip_reason::SkipReason,
    text_manipulators::{collapse_whitespace, extract_trimmed_text, last_text_child},
};

/// Lazy-loaded images carry this inline gif until the page's script swaps in the real source.
pub const PLACEHOLDER_MARKER: &str = "data:image/gif";

const IMAGE_BASE_URL: &str = "https://static.wikia.nocookie.net/overwatch_gamepedia/images";

const MIN_ROW_CELLS: usize = 3;
// Rows this wide carry their own hero cell; narrower rows sit under a rowspan.
const HERO_ROW_CELLS: usize = 4;

struct Selectors {
    table: Selector,
    row: Selector,
    cell: Selector,
    bold: Selector,
    link: Selector,
    titled_link: Selector,
    image: Selector,
}

impl Selectors {
    fn new() -> anyhow::Result<Self> {
        Ok(Self {
            table: parse_selector("table.wikitable")?,
            row: parse_selector("tr")?,
            cell: parse_selector("td, th")?,
            bold: parse_selector("b")?,
            link: parse_selector("a")?,
            titled_link: parse_selector("a[title]")?,
            image: parse_selector("img")?,
        })
    }
}

/// Memory carried from row to row. The icon cache lives for the whole run,
/// the current hero only for one section.
#[derive(Debug, Default)]
pub struct ExtractionContext {
    hero_icons: HashMap<String, String>,
    current_hero: Option<String>,
}

impl ExtractionContext {
    pub fn hero_icon(&self, hero: &str) -> Option<&str> {
        self.hero_icons.get(hero).map(String::as_str)
    }

    fn start_section(&mut self) {
        self.current_hero = None;
    }
}

pub struct PerkExtractor {
    selectors: Selectors,
}

impl PerkExtractor {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            selectors: Selectors::new()?,
        })
    }

    /// Extracts every role's perks in `roles` order. Missing sections, missing
    /// tables and bad rows only shorten the result.
    pub fn extract(&self, document: &Document, roles: &[Role]) -> Vec<PerkRecord> {
        let mut context = ExtractionContext::default();
        let mut perks = Vec::new();
        for &role in roles {
            perks.extend(self.extract_section(document, role, &mut context));
        }
        perks
    }

    pub fn extract_section(
        &self,
        document: &Document,
        role: Role,
        context: &mut ExtractionContext,
    ) -> Vec<PerkRecord> {
        let Some(anchor) = document.find_by_id(role.section_id()) else {
            warn!("Could not find section for {role}");
            return vec![];
        };
        let heading = anchor.parent().and_then(ElementRef::wrap).unwrap_or(anchor);
        let Some(table) = document.find_first_matching_after(heading, &self.selectors.table)
        else {
            warn!("Could not find table for {role}");
            return vec![];
        };

        context.start_section();
        let mut perks = vec![];
        // The first row is the header.
        for (index, row) in table.select(&self.selectors.row).enumerate().skip(1) {
            let cells: Vec<_> = row.select(&self.selectors.cell).collect();
            match self.extract_row(role, &cells, context) {
                Ok(perk) => {
                    debug!("{role} row {index}: {} / {}", perk.hero, perk.name);
                    perks.push(perk);
                }
                Err(SkipReason::TooFewCells(count)) => {
                    debug!("Skipping {role} row {index} with {count} cells");
                }
                Err(reason) => warn!("Skipping {role} row {index}: {reason}"),
            }
        }
        info!("Extracted {} perks for {role}", perks.len());
        perks
    }

    /// Turns one row's cells into a perk, updating the hero context when the
    /// row carries a hero cell.
    pub fn extract_row(
        &self,
        role: Role,
        cells: &[ElementRef],
        context: &mut ExtractionContext,
    ) -> Result<PerkRecord, SkipReason> {
        if cells.len() < MIN_ROW_CELLS {
            return Err(SkipReason::TooFewCells(cells.len()));
        }
        if cells.len() > HERO_ROW_CELLS {
            warn!(
                "Unexpected {role} row shape: {} cells, reading it as a hero row",
                cells.len()
            );
        }

        let has_hero_cell = cells.len() >= HERO_ROW_CELLS;
        if has_hero_cell {
            self.read_hero_cell(cells[0], context)?;
        }
        let hero = context.current_hero.clone().ok_or(SkipReason::MissingHero)?;

        let name_index = if has_hero_cell { 1 } else { 0 };
        let tier_index = name_index + 1;
        let description_index = tier_index + 1;

        // In bounds: three cells minimum, and the offsets only shift on hero-width rows.
        let name_cell = cells[name_index];
        let tier = extract_trimmed_text(cells[tier_index]);
        let description = extract_trimmed_text(cells[description_index]);

        let name = self.resolve_perk_name(name_cell);
        let icon_url = find_first(name_cell, &self.selectors.image)
            .map(resolve_icon_url)
            .unwrap_or_default();
        let hero_icon_url = context.hero_icon(&hero).unwrap_or_default().to_string();

        Ok(PerkRecord {
            role,
            hero,
            tier,
            name,
            description,
            icon_url,
            hero_icon_url,
            local_icon_path: String::new(),
            local_hero_icon_path: String::new(),
        })
    }

    /// A hero-width row must name its hero. When it doesn't, the current hero
    /// is cleared so the rows under its rowspan are not credited to the
    /// previous hero either.
    fn read_hero_cell(
        &self,
        hero_cell: ElementRef,
        context: &mut ExtractionContext,
    ) -> Result<(), SkipReason> {
        let hero = find_first(hero_cell, &self.selectors.bold)
            .map(|bold| match find_first(bold, &self.selectors.link) {
                Some(link) => extract_trimmed_text(link),
                None => extract_trimmed_text(bold),
            })
            .unwrap_or_default();
        if hero.is_empty() {
            context.current_hero = None;
            return Err(SkipReason::EmptyHeroCell);
        }
        if let Some(image) = find_first(hero_cell, &self.selectors.image) {
            context.hero_icons.insert(hero.clone(), resolve_icon_url(image));
        }
        context.current_hero = Some(hero);
        Ok(())
    }

    /// First non-empty of: titled link text, the cell's last bare text, the
    /// link title's `#fragment`, the whole cell text.
    fn resolve_perk_name(&self, cell: ElementRef) -> String {
        let titled_link = find_first(cell, &self.selectors.titled_link);

        if let Some(link) = titled_link {
            let text = extract_trimmed_text(link);
            if !text.is_empty() {
                return text;
            }
        }
        if let Some(text) = last_text_child(cell) {
            return collapse_whitespace(&text);
        }
        if let Some(name) = titled_link
            .and_then(|link| attribute(link, "title"))
            .and_then(name_from_title)
        {
            return name;
        }
        collapse_whitespace(&extract_trimmed_text(cell))
    }
}

fn name_from_title(title: &str) -> Option<String> {
    title
        .split('#')
        .nth(1)
        .map(|fragment| fragment.replace('_', " "))
        .filter(|name| !name.is_empty())
}

/// Prefers the lazy-load source; a placeholder is swapped for the canonical
/// URL built from `data-image-key` when the image has one.
pub fn resolve_icon_url(image: ElementRef) -> String {
    let source = attribute(image, "data-src")
        .or_else(|| attribute(image, "src"))
        .unwrap_or_default();
    if source.contains(PLACEHOLDER_MARKER) {
        if let Some(key) = attribute(image, "data-image-key").filter(|key| !key.is_empty()) {
            return canonical_image_url(key);
        }
    }
    source.to_string()
}

pub fn canonical_image_url(image_key: &str) -> String {
    let first: String = image_key.chars().take(1).collect();
    let prefix: String = image_key.chars().take(2).collect();
    format!("{IMAGE_BASE_URL}/{first}/{prefix}/{image_key}/revision/latest/scale-to-width-down/50")
}
