use std::path::Path;

use anyhow::Context;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use log::info;

use crate::perk::{PerkRecord, Role};

pub const FALLBACK_ICON_URL: &str = "https://static.wikia.nocookie.net/overwatch_gamepedia/images/b/bd/Icon-Overwatch_2.png/revision/latest/scale-to-width-down/50";

const TITLE: &str = "Overwatch 2 Perks";
const TIERS: [(&str, &str); 2] = [("Major Perk", "Major Perks"), ("Minor Perk", "Minor Perks")];
const STYLE: &str = include_str!("viewer.css");
const SCRIPT: &str = include_str!("viewer.js");

/// Renders the flashcard page. Every value the page needs is embedded in the
/// cards' data attributes; the page only loads images.
pub fn render_html(perks: &[PerkRecord]) -> String {
    let mut page = String::new();
    page.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{TITLE}</title>
    <style>
{STYLE}
    </style>
</head>
<body data-fallback-icon="{fallback}">
    <h1>{TITLE}</h1>

    <div class="controls">
        <button id="flip-all">Flip All Cards</button>
        <button id="reset">Reset Cards</button>
        <button id="shuffle">Shuffle Cards</button>
    </div>

    <div class="filters">
        <div id="hero-filters"></div>
        <div class="toggle-group" id="role-filters">
"#,
        fallback = attr(FALLBACK_ICON_URL),
    ));
    for role in Role::ALL {
        page.push_str(&filter_button(role.as_str(), role.as_str()));
    }
    page.push_str(
        r#"        </div>
        <div class="toggle-group" id="tier-filters">
"#,
    );
    for (value, label) in TIERS {
        page.push_str(&filter_button(value, label));
    }
    page.push_str(
        r#"        </div>
    </div>

    <div class="stats" id="stats"></div>

    <div class="flashcard-container" id="flashcards">
"#,
    );

    for perk in perks {
        page.push_str(&flashcard(perk));
    }

    page.push_str(&format!(
        r#"    </div>

    <script>
{SCRIPT}
    </script>
</body>
</html>
"#
    ));
    page
}

pub fn write_html(perks: &[PerkRecord], path: &Path) -> anyhow::Result<()> {
    std::fs::write(path, render_html(perks))
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Data saved to {}", path.display());
    Ok(())
}

fn filter_button(value: &str, label: &str) -> String {
    format!(
        "            <button class=\"filter-toggle\" data-value=\"{}\">{}</button>\n",
        attr(value),
        text(label)
    )
}

fn flashcard(perk: &PerkRecord) -> String {
    let icon = first_non_empty(&[perk.local_icon_path.as_str(), perk.icon_url.as_str()]);
    let hero_icon = first_non_empty(&[perk.local_hero_icon_path.as_str(), perk.hero_icon_url.as_str()]);
    let tier_class = if perk.is_major() { "major" } else { "minor" };
    let fallback = attr(FALLBACK_ICON_URL);

    format!(
        r#"        <div class="flashcard" data-role="{role}" data-hero="{hero}" data-tier="{tier}" data-hero-icon="{hero_icon}">
            <div class="flashcard-inner">
                <div class="flashcard-front">
                    <img src="{icon}" alt="{name} icon" class="perk-icon" onerror="this.onerror=null;this.src='{fallback}';">
                </div>
                <div class="flashcard-back">
                    <img src="{hero_icon}" alt="{hero} icon" class="hero-icon" onerror="this.onerror=null;this.src='{fallback}';">
                    <div class="perk-name">{name_text}</div>
                    <div class="perk-tier {tier_class}">{tier_text}</div>
                    <p class="perk-description">{description}</p>
                </div>
            </div>
        </div>
"#,
        role = perk.role,
        hero = attr(&perk.hero),
        tier = attr(&perk.tier),
        hero_icon = attr(hero_icon),
        icon = attr(icon),
        name = attr(&perk.name),
        name_text = text(&perk.name),
        tier_text = text(&perk.tier),
        description = text(&perk.description),
    )
}

fn first_non_empty<'a>(candidates: &[&'a str]) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(FALLBACK_ICON_URL)
}
