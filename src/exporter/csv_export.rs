use std::path::Path;

use anyhow::Context;
use log::info;

use crate::perk::{COLUMNS, PerkRecord};

/// Writes one row per perk. The header row is written even for an empty list.
pub fn write_csv(perks: &[PerkRecord], path: &Path) -> anyhow::Result<()> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    writer.write_record(COLUMNS)?;
    for perk in perks {
        writer.serialize(perk)?;
    }
    writer.flush()?;
    info!("Data saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perk::Role;

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("perks.csv");
        let perks = vec![PerkRecord {
            role: Role::Damage,
            hero: "Soldier: 76".to_string(),
            tier: "Minor Perk".to_string(),
            name: "Helix Rockets".to_string(),
            description: "Fires rockets, faster.".to_string(),
            icon_url: "https://img.test/helix.png".to_string(),
            hero_icon_url: String::new(),
            local_icon_path: "perk_icons/Soldier__76_Helix_Rockets.png".to_string(),
            local_hero_icon_path: String::new(),
        }];

        write_csv(&perks, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(
            lines.next(),
            Some("Role,Hero,Tier,Perk Name,Description,Icon URL,Hero Icon URL,Local Icon Path,Local Hero Icon Path")
        );
        assert_eq!(
            lines.next(),
            Some("Damage,Soldier: 76,Minor Perk,Helix Rockets,\"Fires rockets, faster.\",https://img.test/helix.png,,perk_icons/Soldier__76_Helix_Rockets.png,")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_list_still_gets_a_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("perks.csv");
        write_csv(&[], &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 1);
    }
}
