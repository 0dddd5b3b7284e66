use serde::Serialize;

/// Column titles shared by the CSV and XLSX exports, in output order.
pub const COLUMNS: [&str; 9] = [
    "Role",
    "Hero",
    "Tier",
    "Perk Name",
    "Description",
    "Icon URL",
    "Hero Icon URL",
    "Local Icon Path",
    "Local Hero Icon Path",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    Tank,
    Damage,
    Support,
}

impl Role {
    /// Sections in the order they appear on the page.
    pub const ALL: [Role; 3] = [Role::Tank, Role::Damage, Role::Support];

    /// The id of the heading anchor that introduces this role's table.
    pub fn section_id(self) -> &'static str {
        match self {
            Role::Tank => "Tanks",
            Role::Damage => "Damage",
            Role::Support => "Support",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Tank => "Tank",
            Role::Damage => "Damage",
            Role::Support => "Support",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One perk row. Built by the extractor, local paths filled in by the image
/// resolver, read-only from then on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerkRecord {
    #[serde(rename = "Role")]
    pub role: Role,
    #[serde(rename = "Hero")]
    pub hero: String,
    #[serde(rename = "Tier")]
    pub tier: String,
    #[serde(rename = "Perk Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Icon URL")]
    pub icon_url: String,
    #[serde(rename = "Hero Icon URL")]
    pub hero_icon_url: String,
    #[serde(rename = "Local Icon Path")]
    pub local_icon_path: String,
    #[serde(rename = "Local Hero Icon Path")]
    pub local_hero_icon_path: String,
}

impl PerkRecord {
    pub fn is_major(&self) -> bool {
        self.tier.contains("Major")
    }

    /// Field values in `COLUMNS` order.
    pub fn fields(&self) -> [&str; 9] {
        [
            self.role.as_str(),
            &self.hero,
            &self.tier,
            &self.name,
            &self.description,
            &self.icon_url,
            &self.hero_icon_url,
            &self.local_icon_path,
            &self.local_hero_icon_path,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_map_to_page_anchors() {
        let ids: Vec<_> = Role::ALL.iter().map(|role| role.section_id()).collect();
        assert_eq!(ids, ["Tanks", "Damage", "Support"]);
        assert_eq!(Role::Tank.to_string(), "Tank");
    }

    #[test]
    fn tier_classification_is_a_substring_test() {
        let mut perk = PerkRecord {
            role: Role::Support,
            hero: "Ana".to_string(),
            tier: "Major Perk".to_string(),
            name: "Biotic Bounce".to_string(),
            description: String::new(),
            icon_url: String::new(),
            hero_icon_url: String::new(),
            local_icon_path: String::new(),
            local_hero_icon_path: String::new(),
        };
        assert!(perk.is_major());
        perk.tier = "Minor Perk".to_string();
        assert!(!perk.is_major());
        assert_eq!(perk.fields()[0], "Support");
        assert_eq!(perk.fields()[3], "Biotic Bounce");
    }
}
