use dex_components::{FloorSet, FloorSetKey};

/// Font Awesome solid glyphs used for the floor set stats.
pub mod glyph {
    pub const MIMIC: char = '\u{f466}';
    pub const ROOMS: char = '\u{f015}';
    pub const CHESTS: char = '\u{f3a5}';
    pub const ENEMIES: char = '\u{f188}';
    pub const KILLS: char = '\u{f714}';
    pub const RESPAWN: char = '\u{f1b8}';
    pub const REWARD: char = '\u{f51e}';
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCell {
    pub icon: char,
    pub label: Option<String>,
    pub tooltip: &'static str,
}

/// Resolved content of a floor set panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorSetView {
    pub key: FloorSetKey,
    pub title: String,
    pub stats: Vec<StatCell>,
    pub paragraphs: Vec<String>,
}

impl FloorSetView {
    pub fn resolve(key: FloorSetKey, floor_set: &FloorSet) -> Self {
        let cell = |icon, label: &Option<String>, tooltip| StatCell {
            icon,
            label: label.clone(),
            tooltip,
        };

        let stats = vec![
            cell(glyph::MIMIC, &floor_set.mimic_type, "Mimic Type"),
            cell(glyph::ROOMS, &floor_set.rooms, "Number of Rooms per floor"),
            cell(glyph::CHESTS, &floor_set.chests, "Number of Chests per floor"),
            cell(glyph::ENEMIES, &floor_set.enemies, "Number of Enemies per floor"),
            cell(glyph::KILLS, &floor_set.kills_needed, "Kills Needed per floor"),
            cell(glyph::RESPAWN, &floor_set.respawn_rate, "Enemy Respawn Rate"),
            cell(glyph::REWARD, &floor_set.reward, "Hoard Reward"),
        ];

        Self {
            key,
            title: floor_set
                .title
                .clone()
                .unwrap_or_else(|| format!("Floor Set {}", key.floor_set_id)),
            stats,
            paragraphs: notes::normalize(floor_set.notes.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, dex_components::DungeonType};

    fn key() -> FloorSetKey {
        FloorSetKey::new(DungeonType::PalaceOfTheDead, 5)
    }

    #[test]
    fn test_stats_keep_fixed_order_and_tooltips() {
        let floor_set = FloorSet {
            rooms: Some("3-5".into()),
            reward: Some("Bronze".into()),
            ..Default::default()
        };

        let view = FloorSetView::resolve(key(), &floor_set);

        let tooltips: Vec<_> = view.stats.iter().map(|cell| cell.tooltip).collect();
        assert_eq!(
            tooltips,
            [
                "Mimic Type",
                "Number of Rooms per floor",
                "Number of Chests per floor",
                "Number of Enemies per floor",
                "Kills Needed per floor",
                "Enemy Respawn Rate",
                "Hoard Reward",
            ]
        );
        assert_eq!(view.stats[1].label.as_deref(), Some("3-5"));
        assert_eq!(view.stats[0].label, None);
        assert_eq!(view.stats[6].label.as_deref(), Some("Bronze"));
    }

    #[test]
    fn test_notes_become_paragraphs() {
        let floor_set = FloorSet {
            title: Some("Floors 41-50".into()),
            notes: Some("  Watch for [Gourmands](https://x/y)\nnear the stairs.\n\nBoss: Ixtab".into()),
            ..Default::default()
        };

        let view = FloorSetView::resolve(key(), &floor_set);

        assert_eq!(view.title, "Floors 41-50");
        assert_eq!(
            view.paragraphs,
            ["Watch for Gourmands near the stairs.", "Boss: Ixtab"]
        );
    }

    #[test]
    fn test_missing_title_and_notes() {
        let view = FloorSetView::resolve(key(), &FloorSet::default());

        assert_eq!(view.title, "Floor Set 5");
        assert!(view.paragraphs.is_empty());
    }
}
