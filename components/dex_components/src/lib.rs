//! Domain records describing deep dungeon content.
//!
//! Records are deserialized once from the content tables and never mutated afterwards.
//! Count-like floor set fields stay strings since the source data holds ranges ("3-5")
//! and qualifiers.

use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
    std::{fmt, ops::RangeInclusive},
};

/// Marker used in ability data when a potency does not apply.
pub const POTENCY_NOT_APPLICABLE: &str = "n/a";

#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackType {
    Physical,
    Magical,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for AttackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AttackType::Physical => "Physical",
            AttackType::Magical => "Magical",
            AttackType::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

#[derive(Reflect, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    /// Either a number or [`POTENCY_NOT_APPLICABLE`].
    #[serde(default)]
    pub potency: Option<String>,
    #[serde(default, rename = "type")]
    pub attack_type: AttackType,
    #[serde(default)]
    pub description: Option<String>,
}

impl Ability {
    /// Potency text worth displaying, `None` when absent or marked as not applicable.
    pub fn potency(&self) -> Option<&str> {
        self.potency
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty() && !p.eq_ignore_ascii_case(POTENCY_NOT_APPLICABLE))
    }
}

#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aggro {
    Sight,
    Sound,
    Proximity,
    None,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Aggro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Aggro::Sight => "Sight",
            Aggro::Sound => "Sound",
            Aggro::Proximity => "Proximity",
            Aggro::None => "None",
            Aggro::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Written as `(status_id, is_vulnerable)` in content files.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u32, bool)", into = "(u32, bool)")]
pub struct Vulnerability {
    pub status_id: u32,
    pub is_vulnerable: bool,
}

impl From<(u32, bool)> for Vulnerability {
    fn from((status_id, is_vulnerable): (u32, bool)) -> Self {
        Self {
            status_id,
            is_vulnerable,
        }
    }
}

impl From<Vulnerability> for (u32, bool) {
    fn from(value: Vulnerability) -> Self {
        (value.status_id, value.is_vulnerable)
    }
}

#[derive(Reflect, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Enemy {
    pub id: u32,
    pub family: Option<String>,
    pub hp: Option<u32>,
    pub aggro: Aggro,
    pub attack_name: Option<String>,
    pub start_floor: u32,
    pub end_floor: u32,
    /// File name of the portrait. Both a thumbnail and a full image exist when set.
    pub image: Option<String>,
    /// Display order is insertion order.
    pub vulnerabilities: Vec<Vulnerability>,
    pub abilities: Vec<Ability>,
}

impl Enemy {
    pub fn has_valid_floor_range(&self) -> bool {
        self.start_floor <= self.end_floor
    }

    pub fn floors(&self) -> RangeInclusive<u32> {
        self.start_floor..=self.end_floor
    }

    /// Every floor the enemy appears on, e.g. `"1, 2, 3"`.
    pub fn floors_text(&self) -> String {
        self.floors()
            .map(|floor| floor.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The ability whose name matches the enemy's attack, if the data has one.
    pub fn attack_ability(&self) -> Option<&Ability> {
        let attack = self.attack_name.as_deref()?;
        self.abilities
            .iter()
            .find(|ability| ability.name.eq_ignore_ascii_case(attack))
    }

    /// Drops repeated status ids, keeping the first occurrence. Returns how many were removed.
    pub fn dedup_vulnerabilities(&mut self) -> usize {
        let before = self.vulnerabilities.len();
        let mut seen = Vec::with_capacity(before);
        self.vulnerabilities.retain(|vulnerability| {
            if seen.contains(&vulnerability.status_id) {
                false
            } else {
                seen.push(vulnerability.status_id);
                true
            }
        });
        before - self.vulnerabilities.len()
    }
}

/// `Unknown` catches dungeon codes the overlay has no assets for.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DungeonType {
    PalaceOfTheDead,
    HeavenOnHigh,
    EurekaOrthos,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Reflect, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorSet {
    pub title: Option<String>,
    pub dungeon_type: DungeonType,
    pub mimic_type: Option<String>,
    pub rooms: Option<String>,
    pub chests: Option<String>,
    pub enemies: Option<String>,
    pub kills_needed: Option<String>,
    pub respawn_rate: Option<String>,
    pub reward: Option<String>,
    pub notes: Option<String>,
}

/// Identity of a floor set: its dungeon plus the floor set number inside that dungeon.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloorSetKey {
    pub dungeon_type: DungeonType,
    pub floor_set_id: u32,
}

impl FloorSetKey {
    pub fn new(dungeon_type: DungeonType, floor_set_id: u32) -> Self {
        Self {
            dungeon_type,
            floor_set_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy_with_floors(start_floor: u32, end_floor: u32) -> Enemy {
        Enemy {
            id: 7,
            start_floor,
            end_floor,
            ..default()
        }
    }

    #[test]
    fn test_floors_text_lists_every_floor() {
        assert_eq!(enemy_with_floors(21, 24).floors_text(), "21, 22, 23, 24");
        assert_eq!(enemy_with_floors(5, 5).floors_text(), "5");
    }

    #[test]
    fn test_invalid_floor_range_detected() {
        assert!(enemy_with_floors(3, 9).has_valid_floor_range());
        assert!(!enemy_with_floors(9, 3).has_valid_floor_range());
        assert_eq!(enemy_with_floors(9, 3).floors_text(), "");
    }

    #[test]
    fn test_dedup_vulnerabilities_keeps_first() {
        let mut enemy = Enemy {
            vulnerabilities: vec![(50, true).into(), (51, false).into(), (50, false).into()],
            ..default()
        };

        assert_eq!(enemy.dedup_vulnerabilities(), 1);
        assert_eq!(
            enemy.vulnerabilities,
            vec![Vulnerability::from((50, true)), Vulnerability::from((51, false))]
        );
    }

    #[test]
    fn test_potency_sentinel_hidden() {
        let mut ability = Ability {
            name: "Charybdis".into(),
            potency: Some("n/a".into()),
            attack_type: AttackType::Magical,
            description: None,
        };
        assert_eq!(ability.potency(), None);

        ability.potency = Some("300".into());
        assert_eq!(ability.potency(), Some("300"));
    }

    #[test]
    fn test_attack_ability_matches_name() {
        let enemy = Enemy {
            attack_name: Some("Mow".into()),
            abilities: vec![Ability {
                name: "mow".into(),
                potency: None,
                attack_type: AttackType::Physical,
                description: Some("Frontal cleave".into()),
            }],
            ..default()
        };

        let ability = enemy.attack_ability().expect("ability should match");
        assert_eq!(ability.attack_type, AttackType::Physical);
    }

    #[test]
    fn test_enemy_from_ron() {
        let enemy: Enemy = ron::from_str(
            r#"(
                id: 7262,
                family: Some("Mimic"),
                aggro: Proximity,
                start_floor: 1,
                end_floor: 9,
                vulnerabilities: [(50, true), (51, false)],
            )"#,
        )
        .expect("enemy should parse");

        assert_eq!(enemy.aggro, Aggro::Proximity);
        assert_eq!(enemy.hp, None);
        assert_eq!(enemy.vulnerabilities[1], Vulnerability::from((51, false)));
    }

    #[test]
    fn test_unknown_codes_fall_back() {
        let aggro: Aggro = ron::from_str("Telepathy").expect("unknown aggro should parse");
        let dungeon: DungeonType = ron::from_str("PilgrimsTraverse").expect("should parse");

        assert_eq!(aggro, Aggro::Unknown);
        assert_eq!(dungeon, DungeonType::Unknown);
    }
}
