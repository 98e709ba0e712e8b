use {
    bevy::{platform::collections::HashMap, prelude::*},
    dex_components::{Enemy, FloorSet, FloorSetKey},
    thiserror::Error,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("enemy {id} starts on floor {start_floor} but ends on floor {end_floor}")]
    InvalidFloorRange {
        id: u32,
        start_floor: u32,
        end_floor: u32,
    },
    #[error("enemy {0} is defined more than once")]
    DuplicateEnemy(u32),
    #[error("floor set {0:?} is defined more than once")]
    DuplicateFloorSet(FloorSetKey),
}

/// Every validated record, ready for the panels.
#[derive(Resource, Debug, Default)]
pub struct DexContent {
    enemies: HashMap<u32, Enemy>,
    floor_sets: HashMap<FloorSetKey, FloorSet>,
}

impl DexContent {
    /// Adds an enemy after checking its floor range. Repeated vulnerability
    /// entries are dropped, the first one wins.
    pub fn add_enemy(&mut self, mut enemy: Enemy) -> Result<(), ContentError> {
        if !enemy.has_valid_floor_range() {
            return Err(ContentError::InvalidFloorRange {
                id: enemy.id,
                start_floor: enemy.start_floor,
                end_floor: enemy.end_floor,
            });
        }

        if self.enemies.contains_key(&enemy.id) {
            return Err(ContentError::DuplicateEnemy(enemy.id));
        }

        let removed = enemy.dedup_vulnerabilities();
        if removed > 0 {
            warn!(enemy_id = enemy.id, removed, "dropped repeated vulnerability entries");
        }

        self.enemies.insert(enemy.id, enemy);
        Ok(())
    }

    pub fn add_floor_set(
        &mut self,
        floor_set_id: u32,
        floor_set: FloorSet,
    ) -> Result<FloorSetKey, ContentError> {
        let key = FloorSetKey::new(floor_set.dungeon_type, floor_set_id);
        if self.floor_sets.contains_key(&key) {
            return Err(ContentError::DuplicateFloorSet(key));
        }

        self.floor_sets.insert(key, floor_set);
        Ok(key)
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.get(&id)
    }

    pub fn floor_set(&self, key: &FloorSetKey) -> Option<&FloorSet> {
        self.floor_sets.get(key)
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn floor_set_count(&self) -> usize {
        self.floor_sets.len()
    }
}

/// Status names from the game sheets, keyed by status icon id.
#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct StatusCatalog(pub HashMap<u32, String>);

impl StatusCatalog {
    pub fn name(&self, status_id: u32) -> Option<&str> {
        self.0.get(&status_id).map(String::as_str)
    }
}

#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct EnemyNames(pub HashMap<u32, String>);

impl EnemyNames {
    pub fn display_name(&self, enemy: &Enemy) -> String {
        self.0
            .get(&enemy.id)
            .cloned()
            .unwrap_or_else(|| format!("Enemy #{}", enemy.id))
    }
}

/// Status icons that finished loading. A status without an entry has no icon.
#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct StatusIcons(pub HashMap<u32, Handle<Image>>);

impl StatusIcons {
    pub fn icon(&self, status_id: u32) -> Option<&Handle<Image>> {
        self.0.get(&status_id)
    }
}

/// Fonts shared by every panel. Acquired at startup, released on exit.
#[derive(Resource, Debug, Clone, Default)]
pub struct DexFonts {
    pub large: Handle<Font>,
    pub icons: Handle<Font>,
}

#[cfg(test)]
mod tests {
    use {super::*, dex_components::DungeonType};

    #[test]
    fn test_add_enemy_rejects_inverted_floors() {
        let mut content = DexContent::default();
        let err = content
            .add_enemy(Enemy {
                id: 4,
                start_floor: 30,
                end_floor: 21,
                ..default()
            })
            .expect_err("inverted range should be rejected");

        assert_eq!(
            err,
            ContentError::InvalidFloorRange {
                id: 4,
                start_floor: 30,
                end_floor: 21
            }
        );
        assert_eq!(content.enemy_count(), 0);
    }

    #[test]
    fn test_add_enemy_keeps_first_definition() {
        let mut content = DexContent::default();
        let first = Enemy {
            id: 9,
            hp: Some(100),
            ..default()
        };
        content.add_enemy(first).expect("first enemy should be added");

        let err = content
            .add_enemy(Enemy {
                id: 9,
                hp: Some(5),
                ..default()
            })
            .expect_err("duplicate should be rejected");

        assert_eq!(err, ContentError::DuplicateEnemy(9));
        assert_eq!(content.enemy(9).and_then(|e| e.hp), Some(100));
    }

    #[test]
    fn test_floor_sets_keyed_per_dungeon() {
        let mut content = DexContent::default();
        let potd = FloorSet {
            dungeon_type: DungeonType::PalaceOfTheDead,
            ..default()
        };
        let eo = FloorSet {
            dungeon_type: DungeonType::EurekaOrthos,
            ..default()
        };

        let potd_key = content.add_floor_set(1, potd).expect("potd floor set");
        let eo_key = content.add_floor_set(1, eo).expect("eo floor set");

        assert_ne!(potd_key, eo_key);
        assert_eq!(content.floor_set_count(), 2);
        assert_eq!(
            content.floor_set(&eo_key).map(|f| f.dungeon_type),
            Some(DungeonType::EurekaOrthos)
        );
    }

    #[test]
    fn test_enemy_name_falls_back_to_id() {
        let mut names = EnemyNames::default();
        names.insert(12, "Deep Palace Bat".into());

        assert_eq!(names.display_name(&Enemy { id: 12, ..default() }), "Deep Palace Bat");
        assert_eq!(names.display_name(&Enemy { id: 13, ..default() }), "Enemy #13");
    }
}
