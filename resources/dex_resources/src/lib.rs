//! Shared resources: settings, host context, loaded content and the game sheet lookups.

mod content;
mod settings;

pub use {
    content::{ContentError, DexContent, DexFonts, EnemyNames, StatusCatalog, StatusIcons},
    settings::{DEFAULT_SETTINGS_PATH, DexSettings, DexSettingsPlugin, SETTINGS_ENV, SettingsError},
};

use {
    bevy::prelude::*,
    dex_components::{DungeonType, FloorSetKey},
};

/// Where the player currently is, written by the host integration.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct DungeonContext {
    /// `None` outside of any deep dungeon
    pub dungeon_type: Option<DungeonType>,
    pub floor_set_id: Option<u32>,
    /// Enemy id of the current target
    pub target: Option<u32>,
}

impl DungeonContext {
    pub fn floor_set_key(&self) -> Option<FloorSetKey> {
        Some(FloorSetKey::new(self.dungeon_type?, self.floor_set_id?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_set_key_needs_dungeon_and_floor_set() {
        let mut context = DungeonContext {
            floor_set_id: Some(3),
            ..default()
        };
        assert_eq!(context.floor_set_key(), None);

        context.dungeon_type = Some(DungeonType::HeavenOnHigh);
        assert_eq!(
            context.floor_set_key(),
            Some(FloorSetKey::new(DungeonType::HeavenOnHigh, 3))
        );
    }
}
