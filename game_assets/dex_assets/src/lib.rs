//! Content tables read from `.ron` files under the content folder.

use {
    bevy::prelude::*,
    bevy_common_assets::ron::RonAssetPlugin,
    dex_components::{Ability, AttackType, Aggro, DungeonType, Enemy, FloorSet, Vulnerability},
    serde::{Deserialize, Serialize},
    std::collections::{BTreeMap, HashMap},
};

pub struct DexAssetsPlugin;

impl Plugin for DexAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Enemy>()
            .register_type::<Ability>()
            .register_type::<AttackType>()
            .register_type::<Aggro>()
            .register_type::<Vulnerability>()
            .register_type::<FloorSet>()
            .register_type::<DungeonType>();

        app.add_plugins((
            RonAssetPlugin::<EnemyTable>::new(&["enemies.ron"]),
            RonAssetPlugin::<FloorSetTable>::new(&["floorsets.ron"]),
            RonAssetPlugin::<SheetTable>::new(&["sheets.ron"]),
        ));
    }
}

/// A `.enemies.ron` file. Tables are merged, so content can be split per dungeon.
#[derive(Asset, TypePath, Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyTable {
    pub enemies: Vec<Enemy>,
}

/// A `.floorsets.ron` file, keyed by floor set number.
#[derive(Asset, TypePath, Debug, Clone, Default, Serialize, Deserialize)]
pub struct FloorSetTable {
    pub floor_sets: BTreeMap<u32, FloorSet>,
}

/// A `.sheets.ron` file with the game's display names.
#[derive(Asset, TypePath, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetTable {
    /// Status names keyed by status icon id
    pub statuses: HashMap<u32, String>,
    pub enemy_names: HashMap<u32, String>,
}
