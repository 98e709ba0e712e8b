//! Common resources used while loading

use {
    bevy::{asset::UntypedAssetId, prelude::*, tasks::Task},
    dex_assets::{EnemyTable, FloorSetTable, SheetTable},
    std::path::PathBuf,
};

/// Folder listings still running on the io pool.
#[derive(Resource, Default)]
pub(super) struct PendingListings {
    pub content: Option<Task<Vec<PathBuf>>>,
    pub icons: Option<Task<Vec<PathBuf>>>,
}

impl PendingListings {
    pub fn is_done(&self) -> bool {
        self.content.is_none() && self.icons.is_none()
    }
}

/// Every file requested so far, loaded one by one.
#[derive(Resource, Default, Debug)]
pub(super) struct LoadingHandles {
    pub enemy_tables: Vec<Handle<EnemyTable>>,
    pub floor_set_tables: Vec<Handle<FloorSetTable>>,
    pub sheet_tables: Vec<Handle<SheetTable>>,
    pub icons: Vec<(u32, Handle<Image>)>,
}

impl LoadingHandles {
    pub fn ids(&self) -> impl Iterator<Item = UntypedAssetId> + '_ {
        self.enemy_tables
            .iter()
            .map(|h| h.id().untyped())
            .chain(self.floor_set_tables.iter().map(|h| h.id().untyped()))
            .chain(self.sheet_tables.iter().map(|h| h.id().untyped()))
            .chain(self.icons.iter().map(|(_, h)| h.id().untyped()))
    }
}
