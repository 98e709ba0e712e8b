//! Turns loaded tables into the resources the panels read.

use {
    bevy::prelude::*,
    dex_assets::{EnemyTable, FloorSetTable, SheetTable},
    dex_resources::{DexContent, EnemyNames, StatusCatalog},
    std::{ffi::OsStr, path::Path},
};

/// Validates and merges every table. Rejected records are logged and skipped, the
/// first definition of an id wins.
pub fn build_content<'a>(
    enemy_tables: impl IntoIterator<Item = &'a EnemyTable>,
    floor_set_tables: impl IntoIterator<Item = &'a FloorSetTable>,
) -> DexContent {
    let mut content = DexContent::default();

    for enemy in enemy_tables.into_iter().flat_map(|table| &table.enemies) {
        if let Err(err) = content.add_enemy(enemy.clone()) {
            warn!(%err, "skipping enemy");
        }
    }

    for (id, floor_set) in floor_set_tables
        .into_iter()
        .flat_map(|table| &table.floor_sets)
    {
        if let Err(err) = content.add_floor_set(*id, floor_set.clone()) {
            warn!(%err, "skipping floor set");
        }
    }

    content
}

pub fn build_sheets<'a>(
    sheets: impl IntoIterator<Item = &'a SheetTable>,
) -> (StatusCatalog, EnemyNames) {
    let mut catalog = StatusCatalog::default();
    let mut names = EnemyNames::default();

    for sheet in sheets {
        for (id, name) in &sheet.statuses {
            catalog.entry(*id).or_insert_with(|| name.clone());
        }
        for (id, name) in &sheet.enemy_names {
            names.entry(*id).or_insert_with(|| name.clone());
        }
    }

    (catalog, names)
}

/// Content tables a file name can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFile {
    Enemies,
    FloorSets,
    Sheets,
}

impl ContentFile {
    pub fn classify(path: &Path) -> Option<Self> {
        let name = path.file_name().and_then(OsStr::to_str)?;
        if name.ends_with(".enemies.ron") {
            Some(Self::Enemies)
        } else if name.ends_with(".floorsets.ron") {
            Some(Self::FloorSets)
        } else if name.ends_with(".sheets.ron") {
            Some(Self::Sheets)
        } else {
            None
        }
    }
}

/// Status icons are named by their numeric id, e.g. `Icons/215004.png`.
pub fn status_id_from_path(path: &Path) -> Option<u32> {
    path.file_stem()
        .and_then(OsStr::to_str)
        .and_then(|stem| stem.parse().ok())
}
