//! Portrait path layout: `<data>/<Images|Thumbnails>/<dungeon code>/<floor set>/<file>`.
//!
//! Paths are only composed here. Whether the file exists is up to the asset loader.

use {
    dex_components::DungeonType,
    std::path::{Path, PathBuf},
    thiserror::Error,
};

/// Folder used when the current floor set is unknown.
pub const UNKNOWN_FLOOR_SET_FOLDER: &str = "000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Image,
    Thumbnail,
}

impl AssetKind {
    pub fn folder(self) -> &'static str {
        match self {
            AssetKind::Image => "Images",
            AssetKind::Thumbnail => "Thumbnails",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AssetPathError {
    #[error("no asset folder is configured for dungeon type {0:?}")]
    UnknownDungeonType(DungeonType),
}

pub fn dungeon_code(dungeon_type: DungeonType) -> Result<&'static str, AssetPathError> {
    match dungeon_type {
        DungeonType::PalaceOfTheDead => Ok("potd"),
        DungeonType::HeavenOnHigh => Ok("hoh"),
        DungeonType::EurekaOrthos => Ok("eo"),
        DungeonType::Unknown => Err(AssetPathError::UnknownDungeonType(dungeon_type)),
    }
}

pub fn floor_set_folder(floor_set_id: Option<u32>) -> String {
    floor_set_id
        .map(|id| format!("{id:03}"))
        .unwrap_or_else(|| UNKNOWN_FLOOR_SET_FOLDER.to_string())
}

/// Builds the path of an enemy portrait. `Ok(None)` when the enemy has no art,
/// whatever the other arguments are.
pub fn resolve(
    base_dir: &Path,
    kind: AssetKind,
    dungeon_type: DungeonType,
    floor_set_id: Option<u32>,
    image_file: Option<&str>,
) -> Result<Option<PathBuf>, AssetPathError> {
    let Some(image_file) = image_file else {
        return Ok(None);
    };

    let path = base_dir
        .join(kind.folder())
        .join(dungeon_code(dungeon_type)?)
        .join(floor_set_folder(floor_set_id))
        .join(image_file);

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_path_uses_padded_floor_set() {
        let path = resolve(
            Path::new("data"),
            AssetKind::Image,
            DungeonType::EurekaOrthos,
            Some(7),
            Some("mob.png"),
        )
        .expect("eo is a known dungeon")
        .expect("image is present");

        assert!(path.ends_with("Images/eo/007/mob.png"));
        assert!(path.starts_with("data"));
    }

    #[test]
    fn test_thumbnail_defaults_floor_set_folder() {
        let path = resolve(
            Path::new("/opt/dex/data"),
            AssetKind::Thumbnail,
            DungeonType::PalaceOfTheDead,
            None,
            Some("x.png"),
        )
        .expect("potd is a known dungeon")
        .expect("image is present");

        assert_eq!(path, Path::new("/opt/dex/data/Thumbnails/potd/000/x.png"));
    }

    #[test]
    fn test_missing_image_is_absent_for_any_arguments() {
        for dungeon_type in [
            DungeonType::PalaceOfTheDead,
            DungeonType::HeavenOnHigh,
            DungeonType::EurekaOrthos,
            DungeonType::Unknown,
        ] {
            let path = resolve(Path::new("data"), AssetKind::Image, dungeon_type, Some(12), None);
            assert_eq!(path, Ok(None));
        }
    }

    #[test]
    fn test_unknown_dungeon_is_configuration_error() {
        let err = resolve(
            Path::new("data"),
            AssetKind::Thumbnail,
            DungeonType::Unknown,
            Some(1),
            Some("x.png"),
        )
        .expect_err("unknown dungeon has no folder");

        assert_eq!(err, AssetPathError::UnknownDungeonType(DungeonType::Unknown));
    }

    #[test]
    fn test_floor_set_folder_wider_than_three_digits() {
        assert_eq!(floor_set_folder(Some(42)), "042");
        assert_eq!(floor_set_folder(Some(1234)), "1234");
    }
}
