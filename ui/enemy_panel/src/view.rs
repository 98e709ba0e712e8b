use {
    asset_paths::{AssetKind, resolve},
    bevy::prelude::*,
    dex_components::Enemy,
    dex_resources::{DungeonContext, EnemyNames, StatusCatalog, StatusIcons},
    std::path::{Path, PathBuf},
    vulnerabilities::{VulnerabilityView, vulnerability_views},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortraitPaths {
    pub thumbnail: PathBuf,
    pub full: PathBuf,
}

/// Image handles a panel keeps alive for as long as it is open.
#[derive(Debug, Clone, PartialEq)]
pub struct PortraitHandles {
    pub thumbnail: Handle<Image>,
    pub full: Handle<Image>,
}

/// Portrait locations for the current dungeon and floor set. Outside a dungeon there
/// is no art. A dungeon without an asset folder is logged and treated the same way.
pub fn portrait_paths(
    data_dir: &Path,
    context: &DungeonContext,
    image: Option<&str>,
) -> Option<PortraitPaths> {
    let Some(dungeon_type) = context.dungeon_type else {
        debug!("not in a dungeon, showing no art");
        return None;
    };
    let resolve_kind =
        |kind| resolve(data_dir, kind, dungeon_type, context.floor_set_id, image);

    match (resolve_kind(AssetKind::Thumbnail), resolve_kind(AssetKind::Image)) {
        (Ok(Some(thumbnail)), Ok(Some(full))) => Some(PortraitPaths { thumbnail, full }),
        (Err(err), _) | (_, Err(err)) => {
            warn!(%err, "portrait path unavailable, showing no art");
            None
        }
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttackView {
    pub name: String,
    /// Hover text built from the matching ability
    pub details: Option<String>,
}

/// Everything the enemy panel shows, resolved before anything is spawned.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyPanelView {
    pub enemy_id: u32,
    pub name: String,
    pub family: String,
    pub hp: String,
    pub id: String,
    pub floors: String,
    pub aggro: String,
    pub attack: Option<AttackView>,
    pub vulnerabilities: Vec<VulnerabilityView>,
    pub portrait: Option<PortraitHandles>,
}

impl EnemyPanelView {
    pub fn resolve(
        enemy: &Enemy,
        names: &EnemyNames,
        icons: &StatusIcons,
        catalog: &StatusCatalog,
        portrait: Option<PortraitHandles>,
    ) -> Self {
        let attack = enemy.attack_name.as_ref().map(|name| AttackView {
            name: name.clone(),
            details: enemy.attack_ability().map(|ability| {
                let mut details = ability.attack_type.to_string();
                if let Some(potency) = ability.potency() {
                    details.push_str(&format!(", potency {potency}"));
                }
                if let Some(description) = &ability.description {
                    details.push('\n');
                    details.push_str(description);
                }
                details
            }),
        });

        Self {
            enemy_id: enemy.id,
            name: names.display_name(enemy),
            family: enemy.family.clone().unwrap_or_default(),
            hp: format!("HP {}", enemy.hp.unwrap_or(0)),
            id: format!("ID {}", enemy.id),
            floors: enemy.floors_text(),
            aggro: enemy.aggro.to_string(),
            attack,
            vulnerabilities: vulnerability_views(&enemy.vulnerabilities, icons, catalog),
            portrait,
        }
    }
}
