//! Detail panel for a single enemy: portrait, vulnerabilities and combat data.

mod spawn;
mod view;

pub use {
    spawn::{FULL_PORTRAIT_HINT, spawn_enemy_panel},
    view::{AttackView, EnemyPanelView, PortraitHandles, PortraitPaths, portrait_paths},
};

use {
    bevy::{asset::LoadState, prelude::*},
    dex_resources::{
        DexContent, DexSettings, DungeonContext, EnemyNames, StatusCatalog, StatusIcons,
    },
    panel_registry::{PanelError, Panels, WindowKey},
    states::DexState,
};

pub struct EnemyPanelPlugin;

impl Plugin for EnemyPanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DexContent>()
            .init_resource::<EnemyNames>()
            .init_resource::<StatusIcons>()
            .init_resource::<StatusCatalog>()
            .init_resource::<DungeonContext>()
            .init_resource::<DexSettings>()
            .add_observer(open_enemy_panel)
            .add_systems(
                Update,
                (
                    open_panel_for_target.run_if(in_state(DexState::Running)),
                    toggle_full_portrait,
                    close_full_portrait,
                    settle_thumbnails,
                ),
            );
    }
}

/// Request to show an enemy. Repeated requests raise the open panel.
#[derive(Event, Debug, Clone, Copy)]
pub struct OpenEnemyPanel {
    pub enemy_id: u32,
}

/// Root of an enemy panel. Owns the portrait handles.
#[derive(Component, Debug)]
pub struct EnemyPanel {
    pub enemy_id: u32,
    pub portrait: Option<PortraitHandles>,
}

#[derive(Component, Debug)]
pub struct PortraitThumbnail {
    root: Entity,
}

#[derive(Component, Debug)]
pub struct FullPortrait {
    root: Entity,
}

/// Added once a thumbnail finished loading or failed.
#[derive(Component)]
struct ThumbnailSettled;

#[allow(clippy::too_many_arguments)]
fn open_enemy_panel(
    trigger: On<OpenEnemyPanel>,
    mut panels: Panels,
    content: Res<DexContent>,
    names: Res<EnemyNames>,
    icons: Res<StatusIcons>,
    catalog: Res<StatusCatalog>,
    context: Res<DungeonContext>,
    settings: Res<DexSettings>,
    asset_server: Res<AssetServer>,
) {
    let enemy_id = trigger.event().enemy_id;

    let result = panels.open_or_focus(WindowKey::Enemy(enemy_id), |commands, origin| {
        let enemy = content
            .enemy(enemy_id)
            .ok_or(PanelError::UnknownEnemy(enemy_id))?;

        let portrait = portrait_paths(&settings.data_dir, &context, enemy.image.as_deref()).map(
            |paths| PortraitHandles {
                thumbnail: asset_server.load(paths.thumbnail),
                full: asset_server.load(paths.full),
            },
        );

        let view = EnemyPanelView::resolve(enemy, &names, &icons, &catalog, portrait);
        Ok(spawn_enemy_panel(commands, &view, &settings, origin))
    });

    if let Err(err) = result {
        warn!(%err, "enemy panel not opened");
    }
}

fn open_panel_for_target(
    mut commands: Commands,
    context: Res<DungeonContext>,
    settings: Res<DexSettings>,
    content: Res<DexContent>,
    mut last_target: Local<Option<u32>>,
) {
    if !context.is_changed() || context.target == *last_target {
        return;
    }
    *last_target = context.target;

    let Some(enemy_id) = context.target else {
        return;
    };

    if !settings.open_on_target {
        return;
    }

    if content.enemy(enemy_id).is_some() {
        commands.trigger(OpenEnemyPanel { enemy_id });
    } else {
        debug!(enemy_id, "targeted enemy has no dex entry");
    }
}

fn toggle_full_portrait(
    mut commands: Commands,
    thumbnails: Query<(&Interaction, &PortraitThumbnail), Changed<Interaction>>,
    panels: Query<&EnemyPanel>,
    overlays: Query<(Entity, &FullPortrait)>,
) {
    for (interaction, thumbnail) in thumbnails.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }

        if let Some((overlay, _)) = overlays.iter().find(|(_, o)| o.root == thumbnail.root) {
            commands.entity(overlay).despawn();
            continue;
        }

        let Some(portrait) = panels
            .get(thumbnail.root)
            .ok()
            .and_then(|panel| panel.portrait.as_ref())
        else {
            continue;
        };

        let root = thumbnail.root;
        let full = portrait.full.clone();
        commands.entity(root).with_children(|panel| {
            spawn::spawn_full_portrait(panel, root, &full);
        });
    }
}

fn close_full_portrait(
    mut commands: Commands,
    overlays: Query<(Entity, &Interaction), (With<FullPortrait>, Changed<Interaction>)>,
) {
    for (overlay, interaction) in overlays.iter() {
        if *interaction == Interaction::Pressed {
            commands.entity(overlay).despawn();
        }
    }
}

/// A pending thumbnail simply stays empty. One that failed to load is hidden so the
/// panel shows no art instead of an empty frame.
fn settle_thumbnails(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut thumbnails: Query<
        (Entity, &ImageNode, &mut Node),
        (With<PortraitThumbnail>, Without<ThumbnailSettled>),
    >,
) {
    for (entity, image, mut node) in thumbnails.iter_mut() {
        match asset_server.load_state(image.image.id()) {
            LoadState::Loaded => {
                commands.entity(entity).insert(ThumbnailSettled);
            }
            LoadState::Failed(err) => {
                debug!(%err, "portrait thumbnail failed to load, hiding it");
                node.display = Display::None;
                commands.entity(entity).insert(ThumbnailSettled);
            }
            _ => {}
        }
    }
}
