use {
    bevy::prelude::*,
    dex_assets::DexAssetsPlugin,
    dex_resources::{DexSettingsPlugin, DungeonContext},
    enemy_panel::EnemyPanelPlugin,
    floor_set_panel::FloorSetPanelPlugin,
    loading::LoadingManagerPlugin,
    panel_registry::{CloseAllPanels, PanelRegistryPlugin},
    states::DexState,
    widgets::WidgetsPlugin,
};

pub struct DexCorePlugin;

impl Plugin for DexCorePlugin {
    fn build(&self, app: &mut App) {
        // Settings first, every other plugin reads them during build or startup.
        app.add_plugins(DexSettingsPlugin)
            .init_state::<DexState>()
            .init_resource::<DungeonContext>()
            .add_plugins((
                DexAssetsPlugin,
                LoadingManagerPlugin,
                WidgetsPlugin,
                PanelRegistryPlugin,
                EnemyPanelPlugin,
                FloorSetPanelPlugin,
            ))
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                close_panels_on_leave.run_if(in_state(DexState::Running)),
            );
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Leaving the dungeon ends the session, so every panel goes away.
pub fn close_panels_on_leave(
    mut commands: Commands,
    context: Res<DungeonContext>,
    mut was_inside: Local<bool>,
) {
    if !context.is_changed() {
        return;
    }

    let inside = context.dungeon_type.is_some();
    if *was_inside && !inside {
        info!("left the deep dungeon, closing panels");
        commands.trigger(CloseAllPanels);
    }
    *was_inside = inside;
}
