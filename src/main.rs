use {
    bevy::{log::LogPlugin, prelude::*},
    dex_core::DexCorePlugin,
};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "error,loading=debug,\
                        panel_registry=debug,\
                        enemy_panel=debug,\
                        floor_set_panel=debug,\
                        dex_resources=info,\
                        dex_core=info"
                        .into(),
                    level: bevy::log::Level::DEBUG,
                    ..Default::default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Deep Dungeon Dex".into(),
                        transparent: true,
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(ClearColor(Color::NONE))
        .add_plugins(DexCorePlugin)
        .run();
}
