use {
    crate::{
        EnemyPanel, FullPortrait, PortraitThumbnail,
        view::{EnemyPanelView, PortraitHandles},
    },
    bevy::prelude::*,
    dex_resources::DexSettings,
    panel_registry::{PanelCloseButton, WindowKey},
    widgets::{
        BODY_FONT_SIZE, Tooltip, UiTheme, panel_frame, spawn_body_text, spawn_close_button,
        spawn_gap,
    },
};

const PANEL_WIDTH: f32 = 325.0;
const PANEL_HEIGHT: f32 = 185.0;
const PORTRAIT_HEIGHT: f32 = 85.0;
const STATUS_ICON_SIZE: f32 = 16.0;

pub const FULL_PORTRAIT_HINT: &str = "Click to see Full Resolution";

/// Spawns the enemy panel described by `view` with its top-left corner at `origin`
/// and returns its root.
pub fn spawn_enemy_panel(
    commands: &mut Commands,
    view: &EnemyPanelView,
    settings: &DexSettings,
    origin: Vec2,
) -> Entity {
    let key = WindowKey::Enemy(view.enemy_id);
    let root = commands
        .spawn((
            panel_frame(
                settings.px(PANEL_WIDTH),
                settings.px(PANEL_HEIGHT),
                settings.px(origin.x),
                settings.px(origin.y),
            ),
            EnemyPanel {
                enemy_id: view.enemy_id,
                portrait: view.portrait.clone(),
            },
            Name::new(format!("EnemyPanel {}", view.enemy_id)),
        ))
        .id();

    commands.entity(root).with_children(|panel| {
        panel
            .spawn(Node {
                flex_direction: FlexDirection::Row,
                width: Val::Percent(100.0),
                height: settings.px(PORTRAIT_HEIGHT),
                column_gap: Val::Px(6.0),
                ..default()
            })
            .with_children(|top| {
                top.spawn(Node {
                    width: Val::Percent(25.0),
                    height: Val::Percent(100.0),
                    ..default()
                })
                .with_children(|frame| {
                    if let Some(portrait) = &view.portrait {
                        spawn_thumbnail(frame, root, portrait);
                    }
                });

                top.spawn(Node {
                    flex_direction: FlexDirection::Column,
                    flex_grow: 1.0,
                    row_gap: Val::Px(2.0),
                    ..default()
                })
                .with_children(|info| {
                    spawn_name_row(info, key, &view.name);
                    spawn_basic_row(info, view);
                    spawn_vulnerability_strip(info, view, settings);
                });
            });

        spawn_gap(panel, 5.0);
        spawn_data_table(panel, view);
    });

    root
}

fn spawn_thumbnail(frame: &mut ChildSpawnerCommands, root: Entity, portrait: &PortraitHandles) {
    frame.spawn((
        ImageNode::new(portrait.thumbnail.clone()),
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            border: UiRect::all(Val::Px(1.0)),
            ..default()
        },
        BorderColor::all(UiTheme::PORTRAIT_BORDER),
        PortraitThumbnail { root },
        Tooltip(FULL_PORTRAIT_HINT.to_string()),
    ));
}

/// Full size portrait shown next to the panel until clicked again.
pub(crate) fn spawn_full_portrait(panel: &mut ChildSpawnerCommands, root: Entity, full: &Handle<Image>) {
    panel.spawn((
        ImageNode::new(full.clone()),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(100.0),
            top: Val::Px(0.0),
            margin: UiRect::left(Val::Px(4.0)),
            ..default()
        },
        GlobalZIndex(i32::MAX - 1),
        Interaction::default(),
        FullPortrait { root },
    ));
}

fn spawn_name_row(info: &mut ChildSpawnerCommands, key: WindowKey, name: &str) {
    info.spawn(Node {
        flex_direction: FlexDirection::Row,
        justify_content: JustifyContent::SpaceBetween,
        align_items: AlignItems::Center,
        ..default()
    })
    .with_children(|row| {
        row.spawn((
            Text::new(name),
            TextFont {
                font_size: BODY_FONT_SIZE + 2.0,
                ..default()
            },
            TextColor(UiTheme::TEXT_PRIMARY),
            Node {
                flex_grow: 1.0,
                overflow: Overflow::clip(),
                ..default()
            },
        ));

        spawn_close_button(row, PanelCloseButton(key));
    });
}

fn spawn_basic_row(info: &mut ChildSpawnerCommands, view: &EnemyPanelView) {
    info.spawn(Node {
        flex_direction: FlexDirection::Row,
        justify_content: JustifyContent::SpaceBetween,
        ..default()
    })
    .with_children(|row| {
        spawn_body_text(row, &view.family);
        spawn_body_text(row, &view.hp);
        spawn_body_text(row, &view.id);
    });
}

fn spawn_vulnerability_strip(
    info: &mut ChildSpawnerCommands,
    view: &EnemyPanelView,
    settings: &DexSettings,
) {
    info.spawn(Node {
        flex_direction: FlexDirection::Row,
        column_gap: Val::Px(3.0),
        height: settings.px(32.0),
        align_items: AlignItems::Center,
        ..default()
    })
    .with_children(|strip| {
        for vulnerability in &view.vulnerabilities {
            let mut icon = strip.spawn((
                ImageNode::new(vulnerability.icon.clone()).with_color(vulnerability.tint()),
                Node {
                    width: settings.px(STATUS_ICON_SIZE),
                    height: settings.px(STATUS_ICON_SIZE),
                    ..default()
                },
            ));

            if let Some(tooltip) = &vulnerability.tooltip {
                icon.insert(Tooltip(tooltip.clone()));
            }
        }
    });
}

fn spawn_data_table(panel: &mut ChildSpawnerCommands, view: &EnemyPanelView) {
    panel
        .spawn(Node {
            display: Display::Grid,
            grid_template_columns: vec![GridTrack::auto(), GridTrack::flex(1.0)],
            column_gap: Val::Px(12.0),
            row_gap: Val::Px(2.0),
            ..default()
        })
        .with_children(|table| {
            spawn_data_row(table, "Floors", &view.floors, None);
            spawn_data_row(table, "Aggro", &view.aggro, None);

            if let Some(attack) = &view.attack {
                spawn_data_row(table, "Attack", &attack.name, attack.details.as_deref());
            }
        });
}

fn spawn_data_row(
    table: &mut ChildSpawnerCommands,
    label: &str,
    value: &str,
    tooltip: Option<&str>,
) {
    table.spawn((
        Text::new(label),
        TextFont {
            font_size: BODY_FONT_SIZE,
            ..default()
        },
        TextColor(UiTheme::TEXT_SECONDARY),
    ));

    let mut cell = table.spawn((
        Text::new(value),
        TextFont {
            font_size: BODY_FONT_SIZE,
            ..default()
        },
        TextColor(UiTheme::TEXT_PRIMARY),
    ));

    if let Some(tooltip) = tooltip {
        cell.insert(Tooltip(tooltip.to_string()));
    }
}
