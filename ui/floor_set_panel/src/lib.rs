mod view;

pub use view::{FloorSetView, StatCell, glyph};

use {
    bevy::prelude::*,
    dex_components::FloorSetKey,
    dex_resources::{DexContent, DexFonts, DexSettings, DungeonContext},
    panel_registry::{PanelCloseButton, PanelError, Panels, WindowKey},
    states::DexState,
    widgets::{
        BODY_FONT_SIZE, UiTheme, panel_frame, spawn_body_text, spawn_close_button, spawn_gap,
        spawn_icon_label, spawn_separator, spawn_spacing_row,
    },
};

const PANEL_WIDTH: f32 = 360.0;
const TITLE_FONT_SIZE: f32 = 20.0;
const PARAGRAPH_GAP: f32 = 5.0;

pub struct FloorSetPanelPlugin;

impl Plugin for FloorSetPanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DexContent>()
            .init_resource::<DexFonts>()
            .init_resource::<DungeonContext>()
            .init_resource::<DexSettings>()
            .add_observer(open_floor_set_panel)
            .add_systems(
                Update,
                open_panel_on_enter.run_if(in_state(DexState::Running)),
            );
    }
}

#[derive(Event, Debug, Clone, Copy)]
pub struct OpenFloorSetPanel {
    pub key: FloorSetKey,
}

#[derive(Component, Debug)]
pub struct FloorSetPanel {
    pub key: FloorSetKey,
}

fn open_floor_set_panel(
    trigger: On<OpenFloorSetPanel>,
    mut panels: Panels,
    content: Res<DexContent>,
    fonts: Res<DexFonts>,
    settings: Res<DexSettings>,
) {
    let key = trigger.event().key;

    let result = panels.open_or_focus(WindowKey::FloorSet(key), |commands, origin| {
        let floor_set = content
            .floor_set(&key)
            .ok_or(PanelError::UnknownFloorSet(key))?;

        let view = FloorSetView::resolve(key, floor_set);
        Ok(spawn_floor_set_panel(commands, &view, &fonts, &settings, origin))
    });

    if let Err(err) = result {
        warn!(%err, "floor set panel not opened");
    }
}

fn open_panel_on_enter(
    mut commands: Commands,
    context: Res<DungeonContext>,
    settings: Res<DexSettings>,
    content: Res<DexContent>,
    mut last_key: Local<Option<FloorSetKey>>,
) {
    if !context.is_changed() {
        return;
    }

    let key = context.floor_set_key();
    if key == *last_key {
        return;
    }
    *last_key = key;

    let Some(key) = key else {
        return;
    };

    if settings.open_floor_set_on_enter && content.floor_set(&key).is_some() {
        debug!(?key, "entered floor set");
        commands.trigger(OpenFloorSetPanel { key });
    }
}

/// Height follows the notes, only the width is fixed.
pub fn spawn_floor_set_panel(
    commands: &mut Commands,
    view: &FloorSetView,
    fonts: &DexFonts,
    settings: &DexSettings,
    origin: Vec2,
) -> Entity {
    let key = WindowKey::FloorSet(view.key);
    let root = commands
        .spawn((
            panel_frame(
                settings.px(PANEL_WIDTH),
                Val::Auto,
                settings.px(origin.x),
                settings.px(origin.y),
            ),
            FloorSetPanel { key: view.key },
            Name::new(format!("FloorSetPanel {}", view.title)),
        ))
        .id();

    commands.entity(root).with_children(|panel| {
        panel
            .spawn(Node {
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                ..default()
            })
            .with_children(|header| {
                header.spawn((
                    Text::new(&view.title),
                    TextFont {
                        font: fonts.large.clone(),
                        font_size: TITLE_FONT_SIZE,
                        ..default()
                    },
                    TextColor(UiTheme::TEXT_PRIMARY),
                ));
                spawn_close_button(header, PanelCloseButton(key));
            });

        spawn_spacing_row(panel);

        panel
            .spawn(Node {
                display: Display::Grid,
                grid_template_columns: RepeatedGridTrack::flex(3, 1.0),
                column_gap: Val::Px(8.0),
                ..default()
            })
            .with_children(|grid| {
                for cell in &view.stats {
                    spawn_icon_label(
                        grid,
                        &fonts.icons,
                        cell.icon,
                        cell.label.as_deref(),
                        cell.tooltip,
                    );
                }
            });

        spawn_separator(panel);

        for paragraph in &view.paragraphs {
            spawn_gap(panel, PARAGRAPH_GAP);
            spawn_paragraph(panel, paragraph);
        }
    });

    root
}

fn spawn_paragraph(panel: &mut ChildSpawnerCommands, paragraph: &str) {
    panel
        .spawn(Node {
            width: Val::Percent(100.0),
            ..default()
        })
        .with_children(|wrap| spawn_body_text(wrap, paragraph));
}
