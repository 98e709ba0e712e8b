use bevy::{prelude::*, window::PrimaryWindow};

// NOTE: Both panel kinds build their rows from these helpers instead of sharing a base
// panel type. Spawn functions take component tuples, matching the rest of the UI code.

pub struct UiTheme;

impl UiTheme {
    pub const PANEL_BG: Color = Color::srgba(0.08, 0.08, 0.1, 0.92);
    pub const PANEL_BORDER: Color = Color::srgba(1.0, 1.0, 1.0, 0.08);
    pub const TEXT_PRIMARY: Color = Color::WHITE;
    pub const TEXT_SECONDARY: Color = Color::srgb(0.7, 0.7, 0.7);
    pub const SEPARATOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.2);
    pub const PORTRAIT_BORDER: Color = Color::srgba(1.0, 1.0, 1.0, 0.75);
    pub const CLOSE_BUTTON_BG: Color = Color::srgba(0.8, 0.2, 0.2, 0.8);
    pub const TOOLTIP_BG: Color = Color::srgba(0.0, 0.0, 0.0, 0.9);
}

pub const BODY_FONT_SIZE: f32 = 13.0;
pub const ICON_FONT_SIZE: f32 = 14.0;

/// Hover text for any node. Pulls in [`Interaction`] so hovering is tracked.
#[derive(Component, Debug, Clone, PartialEq)]
#[require(Interaction)]
pub struct Tooltip(pub String);

#[derive(Component)]
struct TooltipLabel;

pub struct WidgetsPlugin;

impl Plugin for WidgetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, update_tooltip);
    }
}

/// Shows one floating label next to the cursor for the hovered [`Tooltip`].
fn update_tooltip(
    mut commands: Commands,
    hovered: Query<(&Interaction, &Tooltip)>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut labels: Query<(Entity, &mut Text, &mut Node), With<TooltipLabel>>,
) {
    let hovered_text = hovered
        .iter()
        .find(|(interaction, _)| matches!(interaction, Interaction::Hovered | Interaction::Pressed))
        .map(|(_, tooltip)| tooltip.0.as_str());

    let Some(hovered_text) = hovered_text else {
        for (entity, ..) in labels.iter() {
            commands.entity(entity).despawn();
        }
        return;
    };

    let cursor = windows
        .single()
        .ok()
        .and_then(Window::cursor_position)
        .unwrap_or_default();
    let left = Val::Px(cursor.x + 14.0);
    let top = Val::Px(cursor.y + 14.0);

    if let Some((_, mut text, mut node)) = labels.iter_mut().next() {
        if text.0 != hovered_text {
            text.0 = hovered_text.to_string();
        }
        node.left = left;
        node.top = top;
        return;
    }

    commands.spawn((
        TooltipLabel,
        Text::new(hovered_text),
        TextFont {
            font_size: BODY_FONT_SIZE,
            ..default()
        },
        TextColor(UiTheme::TEXT_PRIMARY),
        Node {
            position_type: PositionType::Absolute,
            left,
            top,
            padding: UiRect::all(Val::Px(6.0)),
            ..default()
        },
        BackgroundColor(UiTheme::TOOLTIP_BG),
        GlobalZIndex(i32::MAX),
    ));
}

/// Floating panel frame with a fixed size, placed with its top-left corner at
/// `left`/`top`.
pub fn panel_frame(width: Val, height: Val, left: Val, top: Val) -> impl Bundle {
    (
        Node {
            position_type: PositionType::Absolute,
            left,
            top,
            width,
            height,
            flex_direction: FlexDirection::Column,
            padding: UiRect::all(Val::Px(8.0)),
            border: UiRect::all(Val::Px(1.0)),
            border_radius: BorderRadius::all(Val::Px(6.0)),
            ..default()
        },
        BackgroundColor(UiTheme::PANEL_BG),
        BorderColor::all(UiTheme::PANEL_BORDER),
        Interaction::default(),
    )
}

/// Spawns an icon glyph followed by a label. The tooltip is only attached when the
/// label is present; without a label just the icon shows.
pub fn spawn_icon_label(
    parent: &mut ChildSpawnerCommands,
    icon_font: &Handle<Font>,
    icon: char,
    label: Option<&str>,
    tooltip: &str,
) {
    let mut group = parent.spawn(Node {
        flex_direction: FlexDirection::Row,
        align_items: AlignItems::Center,
        column_gap: Val::Px(4.0),
        margin: UiRect::bottom(Val::Px(3.0)),
        ..default()
    });

    if label.is_some() {
        group.insert(Tooltip(tooltip.to_string()));
    }

    group.with_children(|row| {
        row.spawn((
            Text::new(icon.to_string()),
            TextFont {
                font: icon_font.clone(),
                font_size: ICON_FONT_SIZE,
                ..default()
            },
            TextColor(UiTheme::TEXT_SECONDARY),
        ));

        if let Some(label) = label {
            spawn_body_text(row, label);
        }
    });
}

/// A full-width separator with a small gap beneath it, used between table sections.
pub fn spawn_spacing_row(parent: &mut ChildSpawnerCommands) {
    spawn_separator(parent);
    spawn_gap(parent, 3.0);
}

pub fn spawn_separator(parent: &mut ChildSpawnerCommands) {
    parent.spawn((
        Node {
            width: Val::Percent(100.0),
            height: Val::Px(1.0),
            ..default()
        },
        BackgroundColor(UiTheme::SEPARATOR),
    ));
}

pub fn spawn_gap(parent: &mut ChildSpawnerCommands, height: f32) {
    parent.spawn(Node {
        height: Val::Px(height),
        ..default()
    });
}

pub fn spawn_body_text(parent: &mut ChildSpawnerCommands, text: &str) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: BODY_FONT_SIZE,
            ..default()
        },
        TextColor(UiTheme::TEXT_PRIMARY),
    ));
}

/// Small square "X" button carrying `marker`, placed at the end of a header row.
pub fn spawn_close_button<M: Component>(parent: &mut ChildSpawnerCommands, marker: M) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(20.0),
                height: Val::Px(20.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(UiTheme::CLOSE_BUTTON_BG),
            marker,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new("X"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_label_tooltip_only_with_label() {
        let mut app = App::new();
        let root = app.world_mut().spawn(Node::default()).id();

        let mut commands = app.world_mut().commands();
        commands.entity(root).with_children(|parent| {
            spawn_icon_label(parent, &Handle::default(), 'a', Some("3-5"), "Rooms");
            spawn_icon_label(parent, &Handle::default(), 'b', None, "Chests");
        });
        app.world_mut().flush();

        let mut tooltips = app.world_mut().query::<&Tooltip>();
        let tooltips: Vec<_> = tooltips.iter(app.world()).cloned().collect();
        assert_eq!(tooltips, [Tooltip("Rooms".into())]);
    }

    #[test]
    fn test_tooltip_requires_interaction() {
        let mut app = App::new();
        let entity = app.world_mut().spawn(Tooltip("Sleep".into())).id();

        assert!(app.world().get::<Interaction>(entity).is_some());
    }
}
