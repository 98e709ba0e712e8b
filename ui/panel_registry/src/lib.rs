//! Lifecycle of the floating panels.
//!
//! [`PanelRegistry`] is the only owner of panel entities. Panels never despawn
//! themselves: their close button triggers [`ClosePanel`] and the registry despawns the
//! root, dropping every asset handle the panel holds.

mod registry;

pub use registry::{OpenOutcome, WindowRegistry};

use {
    bevy::{
        ecs::system::SystemParam,
        platform::collections::{HashMap, HashSet},
        prelude::*,
    },
    dex_components::FloorSetKey,
    thiserror::Error,
};

pub struct PanelRegistryPlugin;

impl Plugin for PanelRegistryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PanelRegistry>()
            .init_resource::<PanelStack>()
            .init_resource::<PanelSlots>()
            .add_observer(on_close_panel)
            .add_observer(on_close_all_panels)
            .add_observer(forget_despawned_panel)
            .add_systems(Update, handle_close_buttons);
    }
}

/// Panel kinds live in separate key spaces.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowKey {
    Enemy(u32),
    FloorSet(FloorSetKey),
}

const FLOOR_SET_ORIGIN: Vec2 = Vec2::new(20.0, 20.0);
const ENEMY_ORIGIN: Vec2 = Vec2::new(400.0, 20.0);
const CASCADE_STEP: Vec2 = Vec2::new(24.0, 24.0);

impl WindowKey {
    pub fn same_kind(&self, other: &WindowKey) -> bool {
        matches!(
            (self, other),
            (WindowKey::Enemy(_), WindowKey::Enemy(_))
                | (WindowKey::FloorSet(_), WindowKey::FloorSet(_))
        )
    }

    /// Top-left corner of a panel, in unscaled pixels. Floor sets sit on the left and
    /// enemies to their right, further panels of a kind cascade from there.
    pub fn origin(&self, slot: usize) -> Vec2 {
        let anchor = match self {
            WindowKey::Enemy(_) => ENEMY_ORIGIN,
            WindowKey::FloorSet(_) => FLOOR_SET_ORIGIN,
        };
        anchor + CASCADE_STEP * slot as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("no enemy with id {0} is loaded")]
    UnknownEnemy(u32),
    #[error("no floor set {0:?} is loaded")]
    UnknownFloorSet(FloorSetKey),
}

#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct PanelRegistry(pub WindowRegistry<WindowKey, Entity>);

/// Hands out increasing z indices so the last focused panel draws on top.
#[derive(Resource, Debug, Default)]
pub struct PanelStack {
    top: i32,
}

impl PanelStack {
    fn raise(&mut self) -> GlobalZIndex {
        self.top = self.top.saturating_add(1);
        GlobalZIndex(self.top)
    }
}

/// Cascade slot of every open panel, so a new panel never lands on an open one of
/// its kind. Slots freed by closing are reused.
#[derive(Resource, Debug, Default)]
pub struct PanelSlots(HashMap<WindowKey, usize>);

impl PanelSlots {
    pub fn free_slot(&self, key: &WindowKey) -> usize {
        let taken: HashSet<usize> = self
            .0
            .iter()
            .filter(|(open, _)| open.same_kind(key))
            .map(|(_, slot)| *slot)
            .collect();
        (0..).find(|slot| !taken.contains(slot)).unwrap_or_default()
    }

    pub fn slot(&self, key: &WindowKey) -> Option<usize> {
        self.0.get(key).copied()
    }

    fn assign(&mut self, key: WindowKey, slot: usize) {
        self.0.insert(key, slot);
    }

    fn release(&mut self, key: &WindowKey) {
        self.0.remove(key);
    }
}

/// Root component of every panel.
#[derive(Component, Debug, Clone, Copy)]
pub struct Panel {
    pub key: WindowKey,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct PanelCloseButton(pub WindowKey);

#[derive(Event, Debug, Clone, Copy)]
pub struct ClosePanel {
    pub key: WindowKey,
}

/// Closes every panel, used when the session content goes away.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct CloseAllPanels;

/// Registry access for systems and observers that open or close panels.
#[derive(SystemParam)]
pub struct Panels<'w, 's> {
    commands: Commands<'w, 's>,
    registry: ResMut<'w, PanelRegistry>,
    stack: ResMut<'w, PanelStack>,
    slots: ResMut<'w, PanelSlots>,
}

impl Panels<'_, '_> {
    /// Spawns the panel for `key` through `spawn` unless one is open already, in
    /// which case the existing panel is raised. `spawn` receives the panel's top-left
    /// corner and must not spawn anything when it fails.
    pub fn open_or_focus(
        &mut self,
        key: WindowKey,
        spawn: impl FnOnce(&mut Commands, Vec2) -> Result<Entity, PanelError>,
    ) -> Result<OpenOutcome, PanelError> {
        let Panels {
            commands,
            registry,
            stack,
            slots,
        } = self;

        let slot = slots.free_slot(&key);
        let outcome = registry.open_or_focus(key, || spawn(commands, key.origin(slot)))?;

        let Some(&entity) = registry.get(&key) else {
            return Ok(outcome);
        };

        match outcome {
            OpenOutcome::Created => {
                slots.assign(key, slot);
                commands.entity(entity).insert((Panel { key }, stack.raise()));
                debug!(?key, ?entity, "opened panel");
            }
            OpenOutcome::Focused => {
                commands.entity(entity).insert(stack.raise());
                debug!(?key, "panel already open, raised it");
            }
        }

        Ok(outcome)
    }

    /// Despawns the panel for `key`. Returns `false` when none was open.
    pub fn close(&mut self, key: WindowKey) -> bool {
        let Some(entity) = self.registry.close(&key) else {
            return false;
        };
        self.slots.release(&key);

        self.commands.entity(entity).despawn();
        debug!(?key, "closed panel");
        true
    }

    pub fn close_all(&mut self) -> usize {
        let closed = self.registry.close_all();
        for (key, entity) in &closed {
            self.slots.release(key);
            self.commands.entity(*entity).despawn();
        }

        if !closed.is_empty() {
            info!(count = closed.len(), "closed all panels");
        }
        closed.len()
    }
}

fn on_close_panel(trigger: On<ClosePanel>, mut panels: Panels) {
    panels.close(trigger.event().key);
}

fn on_close_all_panels(_trigger: On<CloseAllPanels>, mut panels: Panels) {
    panels.close_all();
}

/// Keeps the registry honest if a panel root is despawned by something else, e.g. a
/// scene teardown. A newer panel under the same key is left alone.
fn forget_despawned_panel(
    trigger: On<Remove, Panel>,
    panels: Query<&Panel>,
    mut registry: ResMut<PanelRegistry>,
    mut slots: ResMut<PanelSlots>,
) {
    let entity = trigger.entity;
    let Ok(panel) = panels.get(entity) else {
        return;
    };

    if registry.get(&panel.key) == Some(&entity) {
        registry.close(&panel.key);
        slots.release(&panel.key);
        debug!(key = ?panel.key, "panel despawned outside the registry, forgot it");
    }
}

fn handle_close_buttons(
    mut commands: Commands,
    interaction_query: Query<(&Interaction, &PanelCloseButton), Changed<Interaction>>,
) {
    for (interaction, button) in interaction_query.iter() {
        if *interaction == Interaction::Pressed {
            commands.trigger(ClosePanel { key: button.0 });
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, dex_components::DungeonType};

    #[derive(Component)]
    struct TestPanel(Vec2);

    #[derive(Event)]
    struct Open(WindowKey);

    #[derive(Resource, Default)]
    struct FactoryRuns(usize);

    fn open_test_panel(trigger: On<Open>, mut panels: Panels, mut runs: ResMut<FactoryRuns>) {
        let key = trigger.event().0;
        let result = panels.open_or_focus(key, |commands, origin| {
            runs.0 += 1;
            match key {
                WindowKey::Enemy(0) => Err(PanelError::UnknownEnemy(0)),
                _ => Ok(commands.spawn(TestPanel(origin)).id()),
            }
        });

        if let Err(err) = result {
            warn!(%err, "could not open test panel");
        }
    }

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(PanelRegistryPlugin)
            .init_resource::<FactoryRuns>()
            .add_observer(open_test_panel);
        app
    }

    fn panel_count(app: &mut App) -> usize {
        let mut query = app.world_mut().query_filtered::<(), With<TestPanel>>();
        query.iter(app.world()).count()
    }

    const ENEMY: WindowKey = WindowKey::Enemy(7);

    #[test]
    fn test_open_twice_spawns_once() {
        let mut app = app();

        app.world_mut().trigger(Open(ENEMY));
        app.world_mut().trigger(Open(ENEMY));
        app.update();

        assert_eq!(app.world().resource::<FactoryRuns>().0, 1);
        assert_eq!(panel_count(&mut app), 1);
    }

    #[test]
    fn test_focus_raises_panel() {
        let mut app = app();

        app.world_mut().trigger(Open(ENEMY));
        app.world_mut()
            .trigger(Open(WindowKey::FloorSet(FloorSetKey::new(DungeonType::HeavenOnHigh, 2))));
        app.world_mut().trigger(Open(ENEMY));
        app.update();

        let entity = *app
            .world()
            .resource::<PanelRegistry>()
            .get(&ENEMY)
            .expect("enemy panel is open");
        let z = app.world().get::<GlobalZIndex>(entity).expect("panel has z index");
        assert_eq!(z.0, 3);
    }

    #[test]
    fn test_close_despawns_and_allows_reopen() {
        let mut app = app();

        app.world_mut().trigger(Open(ENEMY));
        app.update();
        app.world_mut().trigger(ClosePanel { key: ENEMY });
        app.update();

        assert_eq!(panel_count(&mut app), 0);
        assert!(app.world().resource::<PanelRegistry>().is_empty());

        app.world_mut().trigger(Open(ENEMY));
        app.update();

        assert_eq!(app.world().resource::<FactoryRuns>().0, 2);
        assert_eq!(panel_count(&mut app), 1);
    }

    #[test]
    fn test_closing_floor_set_keeps_enemy_panel() {
        let mut app = app();
        let floor_set = WindowKey::FloorSet(FloorSetKey::new(DungeonType::EurekaOrthos, 7));

        app.world_mut().trigger(Open(WindowKey::Enemy(7)));
        app.world_mut().trigger(Open(floor_set));
        app.update();
        app.world_mut().trigger(ClosePanel { key: floor_set });
        app.update();

        let registry = app.world().resource::<PanelRegistry>();
        assert!(registry.is_open(&WindowKey::Enemy(7)));
        assert!(!registry.is_open(&floor_set));
        assert_eq!(panel_count(&mut app), 1);
    }

    #[test]
    fn test_failed_spawn_leaves_nothing() {
        let mut app = app();

        app.world_mut().trigger(Open(WindowKey::Enemy(0)));
        app.update();

        assert!(app.world().resource::<PanelRegistry>().is_empty());
        assert_eq!(panel_count(&mut app), 0);
    }

    #[test]
    fn test_close_all_empties_registry() {
        let mut app = app();
        for id in 1..=3 {
            app.world_mut().trigger(Open(WindowKey::Enemy(id)));
        }
        app.update();

        app.world_mut().trigger(CloseAllPanels);
        app.update();

        assert!(app.world().resource::<PanelRegistry>().is_empty());
        assert_eq!(panel_count(&mut app), 0);
    }

    #[test]
    fn test_external_despawn_is_forgotten() {
        let mut app = app();
        app.world_mut().trigger(Open(ENEMY));
        app.update();

        let entity = *app
            .world()
            .resource::<PanelRegistry>()
            .get(&ENEMY)
            .expect("enemy panel is open");
        app.world_mut().despawn(entity);

        assert!(!app.world().resource::<PanelRegistry>().is_open(&ENEMY));
        assert_eq!(app.world().resource::<PanelSlots>().slot(&ENEMY), None);
    }

    fn origin(app: &App, key: WindowKey) -> Vec2 {
        let entity = *app
            .world()
            .resource::<PanelRegistry>()
            .get(&key)
            .expect("panel is open");
        app.world()
            .get::<TestPanel>(entity)
            .expect("test panel component")
            .0
    }

    #[test]
    fn test_panel_kinds_open_apart() {
        let mut app = app();
        let floor_set = WindowKey::FloorSet(FloorSetKey::new(DungeonType::EurekaOrthos, 7));

        app.world_mut().trigger(Open(floor_set));
        app.world_mut().trigger(Open(ENEMY));
        app.world_mut().trigger(Open(WindowKey::Enemy(8)));
        app.update();

        let floor_set_origin = origin(&app, floor_set);
        let first_enemy = origin(&app, ENEMY);
        let second_enemy = origin(&app, WindowKey::Enemy(8));
        assert_ne!(floor_set_origin, first_enemy);
        assert_ne!(first_enemy, second_enemy);
        assert!(first_enemy.x > floor_set_origin.x);
    }

    #[test]
    fn test_closed_slot_is_reused() {
        let mut app = app();
        app.world_mut().trigger(Open(WindowKey::Enemy(1)));
        app.world_mut().trigger(Open(WindowKey::Enemy(2)));
        app.update();
        let first = origin(&app, WindowKey::Enemy(1));

        app.world_mut().trigger(ClosePanel {
            key: WindowKey::Enemy(1),
        });
        app.world_mut().trigger(Open(WindowKey::Enemy(3)));
        app.update();

        assert_eq!(origin(&app, WindowKey::Enemy(3)), first);
        assert_ne!(origin(&app, WindowKey::Enemy(2)), first);
    }

    #[test]
    fn test_pressing_close_button_closes_panel() {
        let mut app = app();
        app.world_mut().trigger(Open(ENEMY));
        app.update();
        let root = *app
            .world()
            .resource::<PanelRegistry>()
            .get(&ENEMY)
            .expect("enemy panel is open");

        let button = app.world_mut().spawn(PanelCloseButton(ENEMY)).id();
        app.world_mut().entity_mut(root).add_child(button);
        app.world_mut().entity_mut(button).insert(Interaction::Pressed);
        app.update();

        assert!(!app.world().resource::<PanelRegistry>().is_open(&ENEMY));
        assert!(app.world().get_entity(root).is_err());
        assert!(app.world().get_entity(button).is_err());
    }
}
