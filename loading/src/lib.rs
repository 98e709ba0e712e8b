mod content;
mod listing;
mod resources;

pub use {
    content::{ContentFile, build_content, build_sheets, status_id_from_path},
    listing::ListingError,
};

use {
    crate::{
        listing::list_folder,
        resources::{LoadingHandles, PendingListings},
    },
    bevy::{asset::LoadState, prelude::*, tasks::futures::check_ready},
    dex_assets::{EnemyTable, FloorSetTable, SheetTable},
    dex_resources::{DexFonts, DexSettings, StatusIcons},
    states::{DexState, LoadingPhase},
    std::path::PathBuf,
};

pub struct LoadingManagerPlugin;

impl Plugin for LoadingManagerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadingStatus>()
            .init_resource::<DexSettings>()
            .init_resource::<PendingListings>()
            .init_resource::<LoadingHandles>()
            .init_state::<LoadingPhase>()
            // Phase: Assets - content tables, sheets and icons
            .add_systems(Startup, (start_loading, acquire_fonts))
            .add_systems(
                Update,
                (receive_listings, check_assets_loaded)
                    .chain()
                    .run_if(in_state(DexState::Loading).and(in_state(LoadingPhase::Assets))),
            )
            // Phase: Content - validate records
            .add_systems(OnEnter(LoadingPhase::Content), build_dex_content)
            // Phase: Ready - transition to Running
            .add_systems(OnEnter(LoadingPhase::Ready), finish_loading)
            .add_systems(Last, release_fonts.run_if(on_message::<AppExit>))
            // Loading UI
            .add_systems(OnEnter(DexState::Loading), setup_loading_ui)
            .add_systems(
                Update,
                update_loading_ui.run_if(in_state(DexState::Loading)),
            )
            .add_systems(OnExit(DexState::Loading), cleanup_loading_ui);
    }
}

#[derive(Resource, Default)]
pub struct LoadingStatus {
    pub current_phase: String,
    pub detail: String,
}

// --- Phase: Assets ---

fn start_loading(
    mut listings: ResMut<PendingListings>,
    settings: Res<DexSettings>,
    asset_server: Res<AssetServer>,
) {
    info!(content = %settings.content_dir.display(), icons = %settings.icons_dir.display(), "started loading assets");

    listings.content = Some(list_folder(&asset_server, settings.content_dir.clone()));
    listings.icons = Some(list_folder(&asset_server, settings.icons_dir.clone()));
}

fn acquire_fonts(mut cmd: Commands, settings: Res<DexSettings>, asset_server: Res<AssetServer>) {
    let load = |path: &Option<String>| {
        path.as_ref()
            .map(|path| asset_server.load(path.clone()))
            .unwrap_or_default()
    };

    cmd.insert_resource(DexFonts {
        large: load(&settings.large_font),
        icons: load(&settings.icon_font),
    });
    debug!("acquired fonts");
}

/// Requests every listed file as soon as its folder listing is in.
fn receive_listings(
    mut listings: ResMut<PendingListings>,
    mut handles: ResMut<LoadingHandles>,
    asset_server: Res<AssetServer>,
) {
    if let Some(files) = listings.content.as_mut().and_then(check_ready) {
        listings.content = None;
        request_content(files, &mut handles, &asset_server);
    }

    if let Some(files) = listings.icons.as_mut().and_then(check_ready) {
        listings.icons = None;
        request_icons(files, &mut handles, &asset_server);
    }
}

fn request_content(files: Vec<PathBuf>, handles: &mut LoadingHandles, asset_server: &AssetServer) {
    for path in files {
        match ContentFile::classify(&path) {
            Some(ContentFile::Enemies) => handles.enemy_tables.push(asset_server.load(path)),
            Some(ContentFile::FloorSets) => handles.floor_set_tables.push(asset_server.load(path)),
            Some(ContentFile::Sheets) => handles.sheet_tables.push(asset_server.load(path)),
            None => debug!(path = %path.display(), "not a content table, ignoring"),
        }
    }
}

fn request_icons(files: Vec<PathBuf>, handles: &mut LoadingHandles, asset_server: &AssetServer) {
    for path in files {
        let Some(status_id) = status_id_from_path(&path) else {
            debug!(path = %path.display(), "icon name is not a status id, ignoring");
            continue;
        };
        handles.icons.push((status_id, asset_server.load(path)));
    }
}

/// Waits until every requested file either loaded or failed. Failed files are
/// skipped later, they never hold up the overlay.
fn check_assets_loaded(
    mut next_phase: ResMut<NextState<LoadingPhase>>,
    mut status: ResMut<LoadingStatus>,
    asset_server: Res<AssetServer>,
    listings: Res<PendingListings>,
    handles: Res<LoadingHandles>,
) {
    status.current_phase = "Loading Assets".into();

    if !listings.is_done() {
        status.detail = "Listing content and icons...".into();
        return;
    }

    let total = handles.ids().count();
    let settled = handles
        .ids()
        .filter(|id| {
            matches!(
                asset_server.load_state(*id),
                LoadState::Loaded | LoadState::Failed(_)
            )
        })
        .count();
    status.detail = format!("{settled}/{total} files");

    if settled == total {
        info!(files = total, "assets settled");
        next_phase.set(LoadingPhase::Content);
    }
}

// --- Phase: Content ---

#[allow(clippy::too_many_arguments)]
fn build_dex_content(
    mut cmd: Commands,
    mut next_phase: ResMut<NextState<LoadingPhase>>,
    mut status: ResMut<LoadingStatus>,
    asset_server: Res<AssetServer>,
    handles: Res<LoadingHandles>,
    enemy_tables: Res<Assets<EnemyTable>>,
    floor_set_tables: Res<Assets<FloorSetTable>>,
    sheet_tables: Res<Assets<SheetTable>>,
) {
    status.current_phase = "Building Dex".into();
    status.detail = "Validating records...".into();

    let content = build_content(
        loaded_tables(&handles.enemy_tables, &enemy_tables, &asset_server),
        loaded_tables(&handles.floor_set_tables, &floor_set_tables, &asset_server),
    );
    let (catalog, names) =
        build_sheets(loaded_tables(&handles.sheet_tables, &sheet_tables, &asset_server));
    info!(
        enemies = content.enemy_count(),
        floor_sets = content.floor_set_count(),
        statuses = catalog.len(),
        "built dex content"
    );

    let mut status_icons = StatusIcons::default();
    for (status_id, handle) in &handles.icons {
        match asset_server.load_state(handle.id()) {
            LoadState::Loaded => {
                status_icons.insert(*status_id, handle.clone());
            }
            _ => warn!(status_id, "status icon failed to load, it will not be shown"),
        }
    }
    debug!(icons = status_icons.len(), "typed status icons");

    cmd.insert_resource(content);
    cmd.insert_resource(catalog);
    cmd.insert_resource(names);
    cmd.insert_resource(status_icons);
    cmd.remove_resource::<LoadingHandles>();
    cmd.remove_resource::<PendingListings>();

    next_phase.set(LoadingPhase::Ready);
}

/// Tables that loaded. A table that failed is logged and left out.
fn loaded_tables<'a, A: Asset>(
    handles: &[Handle<A>],
    assets: &'a Assets<A>,
    asset_server: &AssetServer,
) -> Vec<&'a A> {
    handles
        .iter()
        .filter_map(|handle| {
            let table = assets.get(handle);
            if table.is_none() {
                error!(
                    path = ?asset_server.get_path(handle.id()),
                    "content table failed to load, skipping it"
                );
            }
            table
        })
        .collect()
}

// --- Phase: Ready ---

fn finish_loading(mut next_state: ResMut<NextState<DexState>>) {
    info!("Loading complete, transitioning to Running");
    next_state.set(DexState::Running);
}

fn release_fonts(mut cmd: Commands) {
    debug!("releasing fonts");
    cmd.remove_resource::<DexFonts>();
}

// --- Loading UI ---

#[derive(Component)]
struct LoadingUi;

fn setup_loading_ui(mut commands: Commands) {
    info!("spawning loading ui");
    commands.spawn((
        Text::new("Loading..."),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(20.0),
            right: Val::Px(20.0),
            flex_direction: FlexDirection::Column,
            ..default()
        },
        LoadingUi,
    ));
}

fn update_loading_ui(status: Res<LoadingStatus>, mut query: Query<&mut Text, With<LoadingUi>>) {
    if let Ok(mut text) = query.single_mut() {
        *text = Text::new(format!(
            "Loading...\n{}\n{}",
            status.current_phase, status.detail
        ));
    }
}

fn cleanup_loading_ui(mut commands: Commands, query: Query<Entity, With<LoadingUi>>) {
    info!("cleaning up loading ui");
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}
