use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
    std::{
        env, fs, io,
        path::{Path, PathBuf},
    },
    thiserror::Error,
};

/// Environment variable overriding the settings file location.
pub const SETTINGS_ENV: &str = "DEX_SETTINGS";
pub const DEFAULT_SETTINGS_PATH: &str = "dex.settings.ron";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// User configuration. Paths are relative to the asset root.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DexSettings {
    /// Base folder holding the `Images` and `Thumbnails` trees
    pub data_dir: PathBuf,
    pub content_dir: PathBuf,
    /// Status icons named `<status id>.png`
    pub icons_dir: PathBuf,
    pub large_font: Option<String>,
    pub icon_font: Option<String>,
    pub open_on_target: bool,
    pub open_floor_set_on_enter: bool,
    pub ui_scale: f32,
}

impl Default for DexSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            content_dir: PathBuf::from("data/content"),
            icons_dir: PathBuf::from("data/Icons"),
            large_font: None,
            icon_font: Some("fonts/fa-solid-900.otf".into()),
            open_on_target: true,
            open_floor_set_on_enter: true,
            ui_scale: 1.0,
        }
    }
}

impl DexSettings {
    pub fn parse(path: &Path, source: &str) -> Result<Self, SettingsError> {
        ron::from_str(source).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let source = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &source)
    }

    pub fn settings_path() -> PathBuf {
        env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH))
    }

    /// Scales a fixed layout metric by the configured UI scale.
    pub fn px(&self, value: f32) -> Val {
        Val::Px(value * self.ui_scale)
    }
}

/// Reads [`DexSettings`] while the app is being built, unless one was inserted already.
pub struct DexSettingsPlugin;

impl Plugin for DexSettingsPlugin {
    fn build(&self, app: &mut App) {
        if app.world().contains_resource::<DexSettings>() {
            debug!("settings provided by the app, skipping settings file");
            return;
        }

        let path = DexSettings::settings_path();
        let settings = if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            DexSettings::default()
        } else {
            match DexSettings::load_from(&path) {
                Ok(settings) => {
                    info!(path = %path.display(), "loaded settings");
                    settings
                }
                Err(err) => {
                    warn!(error = ?err, "falling back to default settings");
                    DexSettings::default()
                }
            }
        };

        app.insert_resource(settings);
    }
}
