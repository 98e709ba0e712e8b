//! Resolves an enemy's vulnerability list into icons and tooltips.

use {
    bevy::prelude::*,
    dex_components::Vulnerability,
    dex_resources::{StatusCatalog, StatusIcons},
};

/// Tint of an icon for a status the enemy resists.
pub const RESISTED_TINT: Color = Color::srgba(0.4, 0.4, 0.4, 0.4);
pub const VULNERABLE_TINT: Color = Color::WHITE;

#[derive(Debug, Clone, PartialEq)]
pub struct StatusDisplay {
    pub icon: Handle<Image>,
    /// Only used as hover text
    pub display_name: Option<String>,
}

/// Looks up the icon and name of a status. No icon means nothing to show.
pub fn describe(
    status_id: u32,
    icons: &StatusIcons,
    catalog: &StatusCatalog,
) -> Option<StatusDisplay> {
    let icon = icons.icon(status_id)?.clone();
    let display_name = catalog.name(status_id).map(ToString::to_string);

    if display_name.is_none() {
        debug!(status_id, "status has an icon but no name, no tooltip");
    }

    Some(StatusDisplay { icon, display_name })
}

#[derive(Debug, Clone, PartialEq)]
pub struct VulnerabilityView {
    pub status_id: u32,
    pub icon: Handle<Image>,
    pub tooltip: Option<String>,
    pub is_vulnerable: bool,
}

impl VulnerabilityView {
    pub fn tint(&self) -> Color {
        if self.is_vulnerable {
            VULNERABLE_TINT
        } else {
            RESISTED_TINT
        }
    }
}

/// Keeps the content order and skips statuses without an icon entirely.
pub fn vulnerability_views(
    vulnerabilities: &[Vulnerability],
    icons: &StatusIcons,
    catalog: &StatusCatalog,
) -> Vec<VulnerabilityView> {
    vulnerabilities
        .iter()
        .filter_map(|vulnerability| {
            let Some(display) = describe(vulnerability.status_id, icons, catalog) else {
                debug!(
                    status_id = vulnerability.status_id,
                    "no icon for status, skipping"
                );
                return None;
            };

            Some(VulnerabilityView {
                status_id: vulnerability.status_id,
                icon: display.icon,
                tooltip: display.display_name,
                is_vulnerable: vulnerability.is_vulnerable,
            })
        })
        .collect()
}
