use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, Result, WrapErr};
use serde::Deserialize;

use crate::calendar::{Organization, Organizations};
use crate::theme::{parse_color, Theme};

/// Everything read from the config file, resolved into runtime values.
#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub organizations: Organizations,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            organizations: Organizations::default(),
        }
    }
}

impl Config {
    /// Loads `explicit` if given (it must exist), otherwise the default
    /// location if present, otherwise built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(eyre!("config file {} does not exist", path.display()));
                }
                path.to_path_buf()
            }
            None => match default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    tracing::info!("no config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("reading config {}", path.display()))?;
        let config = Self::from_toml(&content)
            .wrap_err_with(|| format!("parsing config {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            theme = %config.theme.name,
            organizations = config.organizations.ids().len(),
            "loaded config"
        );
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.resolve())
    }
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("org-calendar").join("config.toml"))
}

// ── TOML config types ──

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    preset: Option<String>,
    today_fg: Option<String>,
    today_bg: Option<String>,
    selected_fg: Option<String>,
    selected_bg: Option<String>,
    header_fg: Option<String>,
    dim_fg: Option<String>,
    border_fg: Option<String>,
    status_fg: Option<String>,
    status_bg: Option<String>,
    accent: Option<String>,
    #[serde(default)]
    organizations: Vec<OrganizationEntry>,
}

#[derive(Debug, Deserialize)]
struct OrganizationEntry {
    id: String,
    /// Display name; the id when absent.
    name: Option<String>,
    color: String,
}

impl ConfigFile {
    fn resolve(self) -> Config {
        let organizations = if self.organizations.is_empty() {
            Organizations::default()
        } else {
            Organizations::new(self.organizations.iter().filter_map(|entry| {
                match parse_color(&entry.color) {
                    Some(color) => {
                        let name = entry.name.as_deref().unwrap_or(&entry.id);
                        Some(Organization::new(entry.id.as_str(), name, color))
                    }
                    None => {
                        tracing::warn!(org = %entry.id, color = %entry.color, "skipping organization with unparsable color");
                        None
                    }
                }
            }))
        };

        Config {
            theme: self.theme(),
            organizations,
        }
    }

    fn theme(&self) -> Theme {
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        let color = |value: &Option<String>| value.as_deref().and_then(parse_color);

        if let Some(c) = color(&self.today_fg) {
            theme.today = theme.today.fg(c);
        }
        if let Some(c) = color(&self.today_bg) {
            theme.today = theme.today.bg(c);
        }
        if let Some(c) = color(&self.selected_fg) {
            theme.selected = theme.selected.fg(c);
        }
        if let Some(c) = color(&self.selected_bg) {
            theme.selected = theme.selected.bg(c);
        }
        if let Some(c) = color(&self.header_fg) {
            theme.header = theme.header.fg(c);
        }
        if let Some(c) = color(&self.dim_fg) {
            theme.dim = theme.dim.fg(c);
        }
        if let Some(c) = color(&self.border_fg) {
            theme.border = theme.border.fg(c);
        }
        if let Some(c) = color(&self.status_fg) {
            theme.status = theme.status.fg(c);
        }
        if let Some(c) = color(&self.status_bg) {
            theme.status = theme.status.bg(c);
        }
        if let Some(c) = color(&self.accent) {
            theme.accent = c;
        }

        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::OrgId;
    use ratatui::style::Color;

    #[test]
    fn empty_file_is_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.theme, Theme::default());
        assert_eq!(config.organizations.ids().len(), 5);
    }

    #[test]
    fn preset_with_overrides() {
        let config = Config::from_toml(
            r##"
            preset = "nord"
            selected_bg = "magenta"
            accent = "#010203"
            "##,
        )
        .unwrap();
        assert_eq!(config.theme.name, "nord");
        assert_eq!(config.theme.selected.bg, Some(Color::Magenta));
        assert_eq!(config.theme.accent, Color::Rgb(1, 2, 3));
    }

    #[test]
    fn organizations_replace_defaults() {
        let config = Config::from_toml(
            r##"
            [[organizations]]
            id = "north"
            name = "North Holdings"
            color = "#ff0000"

            [[organizations]]
            id = "south"
            color = "blue"

            [[organizations]]
            id = "broken"
            color = "not-a-color"
            "##,
        )
        .unwrap();
        let ids: Vec<&str> = config.organizations.ids().iter().map(|o| o.as_str()).collect();
        assert_eq!(ids, ["north", "south"]);
        assert_eq!(
            config.organizations.color(&OrgId::new("south")),
            Some(Color::Blue)
        );
        assert_eq!(config.organizations.name(&OrgId::new("north")), "North Holdings");
        assert_eq!(config.organizations.name(&OrgId::new("south")), "south");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Config::from_toml("preset = [").is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let path = std::env::temp_dir().join("org-calendar-definitely-missing.toml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
