use std::path::Path;

use vetlab_engine::Locale;

use crate::paths;

/// Drop factor (gtt/mL) of a standard macro-drip infusion set.
pub const DEFAULT_DROP_FACTOR: f64 = 20.0;

/// User settings resolved from `config.toml` and the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub locale: Locale,
    /// Used by `vetlab dose` when `--drop-factor` is not given.
    pub drop_factor: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            drop_factor: DEFAULT_DROP_FACTOR,
        }
    }
}

/// Private: parsed representation of a vetlab config file.
#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    display: Option<DisplaySection>,
    dose: Option<DoseSection>,
}

#[derive(serde::Deserialize)]
struct DisplaySection {
    locale: Option<String>,
}

#[derive(serde::Deserialize)]
struct DoseSection {
    drop_factor: Option<f64>,
}

/// Missing file is silent; an unreadable or malformed one is logged.
fn read_config(path: &Path) -> Option<ConfigFile> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!("cannot read {}: {e}", path.display());
            return None;
        }
    };
    toml::from_str(&content)
        .inspect_err(|e| tracing::warn!("ignoring malformed {}: {e}", path.display()))
        .ok()
}

fn parse_locale(raw: &str, source: &str) -> Option<Locale> {
    raw.parse()
        .inspect_err(|e| tracing::warn!("{source}: {e}"))
        .ok()
}

impl Settings {
    /// Load settings from the user config file, then apply `VETLAB_LOCALE`.
    pub fn load() -> Self {
        let env_locale = std::env::var("VETLAB_LOCALE").ok();
        Self::load_from(paths::config_path().as_deref(), env_locale.as_deref())
    }

    /// Load settings from explicit sources. Useful for testing.
    /// Priority: `env_locale` → config file → defaults.
    pub fn load_from(config: Option<&Path>, env_locale: Option<&str>) -> Self {
        let file = config.and_then(read_config).unwrap_or_default();
        let mut settings = Self::default();

        if let Some(raw) = file.display.and_then(|d| d.locale)
            && let Some(locale) = parse_locale(&raw, "config [display] locale")
        {
            settings.locale = locale;
        }
        if let Some(gtt) = file.dose.and_then(|d| d.drop_factor) {
            if gtt.is_finite() && gtt > 0.0 {
                settings.drop_factor = gtt;
            } else {
                tracing::warn!("config [dose] drop_factor must be positive, got {gtt}");
            }
        }
        if let Some(raw) = env_locale.filter(|v| !v.trim().is_empty())
            && let Some(locale) = parse_locale(raw, "VETLAB_LOCALE")
        {
            settings.locale = locale;
        }
        settings
    }
}
