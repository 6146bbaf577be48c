//! Application-level configuration loading: bind address and database file per panel.

use std::{
    env,
    ffi::OsString,
    fs,
    io::ErrorKind,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the servers look for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "BROADCAST_PANELS_CONFIG_PATH";
/// Environment variable that overrides the selected panel's database file.
const DATABASE_PATH_ENV: &str = "DATABASE_PATH";

/// The three independent control panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Scoreboard,
    Overlay,
    Schedule,
}

impl Panel {
    pub fn name(self) -> &'static str {
        match self {
            Panel::Scoreboard => "scoreboard",
            Panel::Overlay => "program-overlay",
            Panel::Schedule => "schedule",
        }
    }
}

/// Port and database file of one panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    pub port: u16,
    pub database: PathBuf,
}

/// Resolved settings a panel binary starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSettings {
    pub addr: SocketAddr,
    pub database: PathBuf,
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared by the panel binaries.
pub struct AppConfig {
    host: IpAddr,
    scoreboard: PanelConfig,
    overlay: PanelConfig,
    schedule: PanelConfig,
}

impl AppConfig {
    /// Load the configuration from disk, falling back to the built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    info!(path = %path.display(), "loaded panel configuration");
                    raw.into()
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Settings for `panel`, with `PORT`/`SERVER_PORT` and `DATABASE_PATH` applied on top.
    pub fn panel(&self, panel: Panel) -> PanelSettings {
        let port = env::var("PORT").or_else(|_| env::var("SERVER_PORT")).ok();
        self.panel_with_overrides(panel, port.as_deref(), env::var_os(DATABASE_PATH_ENV))
    }

    fn panel_with_overrides(
        &self,
        panel: Panel,
        port: Option<&str>,
        database: Option<OsString>,
    ) -> PanelSettings {
        let base = match panel {
            Panel::Scoreboard => &self.scoreboard,
            Panel::Overlay => &self.overlay,
            Panel::Schedule => &self.schedule,
        };

        let port = match port.map(str::parse::<u16>) {
            Some(Ok(port)) => port,
            Some(Err(err)) => {
                warn!(error = %err, "ignoring invalid port override");
                base.port
            }
            None => base.port,
        };
        let database = database
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| base.database.clone());

        PanelSettings {
            addr: SocketAddr::new(self.host, port),
            database,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            scoreboard: PanelConfig {
                port: 5000,
                database: PathBuf::from("database.db"),
            },
            overlay: PanelConfig {
                port: 5001,
                database: PathBuf::from("barriguda_tv.db"),
            },
            schedule: PanelConfig {
                port: 5002,
                database: PathBuf::from("grade_radio.db"),
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    host: Option<IpAddr>,
    #[serde(default)]
    scoreboard: RawPanel,
    #[serde(default)]
    overlay: RawPanel,
    #[serde(default)]
    schedule: RawPanel,
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of a single panel entry; missing keys keep the defaults.
struct RawPanel {
    port: Option<u16>,
    database: Option<PathBuf>,
}

impl RawPanel {
    fn over(self, base: PanelConfig) -> PanelConfig {
        PanelConfig {
            port: self.port.unwrap_or(base.port),
            database: self.database.unwrap_or(base.database),
        }
    }
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = AppConfig::default();
        Self {
            host: value.host.unwrap_or(defaults.host),
            scoreboard: value.scoreboard.over(defaults.scoreboard),
            overlay: value.overlay.over(defaults.overlay),
            schedule: value.schedule.over(defaults.schedule),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let raw: RawConfig = serde_json::from_str(
            r#"{ "host": "127.0.0.1", "overlay": { "port": 8080 } }"#,
        )
        .unwrap();
        let config = AppConfig::from(raw);

        let overlay = config.panel_with_overrides(Panel::Overlay, None, None);
        assert_eq!(overlay.addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(overlay.database, PathBuf::from("barriguda_tv.db"));

        let schedule = config.panel_with_overrides(Panel::Schedule, None, None);
        assert_eq!(schedule.addr.port(), 5002);
    }

    #[test]
    fn environment_overrides_win() {
        let config = AppConfig::default();
        let settings = config.panel_with_overrides(
            Panel::Scoreboard,
            Some("9000"),
            Some(OsString::from("/tmp/placar.db")),
        );
        assert_eq!(settings.addr.port(), 9000);
        assert_eq!(settings.database, PathBuf::from("/tmp/placar.db"));
    }

    #[test]
    fn invalid_port_override_is_ignored() {
        let config = AppConfig::default();
        let settings =
            config.panel_with_overrides(Panel::Scoreboard, Some("not-a-port"), Some(OsString::new()));
        assert_eq!(settings.addr.port(), 5000);
        assert_eq!(settings.database, PathBuf::from("database.db"));
    }
}
