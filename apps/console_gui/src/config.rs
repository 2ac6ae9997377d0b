use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "console.toml";
const DATA_DIR_NAME: &str = "sentinalgrid_console";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base: String,
    pub user_email: String,
    pub request_timeout_secs: u64,
    pub notification_secs: u64,
    pub launch_refresh_delay_ms: u64,
    pub data_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8000".into(),
            user_email: "admin@sentinalgrid.com".into(),
            request_timeout_secs: 30,
            notification_secs: 5,
            launch_refresh_delay_ms: 1000,
            data_dir: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    api_base: Option<String>,
    user_email: Option<String>,
    request_timeout_secs: Option<u64>,
    notification_secs: Option<u64>,
    launch_refresh_delay_ms: Option<u64>,
    data_dir: Option<PathBuf>,
}

/// Overrides given on the command line; they win over every other layer.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub api_base: Option<String>,
    pub user_email: Option<String>,
    pub data_dir: Option<PathBuf>,
}

/// Fully validated settings the console runs with.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub api_base: Url,
    pub user_email: String,
    pub request_timeout: Duration,
    pub notification_ttl: Duration,
    pub launch_refresh_delay: Duration,
    pub data_dir: PathBuf,
}

/// Defaults, then the config file, then environment, then CLI flags.
pub fn load_settings(
    config_path: Option<&Path>,
    cli: &CliOverrides,
) -> anyhow::Result<ConsoleConfig> {
    let mut settings = Settings::default();

    match config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?;
            apply_file(&mut settings, &raw)
                .with_context(|| format!("invalid config file '{}'", path.display()))?;
        }
        None => match fs::read_to_string(DEFAULT_CONFIG_FILE) {
            Ok(raw) => apply_file(&mut settings, &raw)
                .with_context(|| format!("invalid config file '{DEFAULT_CONFIG_FILE}'"))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read config file '{DEFAULT_CONFIG_FILE}'"))
            }
        },
    }

    apply_env(&mut settings, |name| std::env::var(name).ok());
    apply_cli(&mut settings, cli);
    resolve(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.api_base {
        settings.api_base = v;
    }
    if let Some(v) = file_cfg.user_email {
        settings.user_email = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.notification_secs {
        settings.notification_secs = v;
    }
    if let Some(v) = file_cfg.launch_refresh_delay_ms {
        settings.launch_refresh_delay_ms = v;
    }
    if let Some(v) = file_cfg.data_dir {
        settings.data_dir = Some(v);
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    let non_empty = |name: &str| var(name).filter(|value| !value.trim().is_empty());

    if let Some(v) = non_empty("CONSOLE_API_BASE") {
        settings.api_base = v;
    }
    if let Some(v) = non_empty("APP__API_BASE") {
        settings.api_base = v;
    }

    if let Some(v) = non_empty("CONSOLE_USER_EMAIL") {
        settings.user_email = v;
    }

    if let Some(v) = non_empty("CONSOLE_REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(err) => tracing::warn!(value = %v, error = %err, "ignoring CONSOLE_REQUEST_TIMEOUT_SECS"),
        }
    }

    if let Some(v) = non_empty("CONSOLE_DATA_DIR") {
        settings.data_dir = Some(PathBuf::from(v));
    }
}

fn apply_cli(settings: &mut Settings, cli: &CliOverrides) {
    if let Some(v) = &cli.api_base {
        settings.api_base = v.clone();
    }
    if let Some(v) = &cli.user_email {
        settings.user_email = v.clone();
    }
    if let Some(v) = &cli.data_dir {
        settings.data_dir = Some(v.clone());
    }
}

fn resolve(settings: Settings) -> anyhow::Result<ConsoleConfig> {
    let api_base = parse_api_base(&settings.api_base)?;
    if settings.request_timeout_secs == 0 {
        bail!("request_timeout_secs must be greater than zero");
    }
    let data_dir = match settings.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };

    Ok(ConsoleConfig {
        api_base,
        user_email: settings.user_email,
        request_timeout: Duration::from_secs(settings.request_timeout_secs),
        notification_ttl: Duration::from_secs(settings.notification_secs),
        launch_refresh_delay: Duration::from_millis(settings.launch_refresh_delay_ms),
        data_dir,
    })
}

pub fn parse_api_base(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid api base url '{raw}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("invalid api base url '{raw}': unsupported scheme '{other}'"),
    }
}

fn default_data_dir() -> anyhow::Result<PathBuf> {
    dirs::data_local_dir()
        .map(|base| base.join(DATA_DIR_NAME))
        .context("could not resolve a per-user data directory; set CONSOLE_DATA_DIR or pass --data-dir")
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
