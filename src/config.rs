// src/config.rs - Configuration management
use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use validator::Validate;

use crate::models::{Location, ZoneName};
use crate::notification::{ClearPolicy, DEFAULT_DISPLAY_MS};
use crate::repositories::{DEFAULT_SLOT_COUNT, MAX_ZONES};
use crate::timestamp::TimestampStyle;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub notification: NotificationConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, Validate)]
#[serde(default)]
pub struct StorageConfig {
    #[validate(length(min = 1, max = 26, message = "Between 1 and 26 default zones are required"))]
    pub default_zones: Vec<String>,
    #[validate(range(min = 1, max = 99, message = "Default slot count must be between 1 and 99"))]
    pub default_slot_count: u8,
    #[validate(range(min = 1, max = 26, message = "Max zones must be between 1 and 26"))]
    pub max_zones: usize,
    pub initial_expanded: Vec<String>,
    pub initial_location: String,
}

#[derive(Debug, Deserialize, Clone, Validate)]
#[serde(default)]
pub struct NotificationConfig {
    #[validate(range(min = 100, max = 60000, message = "Display time must be between 100 and 60000 ms"))]
    pub display_ms: u64,
    pub clear_policy: ClearPolicy,
    #[validate(range(min = 10, max = 5000, message = "Tick interval must be between 10 and 5000 ms"))]
    pub tick_ms: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DisplayConfig {
    pub timestamp_style: TimestampStyle,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            default_zones: ["A", "B", "C", "D", "E"].iter().map(|z| z.to_string()).collect(),
            default_slot_count: DEFAULT_SLOT_COUNT,
            max_zones: MAX_ZONES,
            initial_expanded: vec!["A".to_string()],
            initial_location: "A-01".to_string(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            display_ms: DEFAULT_DISPLAY_MS,
            clear_policy: ClearPolicy::default(),
            tick_ms: 250,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

pub fn load_config() -> Result<Config> {
    load_env_file()?;

    let mut config = match env::var("CONFIG_FILE") {
        Ok(config_file) => Config::from_file(Path::new(&config_file))?,
        Err(_) => Config::default(),
    };

    override_with(&mut config, |key| env::var(key).ok())?;

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

/// Переопределения из окружения; `lookup` подменяется в тестах
pub fn override_with<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(zones) = lookup("STORAGE_DEFAULT_ZONES") {
        config.storage.default_zones = zones
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Some(slots) = lookup("STORAGE_DEFAULT_SLOTS") {
        config.storage.default_slot_count = slots
            .parse()
            .with_context(|| format!("Invalid STORAGE_DEFAULT_SLOTS: {}", slots))?;
    }
    if let Some(max) = lookup("STORAGE_MAX_ZONES") {
        config.storage.max_zones = max
            .parse()
            .with_context(|| format!("Invalid STORAGE_MAX_ZONES: {}", max))?;
    }
    if let Some(display) = lookup("NOTIFICATION_DISPLAY_MS") {
        config.notification.display_ms = display
            .parse()
            .with_context(|| format!("Invalid NOTIFICATION_DISPLAY_MS: {}", display))?;
    }
    if let Some(policy) = lookup("NOTIFICATION_CLEAR_POLICY") {
        config.notification.clear_policy = policy
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid NOTIFICATION_CLEAR_POLICY: {}", policy))?;
    }
    if let Some(style) = lookup("TIMESTAMP_STYLE") {
        config.display.timestamp_style = style
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid TIMESTAMP_STYLE: {}", style))?;
    }
    if let Some(level) = lookup("RUST_LOG") {
        config.logging.level = level;
    }

    Ok(())
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        Validate::validate(&self.storage)?;
        Validate::validate(&self.notification)?;

        let storage = &self.storage;
        if storage.default_zones.len() > storage.max_zones {
            return Err(anyhow::anyhow!(
                "default_zones ({}) must not exceed max_zones ({})",
                storage.default_zones.len(),
                storage.max_zones
            ));
        }

        let mut zones: Vec<ZoneName> = Vec::with_capacity(storage.default_zones.len());
        for raw in &storage.default_zones {
            let zone: ZoneName = raw.parse()?;
            if zones.contains(&zone) {
                return Err(anyhow::anyhow!("Duplicate default zone: {}", zone));
            }
            zones.push(zone);
        }

        for raw in &storage.initial_expanded {
            let zone: ZoneName = raw.parse()?;
            if !zones.contains(&zone) {
                return Err(anyhow::anyhow!("Expanded zone {} is not a default zone", zone));
            }
        }

        let location: Location = storage.initial_location.parse()?;
        if !zones.contains(location.zone()) || location.slot() > storage.default_slot_count {
            return Err(anyhow::anyhow!(
                "Initial location {} is outside the default zones",
                location
            ));
        }

        Ok(())
    }

    pub fn print_startup_info(&self) {
        log::info!("🧪 Specimen storage starting up...");
        log::info!(
            "📦 Zones: {} ({} slots each, max {})",
            self.storage.default_zones.join(", "),
            self.storage.default_slot_count,
            self.storage.max_zones
        );
        log::info!(
            "🔔 Notifications: {} ms ({})",
            self.notification.display_ms,
            self.notification.clear_policy
        );
        log::info!("🕒 Timestamps: {}", self.display.timestamp_style);
        log::info!("📊 Logging: {} level", self.logging.level);
    }
}

pub fn load_env_file() -> Result<()> {
    if let Ok(env_file) = env::var("ENV_FILE") {
        dotenvy::from_filename(&env_file)
            .with_context(|| format!("Failed to load environment file: {}", env_file))?;
    } else if Path::new(".env").exists() {
        dotenvy::dotenv().context("Failed to load .env file")?;
    }
    Ok(())
}
