use crate::domain::entities::AppConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub struct ConfigRepository {
    config_path: PathBuf,
}

impl ConfigRepository {
    pub fn new() -> Self {
        let config_dir = if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home).join(".config").join("placement-dash")
        } else {
            PathBuf::from(".")
        };

        Self::at(config_dir.join("config.json"))
    }

    pub fn at(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn load(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            return Ok(AppConfig::default());
        }

        let content =
            fs::read_to_string(&self.config_path).context("Failed to read config file")?;

        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, content).context("Failed to write config file")?;

        Ok(())
    }
}

impl Default for ConfigRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ExportFormat;

    #[test]
    fn missing_file_loads_defaults_and_save_round_trips() {
        let dir = std::env::temp_dir().join(format!("placement-dash-test-{}", std::process::id()));
        let repository = ConfigRepository::at(dir.join("nested").join("config.json"));

        assert_eq!(repository.load().unwrap(), AppConfig::default());

        let config = AppConfig {
            scope: "peso".to_string(),
            export_format: ExportFormat::Pdf,
            ..AppConfig::default()
        };
        repository.save(&config).unwrap();
        assert_eq!(repository.load().unwrap(), config);

        let _ = fs::remove_dir_all(dir);
    }
}
