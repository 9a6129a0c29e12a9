use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::ConfigError;

/// Structure representing the plugin configuration. Contains the registration
/// parameters of one writer instance along with pathing and test-pattern
/// information. Configs are serializable and deserializable to YAML using
/// serde and serde_yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub port_name: String,
    pub output_path: PathBuf,
    pub max_payload_bytes: usize,
    pub queue_size: usize,
    pub blocking_callbacks: bool,
    pub log_attributes: bool,
    pub capture_number: i32,
    pub n_frames: usize,
    pub events_per_frame: usize,
}

impl Default for Config {
    /// Generate a new Config object. Path fields will be empty/invalid
    fn default() -> Self {
        Self {
            port_name: String::from("GE1"),
            output_path: PathBuf::from("None"),
            max_payload_bytes: 1_048_576,
            queue_size: 20,
            blocking_callbacks: false,
            log_attributes: false,
            capture_number: 0,
            n_frames: 0,
            events_per_frame: 0,
        }
    }
}

impl Config {
    /// Read the configuration in a YAML file
    /// Returns a Config if successful
    pub fn read_config_file(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::BadFilePath(config_path.to_path_buf()));
        }

        let yaml_str = std::fs::read_to_string(config_path)?;

        Ok(serde_yaml::from_str::<Self>(&yaml_str)?)
    }

    /// Get the path to the output Ge file for a given capture number
    pub fn get_ge_file_name(&self, capture_number: i32) -> Result<PathBuf, ConfigError> {
        let ge_file_path: PathBuf = self
            .output_path
            .join(format!("{}_{capture_number:0>4}.ge", self.port_name));
        if self.output_path.exists() {
            Ok(ge_file_path)
        } else {
            Err(ConfigError::BadFilePath(self.output_path.clone()))
        }
    }

    pub fn is_n_frames_valid(&self) -> bool {
        self.n_frames >= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_round_trip() {
        let config = Config {
            port_name: String::from("GE2"),
            output_path: PathBuf::from("/data/maia"),
            log_attributes: true,
            n_frames: 100,
            events_per_frame: 512,
            ..Default::default()
        };

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, serde_yaml::to_string(&config).unwrap()).unwrap();

        let loaded = Config::read_config_file(&path).unwrap();
        assert_eq!(loaded.port_name, "GE2");
        assert_eq!(loaded.output_path, PathBuf::from("/data/maia"));
        assert!(loaded.log_attributes);
        assert_eq!(loaded.n_frames, 100);
        assert_eq!(loaded.events_per_frame, 512);
        assert_eq!(loaded.queue_size, 20);
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::read_config_file(Path::new("/no/such/config.yml"));
        assert!(matches!(result, Err(ConfigError::BadFilePath(_))));
    }

    #[test]
    fn test_ge_file_name() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            output_path: dir.path().to_path_buf(),
            ..Default::default()
        };

        let path = config.get_ge_file_name(7).unwrap();
        assert_eq!(path, dir.path().join("GE1_0007.ge"));
    }

    #[test]
    fn test_ge_file_name_requires_output_directory() {
        let config = Config {
            output_path: PathBuf::from("/no/such/dir"),
            ..Default::default()
        };
        assert!(matches!(
            config.get_ge_file_name(0),
            Err(ConfigError::BadFilePath(_))
        ));
    }
}
