use crate::error::{HostProbeError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE_NAME: &str = "hostprobe.toml";
const TIMEOUT_ENV_VAR: &str = "HOSTPROBE_COMMAND_TIMEOUT_SECS";
const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LDD_PROBE_BINARY: &str = "/bin/ls";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Upper bound for every external command. Zero waits indefinitely.
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,

    /// Binary handed to `ldd` when tracing the C library.
    #[serde(default = "default_ldd_probe_binary")]
    pub ldd_probe_binary: String,

    #[serde(default)]
    pub paths: ProbePaths,
}

/// Well-known host locations consulted by the detectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbePaths {
    #[serde(default = "default_os_release")]
    pub os_release: PathBuf,

    #[serde(default = "default_passwd")]
    pub passwd: PathBuf,

    #[serde(default = "default_library_dir")]
    pub library_dir: PathBuf,

    #[serde(default = "default_mapped_files_dir")]
    pub mapped_files_dir: PathBuf,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
            ldd_probe_binary: default_ldd_probe_binary(),
            paths: ProbePaths::default(),
        }
    }
}

impl Default for ProbePaths {
    fn default() -> Self {
        Self {
            os_release: default_os_release(),
            passwd: default_passwd(),
            library_dir: default_library_dir(),
            mapped_files_dir: default_mapped_files_dir(),
        }
    }
}

fn default_command_timeout_secs() -> u64 {
    DEFAULT_COMMAND_TIMEOUT_SECS
}

fn default_ldd_probe_binary() -> String {
    DEFAULT_LDD_PROBE_BINARY.to_string()
}

fn default_os_release() -> PathBuf {
    PathBuf::from("/etc/os-release")
}

fn default_passwd() -> PathBuf {
    PathBuf::from("/etc/passwd")
}

fn default_library_dir() -> PathBuf {
    PathBuf::from("/lib")
}

fn default_mapped_files_dir() -> PathBuf {
    PathBuf::from("/proc/self/map_files")
}

impl ProbeConfig {
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            let contents = fs::read_to_string(&config_path)?;
            let config: ProbeConfig = toml::from_str(&contents).map_err(|e| {
                HostProbeError::ConfigError(format!("Failed to parse {CONFIG_FILE_NAME}: {e}"))
            })?;
            log::debug!("Loaded config from {config_path:?}");
            config
        } else {
            log::debug!("Config file not found at {config_path:?}, using defaults");
            Self::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn save(&self, config_dir: &Path) -> Result<()> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| HostProbeError::ConfigError(format!("Failed to serialize config: {e}")))?;

        fs::write(&config_path, contents)?;
        log::debug!("Saved config to {config_path:?}");
        Ok(())
    }

    /// `None` means external commands may run without a deadline.
    pub fn command_timeout(&self) -> Option<Duration> {
        match self.command_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(value) = env::var(TIMEOUT_ENV_VAR) {
            self.command_timeout_secs = value.trim().parse().map_err(|_| {
                HostProbeError::ConfigError(format!(
                    "{TIMEOUT_ENV_VAR} must be a number of seconds, got '{value}'"
                ))
            })?;
            log::debug!(
                "Command timeout overridden to {}s by {TIMEOUT_ENV_VAR}",
                self.command_timeout_secs
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ProbeConfig::default();
        assert_eq!(config.command_timeout_secs, DEFAULT_COMMAND_TIMEOUT_SECS);
        assert_eq!(config.ldd_probe_binary, "/bin/ls");
        assert_eq!(config.paths.os_release, PathBuf::from("/etc/os-release"));
        assert_eq!(
            config.paths.mapped_files_dir,
            PathBuf::from("/proc/self/map_files")
        );
    }

    #[test]
    fn test_command_timeout() {
        let mut config = ProbeConfig::default();
        assert_eq!(config.command_timeout(), Some(Duration::from_secs(10)));

        config.command_timeout_secs = 0;
        assert_eq!(config.command_timeout(), None);
    }

    #[test]
    #[serial]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = ProbeConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, ProbeConfig::default());
    }

    #[test]
    #[serial]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();

        let mut config = ProbeConfig::default();
        config.command_timeout_secs = 3;
        config.paths.library_dir = PathBuf::from("/usr/lib");

        config.save(temp_dir.path()).unwrap();

        let loaded = ProbeConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    #[serial]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);

        fs::write(
            &config_path,
            r#"
ldd_probe_binary = "/bin/sh"

[paths]
os_release = "/usr/lib/os-release"
"#,
        )
        .unwrap();

        let loaded = ProbeConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.command_timeout_secs, DEFAULT_COMMAND_TIMEOUT_SECS);
        assert_eq!(loaded.ldd_probe_binary, "/bin/sh");
        assert_eq!(loaded.paths.os_release, PathBuf::from("/usr/lib/os-release"));
        assert_eq!(loaded.paths.library_dir, PathBuf::from("/lib"));
    }

    #[test]
    #[serial]
    fn test_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "command_timeout_secs = \"soon\"",
        )
        .unwrap();

        let err = ProbeConfig::load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, HostProbeError::ConfigError(_)));
    }

    #[test]
    #[serial]
    fn test_env_override() {
        let temp_dir = TempDir::new().unwrap();

        unsafe { env::set_var(TIMEOUT_ENV_VAR, "42") };
        let loaded = ProbeConfig::load(temp_dir.path());
        unsafe { env::remove_var(TIMEOUT_ENV_VAR) };

        assert_eq!(loaded.unwrap().command_timeout_secs, 42);
    }

    #[test]
    #[serial]
    fn test_env_override_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();

        unsafe { env::set_var(TIMEOUT_ENV_VAR, "forever") };
        let loaded = ProbeConfig::load(temp_dir.path());
        unsafe { env::remove_var(TIMEOUT_ENV_VAR) };

        assert!(matches!(loaded, Err(HostProbeError::ConfigError(_))));
    }
}
