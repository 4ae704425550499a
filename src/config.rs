// Mon Oct 12 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Searched in order when no config file is given on the command line.
pub const CONFIG_CANDIDATES: [&str; 4] = [
    "config.yaml",
    "config.yml",
    "config/config.yaml",
    "config/config.yml",
];

pub const MAX_TIMEOUT_SECONDS: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanProfile {
    #[default]
    Quick,
    Full,
    Stealth,
}

impl ScanProfile {
    pub const ALL: [ScanProfile; 3] = [ScanProfile::Quick, ScanProfile::Full, ScanProfile::Stealth];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScanProfile::Quick => "quick",
            ScanProfile::Full => "full",
            ScanProfile::Stealth => "stealth",
        }
    }

    pub fn default_timeout(&self) -> Duration {
        match self {
            ScanProfile::Quick => Duration::from_secs(300),
            ScanProfile::Full => Duration::from_secs(1800),
            ScanProfile::Stealth => Duration::from_secs(900),
        }
    }
}

impl fmt::Display for ScanProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quick" => Ok(ScanProfile::Quick),
            "full" => Ok(ScanProfile::Full),
            "stealth" => Ok(ScanProfile::Stealth),
            other => Err(format!("unknown scan profile '{}' (expected quick, full or stealth)", other)),
        }
    }
}

/// What the CLI prints to stdout once a run finishes. Report files are always JSON, Markdown and HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected text or json)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub target: String,
    pub profile: ScanProfile,
    /// Empty means every registered module.
    pub modules: Vec<String>,
    pub skip_modules: Vec<String>,
    pub output_dir: PathBuf,
    pub output_format: OutputFormat,
    pub rate_limit: u32,
    pub timeout_seconds: Option<u64>,
    pub verbose: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            target: String::new(),
            profile: ScanProfile::Quick,
            modules: Vec::new(),
            skip_modules: Vec::new(),
            output_dir: PathBuf::from("results"),
            output_format: OutputFormat::Text,
            rate_limit: 10,
            timeout_seconds: None,
            verbose: false,
        }
    }
}

impl ScanConfig {
    pub fn new(target: &str) -> Self {
        Self::default().with_target(target)
    }

    pub fn with_target(mut self, target: &str) -> Self {
        self.target = target.to_string();
        self
    }

    pub fn with_profile(mut self, profile: ScanProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules = modules.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_skip_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_modules = modules.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_output_dir<P: Into<PathBuf>>(mut self, output_dir: P) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_rate_limit(mut self, rate_limit: u32) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or_else(|| self.profile.default_timeout())
    }

    pub fn is_module_selected(&self, name: &str) -> bool {
        if self.skip_modules.iter().any(|m| m.eq_ignore_ascii_case(name)) {
            return false;
        }

        if self.modules.is_empty() {
            return true;
        }

        self.modules.iter().any(|m| m.eq_ignore_ascii_case(name))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rate_limit == 0 {
            return Err(ConfigError::Validation("rate_limit must be > 0".to_string()));
        }

        match self.timeout_seconds {
            Some(0) => {
                return Err(ConfigError::Validation("timeout_seconds must be > 0".to_string()));
            }
            Some(secs) if secs > MAX_TIMEOUT_SECONDS => {
                return Err(ConfigError::Validation(format!(
                    "timeout_seconds must be at most {}",
                    MAX_TIMEOUT_SECONDS
                )));
            }
            _ => {}
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("output_dir must not be empty".to_string()));
        }

        if self.modules.iter().chain(self.skip_modules.iter()).any(|m| m.trim().is_empty()) {
            return Err(ConfigError::Validation("module names must not be empty".to_string()));
        }

        Ok(())
    }

    /// First existing entry of `CONFIG_CANDIDATES` under `dir`.
    pub fn discover_in<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
        let dir = dir.as_ref();
        CONFIG_CANDIDATES
            .iter()
            .map(|candidate| dir.join(candidate))
            .find(|path| path.is_file())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;

        let ext = path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        match ext.to_lowercase().as_str() {
            "json" => serde_json::from_str(&contents)
                .map_err(|e| ConfigError::Parse(e.to_string())),
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(ext.to_string())),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        let ext = path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("json");

        let contents = match ext.to_lowercase().as_str() {
            "json" => serde_json::to_string_pretty(self)
                .map_err(|e| ConfigError::Parse(e.to_string()))?,
            "yaml" | "yml" => serde_yaml::to_string(self)
                .map_err(|e| ConfigError::Parse(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(ext.to_string())),
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, contents)?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("unsupported config format: '{0}' (expected json, yaml or yml)")]
    UnsupportedFormat(String),

    #[error("invalid config: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.profile, ScanProfile::Quick);
        assert_eq!(config.output_format, OutputFormat::Text);
        assert_eq!(config.output_dir, PathBuf::from("results"));
        assert_eq!(config.rate_limit, 10);
        assert_eq!(config.timeout(), Duration::from_secs(300));
        assert!(!config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_profile_timeout_and_override() {
        let config = ScanConfig::new("example.com").with_profile(ScanProfile::Full);
        assert_eq!(config.timeout(), Duration::from_secs(1800));

        let config = config.with_timeout_seconds(42);
        assert_eq!(config.timeout(), Duration::from_secs(42));
    }

    #[test]
    fn test_parse_profile_and_format() {
        assert_eq!("STEALTH".parse::<ScanProfile>().unwrap(), ScanProfile::Stealth);
        assert!("aggressive".parse::<ScanProfile>().is_err());
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_module_selection() {
        let all = ScanConfig::new("example.com");
        assert!(all.is_module_selected("ports"));

        let some = ScanConfig::new("example.com").with_modules(["subdomains", "Ports"]);
        assert!(some.is_module_selected("ports"));
        assert!(some.is_module_selected("subdomains"));
        assert!(!some.is_module_selected("web"));

        let skipped = some.with_skip_modules(["ports"]);
        assert!(!skipped.is_module_selected("ports"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            ScanConfig::default().with_rate_limit(0).validate(),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            ScanConfig::default().with_timeout_seconds(0).validate(),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            ScanConfig::default().with_timeout_seconds(MAX_TIMEOUT_SECONDS + 1).validate(),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            ScanConfig::default().with_output_dir("").validate(),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            ScanConfig::default().with_modules([" "]).validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_load_yaml_with_partial_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.yaml");
        fs::write(&path, "target: example.com\nprofile: stealth\nmodules:\n  - ports\nrate_limit: 3\n").unwrap();

        let config = ScanConfig::load(&path).unwrap();
        assert_eq!(config.target, "example.com");
        assert_eq!(config.profile, ScanProfile::Stealth);
        assert_eq!(config.modules, vec!["ports".to_string()]);
        assert_eq!(config.rate_limit, 3);
        assert_eq!(config.output_dir, PathBuf::from("results"));
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scan.json");
        let config = ScanConfig::new("10.0.0.1")
            .with_output_format(OutputFormat::Json)
            .with_timeout_seconds(60);

        config.save(&path).unwrap();
        assert_eq!(ScanConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(ScanConfig::load(&missing), Err(ConfigError::NotFound(_))));

        let toml = dir.path().join("scan.toml");
        fs::write(&toml, "target = 'x'").unwrap();
        assert!(matches!(ScanConfig::load(&toml), Err(ConfigError::UnsupportedFormat(_))));

        let broken = dir.path().join("scan.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(ScanConfig::load(&broken), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_discover_config_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(ScanConfig::discover_in(dir.path()), None);

        let nested = dir.path().join("config");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("config.yml"), "target: nested.example\n").unwrap();
        let found = ScanConfig::discover_in(dir.path()).unwrap();
        assert_eq!(found, nested.join("config.yml"));
        assert_eq!(ScanConfig::load(&found).unwrap().target, "nested.example");

        // a directory named like a candidate is skipped
        fs::create_dir_all(dir.path().join("config.yaml")).unwrap();
        assert_eq!(ScanConfig::discover_in(dir.path()), Some(nested.join("config.yml")));

        fs::write(dir.path().join("config.yml"), "target: top.example\n").unwrap();
        assert_eq!(ScanConfig::discover_in(dir.path()), Some(dir.path().join("config.yml")));
    }
}
