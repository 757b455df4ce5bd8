//! YAML configuration for a command handle.
//!
//! ```yaml
//! binary_path: /usr/local/bin/backup
//! params:
//!   --source: /var/data
//!   --retries: 3
//! ```
//!
//! Parameters keep the order they are written in.

use crate::params::Params;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmdConfig {
    pub binary_path: String,
    #[serde(default)]
    pub params: Params,
}

impl CmdConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        Self::load_from_string(&content)
    }

    /// Load configuration from a YAML string
    pub fn load_from_string(content: &str) -> Result<Self> {
        let config: CmdConfig =
            serde_yaml::from_str(content).context("Failed to parse YAML configuration")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        hsu_process::validate_executable(&self.binary_path)
            .context("Invalid binary_path")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_string() {
        let yaml = r#"
binary_path: /usr/bin/rsync
params:
  --dest: /backup
  --bwlimit: 500
  --src: /data
"#;
        let config = CmdConfig::load_from_string(yaml).unwrap();

        assert_eq!(config.binary_path, "/usr/bin/rsync");
        assert_eq!(
            config.params.to_args(),
            vec!["--dest", "/backup", "--bwlimit", "500", "--src", "/data"]
        );
    }

    #[test]
    fn test_serialized_config_keeps_param_order() {
        let mut config = CmdConfig {
            binary_path: "/usr/bin/tool".to_string(),
            params: Params::new(),
        };
        config.params.set("--zeta", "last");
        config.params.set("--alpha", "1");

        let yaml = serde_yaml::to_string(&config).unwrap();
        let zeta = yaml.find("--zeta").unwrap();
        let alpha = yaml.find("--alpha").unwrap();
        assert!(zeta < alpha, "params reordered in:\n{}", yaml);

        let reloaded = CmdConfig::load_from_string(&yaml).unwrap();
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.params.to_args(), vec!["--zeta", "last", "--alpha", "1"]);
    }

    #[test]
    fn test_params_default_to_empty() {
        let config = CmdConfig::load_from_string("binary_path: echo\n").unwrap();
        assert!(config.params.is_empty());
    }

    #[test]
    fn test_empty_binary_path_rejected() {
        let err = CmdConfig::load_from_string("binary_path: \"\"\n").unwrap_err();
        assert!(format!("{:#}", err).contains("Executable path cannot be empty"));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        let err = CmdConfig::load_from_string("binary_path: [unclosed\n").unwrap_err();
        assert!(err.to_string().contains("Failed to parse YAML configuration"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "binary_path: sh").unwrap();
        writeln!(file, "params:").unwrap();
        writeln!(file, "  -c: \"exit 3\"").unwrap();

        let config = CmdConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.binary_path, "sh");
        assert_eq!(config.params.get("-c"), Some("exit 3"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");

        let err = CmdConfig::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
        assert!(err.to_string().contains("missing.yaml"));
    }
}
