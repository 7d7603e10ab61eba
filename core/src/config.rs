//! Parser configuration.
//!
//! [`GetoptConfig`] collects every switch the engine honours. It can be built
//! in code or loaded from YAML; omitted keys keep their defaults.
//!
//! # Example YAML
//!
//! ```yaml
//! abbreviation: true
//! allow_empty_optarg: false
//! report_diagnostics: true
//! optional_short: true
//! permute: true
//! program_name: mytool
//! stop_at_double_hyphen: true
//! raise_on_error: false
//! diagnostic_style: standard
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Layout of the diagnostic line written for a rejected option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticStyle {
    /// `prog: unknown option - --name` (the default).
    #[default]
    Standard,
    /// `prog: unknown option - name`, without dashes.
    Legacy,
}

/// Switches controlling one engine.
///
/// # Examples
///
/// ```
/// use trad_getopt_core::GetoptConfig;
///
/// let config = GetoptConfig::default().with_permute(true).with_program_name("tool");
/// assert!(config.permute);
/// assert!(config.abbreviation);
/// assert_eq!(config.program_name(), "tool");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetoptConfig {
    /// Long options may be given as an unambiguous prefix.
    pub abbreviation: bool,
    /// An explicitly supplied empty value satisfies a value slot.
    pub allow_empty_optarg: bool,
    /// Write a diagnostic line for errors that are returned, not raised.
    pub report_diagnostics: bool,
    /// Honour `::` (optional value) in the short spec.
    pub optional_short: bool,
    /// Skip over plain arguments so options are found anywhere.
    pub permute: bool,
    /// Name used in diagnostics; the invocation basename when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_name: Option<String>,
    /// A bare `--` ends option parsing.
    pub stop_at_double_hyphen: bool,
    /// Return errors as `Err` faults instead of `Outcome::Error`.
    pub raise_on_error: bool,
    /// Diagnostic line layout.
    pub diagnostic_style: DiagnosticStyle,
}

impl Default for GetoptConfig {
    fn default() -> Self {
        Self {
            abbreviation: true,
            allow_empty_optarg: true,
            report_diagnostics: true,
            optional_short: true,
            permute: false,
            program_name: None,
            stop_at_double_hyphen: true,
            raise_on_error: false,
            diagnostic_style: DiagnosticStyle::Standard,
        }
    }
}

impl GetoptConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::ConfigError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::ConfigError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::ConfigError::IoError) if the file cannot
    /// be written, or [`YamlError`](crate::ConfigError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Returns the program name used in diagnostics.
    ///
    /// Falls back to the file name of the running executable.
    pub fn program_name(&self) -> String {
        if let Some(name) = &self.program_name {
            return name.clone();
        }
        std::env::args_os()
            .next()
            .as_deref()
            .map(Path::new)
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "getopt".to_string())
    }

    pub fn with_abbreviation(mut self, enabled: bool) -> Self {
        self.abbreviation = enabled;
        self
    }

    pub fn with_allow_empty_optarg(mut self, enabled: bool) -> Self {
        self.allow_empty_optarg = enabled;
        self
    }

    pub fn with_report_diagnostics(mut self, enabled: bool) -> Self {
        self.report_diagnostics = enabled;
        self
    }

    pub fn with_optional_short(mut self, enabled: bool) -> Self {
        self.optional_short = enabled;
        self
    }

    pub fn with_permute(mut self, enabled: bool) -> Self {
        self.permute = enabled;
        self
    }

    pub fn with_program_name(mut self, name: &str) -> Self {
        self.program_name = Some(name.to_string());
        self
    }

    pub fn with_stop_at_double_hyphen(mut self, enabled: bool) -> Self {
        self.stop_at_double_hyphen = enabled;
        self
    }

    pub fn with_raise_on_error(mut self, enabled: bool) -> Self {
        self.raise_on_error = enabled;
        self
    }

    pub fn with_diagnostic_style(mut self, style: DiagnosticStyle) -> Self {
        self.diagnostic_style = style;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = GetoptConfig::from_yaml("permute: true\ndiagnostic_style: legacy\n").unwrap();
        assert!(config.permute);
        assert!(config.abbreviation);
        assert!(config.stop_at_double_hyphen);
        assert_eq!(config.diagnostic_style, DiagnosticStyle::Legacy);
        assert_eq!(config.program_name, None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("getopt.yaml");

        let config = GetoptConfig::default()
            .with_abbreviation(false)
            .with_raise_on_error(true)
            .with_program_name("tool");
        config.save(&path).unwrap();

        let loaded = GetoptConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GetoptConfig::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, crate::ConfigError::IoError(_)));
    }
}
