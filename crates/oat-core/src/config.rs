use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level project configuration loaded from `.oat.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OatConfig {
    pub input: String,
    /// Where to write the tool list. `None` prints to stdout.
    pub output: Option<String>,
    pub format: OutputFormat,
    pub extraction: VisitOptions,
}

impl Default for OatConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: None,
            format: OutputFormat::Json,
            extraction: VisitOptions::default(),
        }
    }
}

/// Serialization of the converted tool list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Per-visit switches for which schema annotations are carried over.
///
/// Both are off by default to keep emitted schemas small.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VisitOptions {
    /// Copy `description` onto primitive schemas.
    pub extract_description: bool,
    /// Copy `default` onto primitive schemas.
    pub extract_default: bool,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".oat.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OatConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: OatConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# oat configuration - https://github.com/urmzd/openapi-tools
input: openapi.yaml     # .json, .yaml or .yml
# output: tools.json    # omit to print to stdout
format: json            # json | yaml

extraction:
  extract_description: false   # copy `description` onto primitive schemas
  extract_default: false       # copy `default` onto primitive schemas
"#
}
