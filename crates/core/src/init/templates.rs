//! Embedded template files for `.content-pipeline/` initialization.
//!
//! The `templates/` directory next to this crate's manifest is embedded into
//! the binary at compile time. With the `debug-embed` feature the files are
//! embedded in debug builds too, so tests see exactly what release ships.

use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/templates"]
pub struct TemplateAssets;

/// Get template file content by path.
///
/// # Example
/// ```
/// use cp_core::init::templates::get_template;
///
/// let config = get_template("config.toml").expect("config.toml should exist");
/// assert!(config.contains("[backend]"));
/// ```
pub fn get_template(path: &str) -> Option<String> {
    TemplateAssets::get(path).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// List every embedded template path.
pub fn list_templates() -> Vec<String> {
    let mut paths: Vec<String> = TemplateAssets::iter().map(|path| path.to_string()).collect();
    paths.sort();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use cp_protocol::config_models::{GenerationMode, GlobalConfig};

    #[test]
    fn test_config_template_parses_to_defaults() {
        let content = get_template("config.toml").expect("config.toml should be embedded");
        let parsed: GlobalConfig = toml::from_str(&content).unwrap();

        assert_eq!(parsed, GlobalConfig::default());
        assert_eq!(parsed.generation.mode, GenerationMode::Simulated);
    }

    #[test]
    fn test_gitignore_template_ignores_log() {
        let content = get_template("gitignore").unwrap();
        assert!(content.contains("content-pipeline.log"));
    }

    #[test]
    fn test_get_nonexistent_template() {
        assert!(get_template("nonexistent.txt").is_none());
    }

    #[test]
    fn test_list_templates() {
        assert_eq!(list_templates(), vec!["config.toml", "gitignore"]);
    }
}
