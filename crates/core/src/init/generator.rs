//! File generation for `.content-pipeline/` initialization.

use super::error::{InitError, InitResult};
use super::templates::get_template;
use crate::config::CONFIG_DIR;
use std::fs;
use std::path::{Path, PathBuf};

/// Template path and the file name it is written under.
const FILES: [(&str, &str); 2] = [("config.toml", "config.toml"), ("gitignore", ".gitignore")];

/// Options for initializing a `.content-pipeline` directory.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Project root the directory is created in.
    pub target_dir: PathBuf,

    /// Overwrite an existing directory's template files.
    pub force: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
        }
    }
}

/// Generate the `.content-pipeline` directory.
///
/// ```text
/// .content-pipeline/
/// ├── config.toml
/// └── .gitignore
/// ```
///
/// Returns the paths written. Fails with `DirectoryExists` when the
/// directory is already there and `force` is not set.
pub async fn generate_project_structure(options: InitOptions) -> InitResult<Vec<PathBuf>> {
    let cp_dir = options.target_dir.join(CONFIG_DIR);

    if cp_dir.exists() && !options.force {
        return Err(InitError::DirectoryExists(cp_dir));
    }

    fs::create_dir_all(&cp_dir).map_err(|source| InitError::DirectoryCreate {
        path: cp_dir.clone(),
        source,
    })?;

    let mut written = Vec::new();
    for (template, file_name) in FILES {
        written.push(write_template_file(&cp_dir, template, file_name)?);
    }

    tracing::info!(dir = %cp_dir.display(), files = written.len(), "project initialized");
    Ok(written)
}

fn write_template_file(cp_dir: &Path, template: &str, file_name: &str) -> InitResult<PathBuf> {
    let content =
        get_template(template).ok_or_else(|| InitError::TemplateNotFound(template.to_string()))?;

    let target_path = cp_dir.join(file_name);
    fs::write(&target_path, content).map_err(|source| InitError::FileWrite {
        path: target_path.clone(),
        source,
    })?;

    Ok(target_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::load_config_with_override;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_generate_structure_success() {
        let dir = tempdir().unwrap();
        let options = InitOptions {
            target_dir: dir.path().to_path_buf(),
            force: false,
        };

        let written = generate_project_structure(options).await.unwrap();

        let cp_dir = dir.path().join(CONFIG_DIR);
        assert_eq!(written.len(), 2);
        assert!(cp_dir.join("config.toml").exists());
        assert!(cp_dir.join(".gitignore").exists());
    }

    #[tokio::test]
    async fn test_generated_config_loads() {
        let dir = tempdir().unwrap();
        generate_project_structure(InitOptions {
            target_dir: dir.path().to_path_buf(),
            force: false,
        })
        .await
        .unwrap();

        let config = load_config_with_override(dir.path(), None).await.unwrap();
        assert_eq!(config.global.backend.base_url, "http://localhost:5000");
    }

    #[tokio::test]
    async fn test_generate_structure_exists_without_force() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(CONFIG_DIR)).unwrap();

        let result = generate_project_structure(InitOptions {
            target_dir: dir.path().to_path_buf(),
            force: false,
        })
        .await;

        assert!(matches!(result, Err(InitError::DirectoryExists(_))));
    }

    #[tokio::test]
    async fn test_generate_structure_exists_with_force() {
        let dir = tempdir().unwrap();
        let cp_dir = dir.path().join(CONFIG_DIR);
        fs::create_dir_all(&cp_dir).unwrap();
        fs::write(cp_dir.join("config.toml"), "[backend]\nbase_url = \"http://old\"\n").unwrap();

        generate_project_structure(InitOptions {
            target_dir: dir.path().to_path_buf(),
            force: true,
        })
        .await
        .unwrap();

        let config = fs::read_to_string(cp_dir.join("config.toml")).unwrap();
        assert!(config.contains("http://localhost:5000"));
    }

    #[test]
    fn test_default_init_options() {
        let options = InitOptions::default();
        assert!(!options.force);
    }
}
