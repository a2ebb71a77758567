//! `content-pipeline init`

use color_eyre::eyre::{eyre, Result};
use colored::Colorize;
use cp_core::init::{generate_project_structure, InitError, InitOptions};
use std::path::Path;

pub async fn execute(root: &Path, force: bool) -> Result<()> {
    let options = InitOptions {
        target_dir: root.to_path_buf(),
        force,
    };

    match generate_project_structure(options).await {
        Ok(written) => {
            println!("{}", "Initialized content-pipeline project".green().bold());
            for path in written {
                println!("  created {}", path.display());
            }
            Ok(())
        }
        Err(InitError::DirectoryExists(dir)) => Err(eyre!(
            "{} already exists; pass --force to overwrite its template files",
            dir.display()
        )),
        Err(e) => Err(e.into()),
    }
}
