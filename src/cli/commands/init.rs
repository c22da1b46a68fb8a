//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command, which writes the built-in tier
//! catalog to a file so it can be edited and passed back with `--config`.
//!
//! 此模块实现 `init` 命令，将内置的层级目录写入文件，
//! 以便编辑后通过 `--config` 传回。

use anyhow::{Context, Result, bail};
use colored::*;
use dialoguer::{Confirm, theme::ColorfulTheme};
use std::path::Path;

use crate::core::config::DEFAULT_CATALOG;
use crate::infra::fs;

pub const DEFAULT_CATALOG_FILE: &str = "TierCatalog.toml";

/// Writes the default catalog to `output`.
///
/// An existing file is only replaced after the user confirms. With
/// `non_interactive` set, an existing file is an error instead.
///
/// # Arguments
/// * `output` - Path for the new catalog file
/// * `non_interactive` - Never prompt
///
/// # Returns
/// `Ok(())` if the file was written or the user declined to overwrite it
pub fn run_init(output: &Path, non_interactive: bool) -> Result<()> {
    if output.exists() {
        if non_interactive {
            bail!(
                "{} already exists; remove it first or run init interactively",
                output.display()
            );
        }

        let overwrite = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} already exists. Overwrite it?", output.display()))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !overwrite {
            println!("{}", "Aborted. The existing catalog was left untouched.".yellow());
            return Ok(());
        }
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::ensure_dir(parent)?;
    }
    fs::write_file(output, DEFAULT_CATALOG)?;

    println!(
        "{} {}",
        "✓ Wrote the default tier catalog to".green(),
        output.display().to_string().bold()
    );
    println!(
        "  Edit it, then run: {}",
        format!("tier-runner run --config {}", output.display()).cyan()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TierCatalog;
    use tempfile::tempdir;

    #[test]
    fn test_init_writes_a_loadable_catalog() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("nested").join(DEFAULT_CATALOG_FILE);

        run_init(&output, true).unwrap();

        let catalog = TierCatalog::load(&output).unwrap();
        assert_eq!(catalog.success_threshold, 80.0);
    }

    #[test]
    fn test_init_refuses_to_overwrite_when_non_interactive() {
        let dir = tempdir().unwrap();
        let output = dir.path().join(DEFAULT_CATALOG_FILE);
        std::fs::write(&output, "# mine").unwrap();

        assert!(run_init(&output, true).is_err());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "# mine");
    }
}
