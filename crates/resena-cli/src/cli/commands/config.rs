//! `resena config ...`: inspect or edit `$RESENA_HOME/config.toml`.

use std::path::Path;

use anyhow::{Context, Result};
use resena_core::config::{Config, paths};

pub fn path() {
    println!("{}", paths::config_path().display());
}

pub fn init() -> Result<()> {
    let target = paths::config_path();
    write_template(&target)?;
    println!("Created config at {}", target.display());
    Ok(())
}

pub fn set_base_url(url: &str) -> Result<()> {
    let target = paths::config_path();
    Config::save_base_url_to(&target, url)
        .with_context(|| format!("Could not set api.base_url in {}", target.display()))?;
    println!("api.base_url = {url}");
    Ok(())
}

fn write_template(target: &Path) -> Result<()> {
    Config::init(target)
        .with_context(|| format!("Could not create {}", target.display()))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_template_written_once() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested").join("config.toml");

        write_template(&target).unwrap();
        assert!(target.exists());

        let err = write_template(&target).unwrap_err();
        assert!(format!("{err:#}").contains("already exists"));
    }
}
