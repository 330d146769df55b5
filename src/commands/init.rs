use crate::config::{default_config_toml, CONFIG_FILE_NAME};
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

const HEADER: &str = "# lobbymap methodology configuration
#
# Every report is stamped with methodology_version. Bump it whenever a
# weight, cohort size or threshold below changes.

";

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    write_default_config(&config_path, force)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);
    Ok(())
}

pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }
    let contents = format!("{}{}", HEADER, default_config_toml()?);
    io::write_file(path, &contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config_from_path, LobbymapConfig};

    #[test]
    fn written_config_loads_back_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        write_default_config(&path, false).unwrap();
        assert_eq!(load_config_from_path(&path).unwrap(), LobbymapConfig::default());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "methodology_version = \"mine\"\n").unwrap();

        assert!(write_default_config(&path, false).is_err());
        write_default_config(&path, true).unwrap();
        assert_eq!(
            load_config_from_path(&path).unwrap().methodology_version,
            "2024.1"
        );
    }
}
