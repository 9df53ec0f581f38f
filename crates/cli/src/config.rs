use anyhow::{Context, Result};
use autorename_core::{RenameComponent, Schema};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub separator: String,
    pub recursive_default: bool,
    pub include_hidden_default: bool,
    pub components: Vec<RenameComponent>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let schema = Schema::default();
        Self {
            separator: schema.separator,
            recursive_default: false,
            include_hidden_default: false,
            components: schema.components,
        }
    }
}

impl AppConfig {
    pub fn schema(&self) -> Schema {
        Schema::new(self.components.clone(), self.separator.clone())
    }
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub config_path: PathBuf,
}

pub fn app_paths() -> Result<AppPaths> {
    let proj = ProjectDirs::from("com", "autorename", "autorename")
        .context("OS標準設定ディレクトリを取得できませんでした")?;
    let config_dir = proj.config_dir().to_path_buf();
    Ok(AppPaths {
        config_path: config_dir.join("config.toml"),
        config_dir,
    })
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&app_paths()?.config_path)
}

pub fn save_config(config: &AppConfig) -> Result<PathBuf> {
    let paths = app_paths()?;
    save_config_to(config, &paths.config_path)?;
    Ok(paths.config_path)
}

fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        log::debug!("config not found, using defaults: {}", path.display());
        return Ok(AppConfig::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("設定ファイルを読めませんでした: {}", path.display()))?;
    let config = toml::from_str::<AppConfig>(&raw).context("設定ファイルのパースに失敗しました")?;
    Ok(config)
}

fn save_config_to(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| {
            format!("設定ディレクトリを作成できませんでした: {}", dir.display())
        })?;
    }
    let body = toml::to_string_pretty(config).context("設定のシリアライズに失敗しました")?;
    fs::write(path, body)
        .with_context(|| format!("設定ファイルを書き込めませんでした: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config_from(&dir.path().join("none.toml")).expect("must load");
        assert_eq!(config, AppConfig::default());
        assert!(config.schema().has_sequence());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            separator: "-".to_string(),
            recursive_default: true,
            include_hidden_default: false,
            components: vec![
                RenameComponent::FolderName,
                RenameComponent::literal("bk"),
                RenameComponent::sequence(4),
            ],
        };
        save_config_to(&config, &path).expect("must save");
        assert_eq!(load_config_from(&path).expect("must load"), config);
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "separator = \" \"\n\n[[components]]\nkind = \"date_modified\"\n",
        )
        .expect("write");
        let config = load_config_from(&path).expect("must load");
        assert_eq!(config.separator, " ");
        assert_eq!(config.components, vec![RenameComponent::DateModified]);
        assert!(!config.recursive_default);
    }

    #[test]
    fn oversized_pad_width_is_a_load_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[[components]]\nkind = \"sequence\"\npad_width = 100000\n",
        )
        .expect("write");
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "components = 3").expect("write");
        assert!(load_config_from(&path).is_err());
    }
}
