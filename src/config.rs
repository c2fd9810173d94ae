use crate::cli::OutputFormat;
use crate::error::{KeywordMatchError, Result};
use keyword_match_common::DEFAULT_MATCH_PREFIX;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 照合列名の接頭辞
    pub match_prefix: String,
    /// プレビュー表示する行数
    pub preview_rows: usize,
    /// 既定の出力形式（`--format` も出力ファイルの拡張子もない場合に使用）
    pub default_format: Option<OutputFormat>,
    /// CSVにUTF-8 BOMを付ける
    pub csv_bom: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            match_prefix: DEFAULT_MATCH_PREFIX.into(),
            preview_rows: 5,
            default_format: None,
            csv_bom: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| KeywordMatchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("keyword-match").join("config.json"))
    }

    pub fn set_match_prefix(&mut self, prefix: String) -> Result<()> {
        if prefix.trim().is_empty() {
            return Err(KeywordMatchError::Config("接頭辞が空です".into()));
        }
        self.match_prefix = prefix;
        Ok(())
    }
}
