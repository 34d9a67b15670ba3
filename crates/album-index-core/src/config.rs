use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scanner::ScanOptions;
use crate::valuation::ValuationPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the continent/country/album/page hierarchy.
    pub albums_root: PathBuf,
    pub tree_output: PathBuf,
    pub albums_output: PathBuf,
    /// SQLite file backing the collection item store.
    pub store_path: PathBuf,
    pub data_extensions: Vec<String>,
    pub image_extensions: Vec<String>,
    pub ignore_patterns: Vec<String>,
    pub sort_entries: bool,
    pub valuation_fields: Vec<String>,
    pub excluded_page_markers: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            albums_root: PathBuf::from("public/data/albums"),
            tree_output: PathBuf::from("public/albums-tree.json"),
            albums_output: PathBuf::from("public/albums.json"),
            store_path: PathBuf::from("album_index.db"),
            data_extensions: vec!["json".to_string()],
            image_extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
            ignore_patterns: Vec::new(),
            sort_entries: true,
            valuation_fields: vec!["côte".to_string(), "cote".to_string()],
            excluded_page_markers: vec!["total".to_string(), "page type".to_string()],
        }
    }
}

impl AppConfig {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::new(&self.data_extensions, &self.image_extensions)
            .with_sorting(self.sort_entries)
            .with_ignore_patterns(&self.ignore_patterns)
    }

    pub fn valuation_policy(&self) -> ValuationPolicy {
        ValuationPolicy::new(&self.valuation_fields, &self.excluded_page_markers)
    }
}

/// Reads `Config.toml` (optional) and `ALBUM_INDEX_*` environment overrides.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(
            Environment::with_prefix("ALBUM_INDEX")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("data_extensions")
                .with_list_parse_key("image_extensions")
                .with_list_parse_key("ignore_patterns")
                .with_list_parse_key("valuation_fields")
                .with_list_parse_key("excluded_page_markers"),
        )
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_collection_layout() {
        let config = AppConfig::default();
        assert_eq!(config.data_extensions, vec!["json"]);
        assert!(config.sort_entries);
        assert!(config.excluded_page_markers.contains(&"page type".to_string()));
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: AppConfig = Config::builder()
            .add_source(config::File::from_str(
                "albums_root = \"/srv/albums\"\nsort_entries = false",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.albums_root, PathBuf::from("/srv/albums"));
        assert!(!config.sort_entries);
        assert_eq!(config.image_extensions.len(), 3);
    }
}
