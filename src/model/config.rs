use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::item::AddPosition;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Data file location; `~` is expanded. Default: ~/.timetrack.json
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    #[serde(default)]
    pub add_position: AddPosition,
    /// Tab submits an edit field just like Enter
    #[serde(default = "default_true")]
    pub submit_on_tab: bool,
    /// Longest item name the add/rename fields accept (in codepoints)
    #[serde(default)]
    pub max_name_length: Option<usize>,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            add_position: AddPosition::Bottom,
            submit_on_tab: true,
            max_name_length: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub ignore_case: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Redraw interval while idle, in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            tick_ms: default_tick_ms(),
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_tick_ms() -> u64 {
    250
}
