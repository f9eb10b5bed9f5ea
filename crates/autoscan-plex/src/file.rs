use std::path::Path;

use serde::{Deserialize, Serialize};

use autoscan_core::prelude::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AutoscanConfig {
    #[serde(default)]
    pub targets: Targets,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Targets {
    #[serde(default)]
    pub plex: Vec<TargetConfig>,
}

pub fn load_config(path: &Path) -> Result<AutoscanConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AutoscanConfig> {
    serde_yaml::from_str(content).map_err(|err| AutoscanError::Parse(err.to_string()))
}
