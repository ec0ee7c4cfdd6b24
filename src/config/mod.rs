use serde::Deserialize;
use std::path::PathBuf;

/// Reference-deployment constants for the coordinate pipeline.
///
/// The source viewbox matches the map document this tool was built around;
/// the canvas matches the downstream renderer. Both dimensions can be
/// overridden per run via CLI flags or the config file.
pub mod defaults {
    /// Source viewbox dimensions in source units.
    pub const VIEWBOX_WIDTH: f64 = 610.0;
    pub const VIEWBOX_HEIGHT: f64 = 560.0;

    /// Target canvas dimensions in output units.
    pub const CANVAS_WIDTH: f64 = 2000.0;
    pub const CANVAS_HEIGHT: f64 = 1400.0;

    /// Endpoint match tolerance in source units. Exported maps carry
    /// floating-point noise, so endpoints that should meet rarely do so
    /// exactly.
    pub const ENDPOINT_TOLERANCE: f64 = 0.5;

    /// Equal-angle sample count per elliptical arc. Enough that no
    /// faceting is visible at map scale.
    pub const ARC_SEGMENTS: usize = 12;
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub viewbox_width: Option<f64>,
    #[serde(default)]
    pub viewbox_height: Option<f64>,
    #[serde(default)]
    pub canvas_width: Option<f64>,
    #[serde(default)]
    pub canvas_height: Option<f64>,
    #[serde(default)]
    pub verbose: bool,
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("svg2map.toml"));
    paths.push(PathBuf::from(".svg2map.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("svg2map").join("config.toml"));
        paths.push(config_dir.join("svg2map.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".svg2map.toml"));
        paths.push(home.join(".config").join("svg2map").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_config_partial() {
        let config: FileConfig = toml::from_str("canvas_width = 1000.0").unwrap();
        assert_eq!(config.canvas_width, Some(1000.0));
        assert_eq!(config.canvas_height, None);
        assert!(!config.verbose);
    }

    #[test]
    fn test_file_config_empty() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.viewbox_width, None);
        assert!(!config.verbose);
    }
}
