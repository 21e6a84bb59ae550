pub mod blacklist;
pub mod channels;
pub mod fetch;
pub mod show;
pub mod status;

use color_eyre::Result;
use programata_config::{Config, PathManager};
use std::path::PathBuf;

/// Resolve the base layout: explicit --base-path wins, then the container
/// environment variable, then the per-user config directory.
pub fn path_manager(base_path: Option<PathBuf>) -> Result<PathManager> {
    if let Some(base) = base_path {
        return Ok(PathManager::from_base(base));
    }
    if std::env::var_os("PROGRAMATA_BASE_PATH").is_some() {
        return Ok(PathManager::from_docker_env());
    }
    PathManager::new().map_err(|e| color_eyre::eyre::eyre!("{}", e))
}

/// Data file locations after applying config overrides.
pub struct DataPaths {
    pub channels_file: PathBuf,
    pub movies_file: PathBuf,
    pub oscars_file: PathBuf,
    pub blacklist_file: PathBuf,
    pub programs_dir: PathBuf,
}

impl DataPaths {
    pub fn resolve(paths: &PathManager, config: &Config) -> Self {
        let or_default = |over: &Option<String>, default: PathBuf| {
            over.as_ref().map(PathBuf::from).unwrap_or(default)
        };
        Self {
            channels_file: or_default(&config.data.channels_file, paths.channels_file()),
            movies_file: or_default(&config.data.movies_file, paths.movies_file()),
            oscars_file: or_default(&config.data.oscars_file, paths.oscars_file()),
            blacklist_file: or_default(&config.data.blacklist_file, paths.blacklist_file()),
            programs_dir: or_default(&config.data.programs_dir, paths.programs_dir()),
        }
    }
}
