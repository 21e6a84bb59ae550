use anyhow::Result;
use std::path::{Path, PathBuf};

/// Get the container base path from environment variable, defaulting to "/app"
pub fn container_base_path() -> PathBuf {
    std::env::var("PROGRAMATA_BASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/app"))
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("programata");

        Ok(Self {
            config_dir: base_dir.clone(),
            data_dir: base_dir.join("data"),
            log_dir: base_dir.join("logs"),
        })
    }

    pub fn from_docker_env() -> Self {
        let base = container_base_path();
        // Config files at base level, data/logs in subdirs, matching the default layout
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn channels_file(&self) -> PathBuf {
        self.data_dir.join("tv_channels.json")
    }

    pub fn movies_file(&self) -> PathBuf {
        self.data_dir.join("movies-min.json")
    }

    pub fn oscars_file(&self) -> PathBuf {
        self.data_dir.join("oscars-min.json")
    }

    pub fn blacklist_file(&self) -> PathBuf {
        self.data_dir.join("blacklist.json")
    }

    pub fn programs_dir(&self) -> PathBuf {
        self.data_dir.join("programs")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("programata.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base_layout() {
        let paths = PathManager::from_base(PathBuf::from("/srv/programata"));
        assert_eq!(paths.config_file(), PathBuf::from("/srv/programata/config.toml"));
        assert_eq!(
            paths.programs_dir(),
            PathBuf::from("/srv/programata/data/programs")
        );
        assert_eq!(
            paths.channels_file(),
            PathBuf::from("/srv/programata/data/tv_channels.json")
        );
    }
}
