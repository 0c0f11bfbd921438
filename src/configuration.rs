use crate::paths::{CONFIGURATION_FILE_NAME, USER_SETTINGS_DIRECTORY};
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// User-wide settings, shared by every project.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
	/// Overrides the executable used for a tool name.
	#[serde(default)]
	pub paths: HashMap<String, PathBuf>,
}

impl Configuration {
	pub fn load() -> Result<Self> {
		Self::load_from(&USER_SETTINGS_DIRECTORY.join(CONFIGURATION_FILE_NAME))
	}

	pub fn load_from(path: &Path) -> Result<Self> {
		if !path.exists() {
			return Ok(Configuration::default());
		}

		let contents = fs::read_to_string(path).map_err(|err| Error::failed_to_read(path, err))?;
		let configuration: Configuration = serde_yaml::from_str(&contents)
			.map_err(|err| Error::failed_to_deserialize(&contents, err))?;
		Ok(configuration)
	}

	pub fn resolve_program(&self, name: &str) -> PathBuf {
		self.paths
			.get(name)
			.cloned()
			.unwrap_or_else(|| PathBuf::from(name))
	}
}
