use crate::build_config::{Compilers, Flags};
use crate::paths::SETTINGS_FILE_NAME;
use crate::provisioning;
use crate::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

fn default_binary_directory() -> PathBuf {
	PathBuf::from("bin")
}

fn default_binary_name() -> String {
	"main".to_string()
}

fn default_object_directory() -> PathBuf {
	PathBuf::from("obj")
}

fn default_source_directories() -> Vec<PathBuf> {
	vec![PathBuf::from("src")]
}

/// Contents of the project's settings file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
	#[serde(default = "default_binary_directory")]
	pub binary_directory: PathBuf,
	#[serde(default = "default_binary_name")]
	pub binary_name: String,
	#[serde(default)]
	pub compilers: Compilers,
	#[serde(default)]
	pub flags: Flags,
	#[serde(default)]
	pub link_flags: String,
	/// Defaults to the C++ compiler.
	pub linker: Option<String>,
	#[serde(default = "default_object_directory")]
	pub object_directory: PathBuf,
	#[serde(default)]
	pub provisioning: Vec<provisioning::Settings>,
	#[serde(default = "default_source_directories")]
	pub source_directories: Vec<PathBuf>,
	#[serde(default)]
	pub source_files: Vec<PathBuf>,
}

impl Default for Settings {
	fn default() -> Self {
		Settings {
			binary_directory: default_binary_directory(),
			binary_name: default_binary_name(),
			compilers: Compilers::default(),
			flags: Flags::default(),
			link_flags: String::new(),
			linker: None,
			object_directory: default_object_directory(),
			provisioning: vec![],
			source_directories: default_source_directories(),
			source_files: vec![],
		}
	}
}

impl Settings {
	pub fn load(project_directory: &Path) -> Result<Self> {
		let path = project_directory.join(SETTINGS_FILE_NAME);

		if !path.exists() {
			return Ok(Settings::default());
		}

		let contents =
			fs::read_to_string(&path).map_err(|err| Error::failed_to_read(&path, err))?;
		Self::parse(&contents)
	}

	pub fn parse(contents: &str) -> Result<Self> {
		serde_yaml::from_str(contents).map_err(|err| Error::failed_to_deserialize(contents, err))
	}
}
