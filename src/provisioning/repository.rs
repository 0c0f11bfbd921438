use crate::build_config::{append_flags, BuildConfig};
use crate::toolchain::{Invocation, Toolchain};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

/// An external source tree, cloned on first use.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RepositorySettings {
	pub url: String,
	pub path: PathBuf,
	/// Relative to `path`, added as `-I` to the common flags.
	#[serde(default)]
	pub include_directories: Vec<PathBuf>,
	/// Relative to `path`, appended to the source directories.
	#[serde(default)]
	pub source_directories: Vec<PathBuf>,
}

impl RepositorySettings {
	fn failed(&self, source: Option<Error>) -> Error {
		Error::provisioning_failed(format!("repository '{}'", self.url), source)
	}

	pub fn apply(&self, mut config: BuildConfig, toolchain: &dyn Toolchain) -> Result<BuildConfig> {
		let path = config.resolve(&self.path);

		if !path.exists() {
			info!("Cloning {} into {}.", self.url, path.to_string_lossy());

			let invocation = Invocation::new("git", &config.working_directory)
				.arg("clone")
				.arg(&self.url)
				.path_arg(&path);
			let output = toolchain
				.invoke(&invocation)
				.map_err(|err| self.failed(Some(err)))?;
			if !output.success() {
				return Err(self.failed(Some(Error::execution_failed("git"))));
			}
			if !path.exists() {
				return Err(self.failed(None));
			}
		}

		for directory in &self.include_directories {
			let flag = format!("-I{}", path.join(directory).to_string_lossy());
			append_flags(&mut config.flags.common, &flag);
		}

		config
			.source_directories
			.extend(self.source_directories.iter().map(|directory| path.join(directory)));

		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::settings::Settings;
	use crate::toolchain::testing::RecordingToolchain;
	use std::fs;
	use tempfile::TempDir;

	fn json() -> RepositorySettings {
		RepositorySettings {
			url: "https://github.com/nlohmann/json.git".to_string(),
			path: PathBuf::from("external/json"),
			include_directories: vec![PathBuf::from("include")],
			source_directories: vec![],
		}
	}

	#[test]
	fn test_clones_missing_repository() {
		let directory = TempDir::new().unwrap();
		let config = BuildConfig::new(&Settings::default(), directory.path());
		let toolchain = RecordingToolchain::new();

		let config = json().apply(config, &toolchain).unwrap();

		let path = directory.path().join("external/json");
		assert!(path.exists());
		assert_eq!(
			config.flags.common,
			format!("-Wall -I{}", path.join("include").to_string_lossy())
		);
		assert_eq!(toolchain.invocations()[0].args[0], "clone");
	}

	#[test]
	fn test_existing_repository_is_not_cloned() {
		let directory = TempDir::new().unwrap();
		fs::create_dir_all(directory.path().join("external/json")).unwrap();
		let config = BuildConfig::new(&Settings::default(), directory.path());
		let toolchain = RecordingToolchain::new();

		json().apply(config, &toolchain).unwrap();

		assert!(toolchain.invocations().is_empty());
	}

	#[test]
	fn test_git_missing() {
		let directory = TempDir::new().unwrap();
		let config = BuildConfig::new(&Settings::default(), directory.path());
		let toolchain = RecordingToolchain::new();
		toolchain.remove_program("git");

		let err = json().apply(config, &toolchain).unwrap_err();
		assert_eq!(
			err.to_string(),
			"Failed to provision repository 'https://github.com/nlohmann/json.git'."
		);
	}
}
