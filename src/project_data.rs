use crate::build_config::BuildConfig;
use crate::configuration::Configuration;
use crate::provisioning;
use crate::settings::Settings;
use crate::toolchain::Toolchain;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

pub struct Project {
	pub configuration: Configuration,
	pub directory: PathBuf,
	pub settings: Settings,
}

impl Project {
	pub fn load(directory: &Path) -> Result<Self> {
		let configuration = Configuration::load()?;
		Self::load_with(directory, configuration)
	}

	pub fn load_with(directory: &Path, configuration: Configuration) -> Result<Self> {
		let directory = directory
			.canonicalize()
			.map_err(|err| Error::failed_to_read_directory(directory, err))?;

		let settings = Settings::load(&directory)?;

		Ok(Project {
			configuration,
			directory,
			settings,
		})
	}

	/// Runs the provisioning steps; the result stays fixed for the build.
	pub fn build_config(&self, toolchain: &dyn Toolchain) -> Result<BuildConfig> {
		let config = BuildConfig::new(&self.settings, &self.directory);
		provisioning::provision(config, &self.settings.provisioning, toolchain)
	}
}
