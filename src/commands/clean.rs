use crate::build_config::BuildConfig;
use crate::project_data::Project;
use crate::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::info;

pub struct Options<'a> {
	pub project_directory: &'a Path,
}

fn remove_directory(path: &Path) -> Result<()> {
	if !path.exists() {
		return Ok(());
	}

	fs::remove_dir_all(path).map_err(|err| Error::failed_to_remove_directory(path, err))?;
	info!("Removed {}.", path.to_string_lossy());
	Ok(())
}

/// Provisioning is not run, cleaning never clones or probes anything.
pub fn execute(options: &Options) -> Result<()> {
	let project = Project::load(options.project_directory)?;
	let config = BuildConfig::new(&project.settings, &project.directory);

	remove_directory(&config.object_directory)?;
	remove_directory(&config.binary_directory)?;
	Ok(())
}
