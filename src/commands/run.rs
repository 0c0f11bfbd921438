use crate::commands::build::build_and_report;
use crate::project_data::Project;
use crate::run::{self, RunOptions};
use crate::toolchain::ProcessToolchain;
use crate::Result;
use std::path::Path;

pub struct Options<'a> {
	pub force: bool,
	pub project_directory: &'a Path,
}

pub fn execute(options: &Options) -> Result<()> {
	let project = Project::load(options.project_directory)?;
	let toolchain = ProcessToolchain::new(&project.configuration);
	let config = project.build_config(&toolchain)?;

	let executable_path = build_and_report(&config, &toolchain, options.force)?;

	run::run(&RunOptions {
		executable_path: &executable_path,
		working_directory: &project.directory,
	})
}
