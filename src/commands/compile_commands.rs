use crate::compile_commands;
use crate::project_data::Project;
use crate::toolchain::ProcessToolchain;
use crate::Result;
use std::path::Path;

pub struct Options<'a> {
	pub project_directory: &'a Path,
}

pub fn execute(options: &Options) -> Result<()> {
	let project = Project::load(options.project_directory)?;
	let toolchain = ProcessToolchain::new(&project.configuration);
	let config = project.build_config(&toolchain)?;

	let path = compile_commands::write(&config)?;
	println!("Compilation database written to {}.", path.to_string_lossy());
	Ok(())
}
