use crate::build::{self, BuildEvent, BuildOptions};
use crate::build_config::BuildConfig;
use crate::project_data::Project;
use crate::toolchain::{ProcessToolchain, Toolchain};
use crate::Result;
use std::path::{Path, PathBuf};

pub struct Options<'a> {
	pub force: bool,
	pub project_directory: &'a Path,
}

pub fn build_and_report(
	config: &BuildConfig,
	toolchain: &dyn Toolchain,
	force: bool,
) -> Result<PathBuf> {
	let mut compiled = 0;
	let mut skipped = 0;

	let mut event_listener = |event: BuildEvent| match event {
		BuildEvent::UnitCompiled(_) => compiled += 1,
		BuildEvent::UnitSkipped(_) => skipped += 1,
		_ => {}
	};

	let (result, duration) = build::build_duration(
		&BuildOptions {
			config,
			force,
			toolchain,
		},
		&mut event_listener,
	)?;

	println!("Build succeeded:");
	println!("  Path: {}", result.binary_path.to_string_lossy());
	println!("  Compiled: {}, up-to-date: {}", compiled, skipped);
	println!("  Duration: {:?}", duration);

	Ok(result.binary_path)
}

pub fn execute(options: &Options) -> Result<PathBuf> {
	let project = Project::load(options.project_directory)?;
	let toolchain = ProcessToolchain::new(&project.configuration);
	let config = project.build_config(&toolchain)?;

	build_and_report(&config, &toolchain, options.force)
}
