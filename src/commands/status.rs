use crate::build;
use crate::project_data::Project;
use crate::staleness::Staleness;
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

	let plan = build::plan(&config, options.force)?;

	for (unit, staleness) in &plan.units {
		let source = unit
			.source_path
			.strip_prefix(&project.directory)
			.unwrap_or(&unit.source_path)
			.to_string_lossy();
		match staleness {
			Staleness::Stale(reason) => println!("compile     {} ({})", source, reason),
			Staleness::UpToDate => println!("up-to-date  {}", source),
		}
	}

	if plan.relink {
		println!("link        {}", plan.binary_path.to_string_lossy());
	} else {
		println!("up-to-date  {}", plan.binary_path.to_string_lossy());
	}

	Ok(())
}
