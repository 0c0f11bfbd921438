use crate::{Error, Result};
use std::path::Path;
use std::process::Command;

pub struct RunOptions<'a> {
	pub executable_path: &'a Path,
	pub working_directory: &'a Path,
}

/// Runs the built program with inherited standard streams.
pub fn run(options: &RunOptions) -> Result<()> {
	let mut process = Command::new(options.executable_path)
		.current_dir(options.working_directory)
		.spawn()
		.map_err(|err| Error::failed_to_execute(options.executable_path, err))?;

	let status = process
		.wait()
		.map_err(|err| Error::failed_to_execute(options.executable_path, err))?;
	if !status.success() {
		return Err(Error::execution_failed(options.executable_path));
	}

	Ok(())
}
