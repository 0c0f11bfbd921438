//! Clang compilation database, for editors and linters.

use crate::build_config::BuildConfig;
use crate::compiler::Compiler;
use crate::paths::COMPILE_COMMANDS_FILE_NAME;
use crate::sources;
use crate::{Error, Result};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct CompileCommand {
	pub directory: PathBuf,
	pub file: PathBuf,
	pub arguments: Vec<String>,
	pub output: PathBuf,
}

pub fn generate(config: &BuildConfig) -> Result<Vec<CompileCommand>> {
	let compiler = Compiler::new(config);

	let commands = sources::resolve(config)?
		.into_iter()
		.map(|unit| {
			let invocation = compiler.invocation(&unit);

			let mut arguments = vec![invocation.program];
			arguments.extend(invocation.args);

			CompileCommand {
				directory: invocation.current_directory,
				file: unit.source_path,
				arguments,
				output: unit.object_path,
			}
		})
		.collect();

	Ok(commands)
}

pub fn write(config: &BuildConfig) -> Result<PathBuf> {
	let commands = generate(config)?;

	let path = config.working_directory.join(COMPILE_COMMANDS_FILE_NAME);
	let contents = serde_json::to_string_pretty(&commands)
		.map_err(|err| Error::message(format!("Failed to serialize: {}.", err)))?;
	fs::write(&path, contents).map_err(|err| Error::failed_to_write(&path, err))?;

	Ok(path)
}
