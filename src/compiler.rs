use crate::build_config::BuildConfig;
use crate::toolchain::{Invocation, Toolchain};
use crate::types::SourceUnit;
use crate::{Error, Result};
use tracing::{info, warn};

/// Drives a gcc-compatible compiler, one source unit at a time.
pub struct Compiler<'a> {
	config: &'a BuildConfig,
}

impl<'a> Compiler<'a> {
	pub fn new(config: &'a BuildConfig) -> Self {
		Compiler { config }
	}

	/// The dependency file is emitted as a side effect of compilation.
	pub fn invocation(&self, unit: &SourceUnit) -> Invocation {
		Invocation::new(
			self.config.compilers.get(unit.kind),
			&self.config.working_directory,
		)
		.args(self.config.flags.args(unit.kind))
		.arg("-MMD")
		.arg("-MF")
		.path_arg(&unit.dependency_file_path)
		.arg("-c")
		.path_arg(&unit.source_path)
		.arg("-o")
		.path_arg(&unit.object_path)
	}

	/// On failure the object and dependency files are left as the compiler
	/// left them and must not be trusted.
	pub fn compile(&self, unit: &SourceUnit, toolchain: &dyn Toolchain) -> Result<()> {
		let invocation = self.invocation(unit);

		let output = toolchain
			.invoke(&invocation)
			.map_err(|err| Error::compile_failed_to_execute(&unit.source_path, err))?;

		if !output.success() {
			return Err(Error::compile_failed(
				&unit.source_path,
				output.into_diagnostics(),
			));
		}

		if !output.stdout.is_empty() {
			info!("{}", output.stdout.trim_end());
		}
		if !output.stderr.is_empty() {
			warn!("{}", output.stderr.trim_end());
		}

		Ok(())
	}
}
