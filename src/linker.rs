use crate::build_config::{split_flags, BuildConfig};
use crate::toolchain::{Invocation, Toolchain};
use crate::{Error, Result};
use std::path::PathBuf;
use tracing::{info, warn};

pub struct Linker<'a> {
	config: &'a BuildConfig,
}

impl<'a> Linker<'a> {
	pub fn new(config: &'a BuildConfig) -> Self {
		Linker { config }
	}

	/// Objects come before the link flags so that libraries resolve.
	pub fn invocation(&self, object_paths: &[PathBuf]) -> Invocation {
		Invocation::new(&self.config.linker, &self.config.working_directory)
			.args(object_paths.iter().map(|path| path.to_string_lossy()))
			.args(split_flags(&self.config.link_flags))
			.arg("-o")
			.path_arg(&self.config.binary_path())
	}

	pub fn link(&self, object_paths: &[PathBuf], toolchain: &dyn Toolchain) -> Result<PathBuf> {
		let binary_path = self.config.binary_path();
		let invocation = self.invocation(object_paths);

		let output = toolchain
			.invoke(&invocation)
			.map_err(|err| Error::link_failed_to_execute(&binary_path, err))?;

		if !output.success() {
			return Err(Error::link_failed(&binary_path, output.into_diagnostics()));
		}

		if !output.stdout.is_empty() {
			info!("{}", output.stdout.trim_end());
		}
		if !output.stderr.is_empty() {
			warn!("{}", output.stderr.trim_end());
		}

		Ok(binary_path)
	}
}
