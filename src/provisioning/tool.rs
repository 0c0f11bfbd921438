use crate::build_config::BuildConfig;
use crate::toolchain::{Invocation, Toolchain};
use crate::{Error, Result};
use serde::Deserialize;
use tracing::info;

fn default_args() -> Vec<String> {
	vec!["--version".to_string()]
}

/// Requires a tool to be runnable. Installing it is left to the user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolSettings {
	pub name: String,
	#[serde(default = "default_args")]
	pub args: Vec<String>,
}

impl ToolSettings {
	pub fn apply(&self, config: BuildConfig, toolchain: &dyn Toolchain) -> Result<BuildConfig> {
		let invocation =
			Invocation::new(&self.name, &config.working_directory).args(&self.args);

		let output = toolchain
			.invoke(&invocation)
			.map_err(|err| Error::provisioning_failed(format!("tool '{}'", self.name), Some(err)))?;
		if !output.success() {
			return Err(Error::provisioning_failed(
				format!("tool '{}'", self.name),
				Some(Error::execution_failed(&self.name)),
			));
		}

		info!("Found {}.", self.name);
		Ok(config)
	}
}
