//! Steps that prepare a project before it is built. Each step takes the
//! build configuration and hands back an extended one.

mod flags;
mod repository;
mod tool;

pub use self::flags::FlagsSettings;
pub use self::repository::RepositorySettings;
pub use self::tool::ToolSettings;
use crate::build_config::BuildConfig;
use crate::toolchain::Toolchain;
use crate::Result;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "step")]
pub enum Settings {
	Flags(FlagsSettings),
	Repository(RepositorySettings),
	Tool(ToolSettings),
}

impl Settings {
	pub fn apply(&self, config: BuildConfig, toolchain: &dyn Toolchain) -> Result<BuildConfig> {
		match self {
			Settings::Flags(settings) => Ok(settings.apply(config)),
			Settings::Repository(settings) => settings.apply(config, toolchain),
			Settings::Tool(settings) => settings.apply(config, toolchain),
		}
	}
}

/// Runs the steps in order; the first failing step stops the pipeline.
pub fn provision(
	config: BuildConfig,
	steps: &[Settings],
	toolchain: &dyn Toolchain,
) -> Result<BuildConfig> {
	steps.iter().try_fold(config, |config, step| {
		debug!("Provisioning {:?}.", step);
		step.apply(config, toolchain)
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::errors::ErrorKind;
	use crate::settings;
	use crate::toolchain::testing::RecordingToolchain;
	use std::path::{Path, PathBuf};
	use tempfile::TempDir;

	fn steps(yaml: &str) -> Vec<Settings> {
		settings::Settings::parse(yaml).unwrap().provisioning
	}

	#[test]
	fn test_steps_apply_in_order() {
		let directory = TempDir::new().unwrap();
		let config = BuildConfig::new(&settings::Settings::default(), directory.path());
		let toolchain = RecordingToolchain::new();

		let config = provision(
			config,
			&steps(
				r#"
provisioning:
  - step: tool
    name: g++
  - step: repository
    url: https://github.com/OpenCyphal/libcanard.git
    path: external/libcanard
    include-directories: [libcanard]
    source-directories: [libcanard]
  - step: flags
    common: -I/usr/local/include
    link: -L/usr/local/lib -lpcap
"#,
			),
			&toolchain,
		)
		.unwrap();

		let canard = directory.path().join("external/libcanard/libcanard");
		assert_eq!(
			config.flags.common,
			format!("-Wall -I{} -I/usr/local/include", canard.to_string_lossy())
		);
		assert_eq!(config.link_flags, "-L/usr/local/lib -lpcap");
		assert_eq!(
			config.source_directories,
			vec![directory.path().join("src"), canard]
		);

		let programs = toolchain
			.invocations()
			.into_iter()
			.map(|invocation| invocation.program)
			.collect::<Vec<_>>();
		assert_eq!(programs, vec!["g++", "git"]);
	}

	#[test]
	fn test_failing_step_stops_pipeline() {
		let config = BuildConfig::new(&settings::Settings::default(), Path::new("/work"));
		let toolchain = RecordingToolchain::new();
		toolchain.remove_program("nnvg");

		let err = provision(
			config,
			&steps(
				r#"
provisioning:
  - step: tool
    name: nnvg
  - step: flags
    common: -DNUNAVUT_ASSERT(x)=assert(x)
"#,
			),
			&toolchain,
		)
		.unwrap_err();

		assert!(matches!(err.kind, ErrorKind::ProvisioningFailed(_)));
		assert_eq!(toolchain.invocations().len(), 1);
	}

	#[test]
	fn test_no_steps() {
		let config = BuildConfig::new(&settings::Settings::default(), Path::new("/work"));
		let toolchain = RecordingToolchain::new();

		let provisioned = provision(config.clone(), &[], &toolchain).unwrap();
		assert_eq!(provisioned.flags, config.flags);
		assert_eq!(provisioned.source_directories, vec![PathBuf::from("/work/src")]);
	}
}
