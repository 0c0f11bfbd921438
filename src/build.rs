use crate::build_config::BuildConfig;
use crate::compiler::Compiler;
use crate::linker::Linker;
use crate::sources;
use crate::staleness::{self, StaleReason, Staleness};
use crate::toolchain::Toolchain;
use crate::types::{BuildResult, SourceUnit};
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub enum BuildEvent<'a> {
	UnitCompiled(&'a SourceUnit),
	UnitSkipped(&'a SourceUnit),
	Linked(&'a Path),
	LinkSkipped(&'a Path),
}

pub struct BuildOptions<'a> {
	pub config: &'a BuildConfig,
	/// Recompiles every unit and relinks regardless of timestamps.
	pub force: bool,
	pub toolchain: &'a dyn Toolchain,
}

fn create_directory(path: &Path) -> Result<()> {
	fs::create_dir_all(path).map_err(|err| Error::failed_to_create_directory(path, err))
}

fn unit_staleness(config: &BuildConfig, unit: &SourceUnit, force: bool) -> Staleness {
	if force {
		return Staleness::Stale(StaleReason::Forced);
	}

	staleness::check(
		&unit.object_path,
		&unit.dependency_file_path,
		&config.working_directory,
	)
}

/// Compiles what is stale, then relinks if any object is newer than the
/// binary. Stops at the first failure.
pub fn build(
	options: &BuildOptions,
	event_listener: &mut dyn FnMut(BuildEvent),
) -> Result<BuildResult> {
	let config = options.config;

	let units = sources::resolve(config)?;
	debug!("Resolved {} source units.", units.len());

	create_directory(&config.object_directory)?;
	create_directory(&config.binary_directory)?;

	let compiler = Compiler::new(config);
	let mut object_paths = Vec::with_capacity(units.len());

	for unit in &units {
		match unit_staleness(config, unit, options.force) {
			Staleness::Stale(reason) => {
				debug!(
					"{} is stale: {}.",
					unit.source_path.to_string_lossy(),
					reason
				);
				compiler.compile(unit, options.toolchain)?;
				info!(
					"Compiled {} into {}.",
					unit.source_path.to_string_lossy(),
					unit.object_path.to_string_lossy()
				);
				event_listener(BuildEvent::UnitCompiled(unit));
			}
			Staleness::UpToDate => {
				info!(
					"Skipping compilation of {}; up-to-date.",
					unit.source_path.to_string_lossy()
				);
				event_listener(BuildEvent::UnitSkipped(unit));
			}
		}

		object_paths.push(unit.object_path.clone());
	}

	let binary_path = config.binary_path();

	if options.force || staleness::needs_relink(&binary_path, &object_paths) {
		Linker::new(config).link(&object_paths, options.toolchain)?;
		info!("Linked object files into {}.", binary_path.to_string_lossy());
		event_listener(BuildEvent::Linked(&binary_path));
	} else {
		info!(
			"Skipping linking; {} is up-to-date.",
			binary_path.to_string_lossy()
		);
		event_listener(BuildEvent::LinkSkipped(&binary_path));
	}

	Ok(BuildResult {
		binary_path,
		object_paths,
	})
}

pub fn build_duration(
	options: &BuildOptions,
	event_listener: &mut dyn FnMut(BuildEvent),
) -> Result<(BuildResult, Duration)> {
	let start = Instant::now();

	let result = build(options, event_listener)?;

	let duration = start.elapsed();
	Ok((result, duration))
}

pub struct BuildPlan {
	pub units: Vec<(SourceUnit, Staleness)>,
	pub binary_path: PathBuf,
	pub relink: bool,
}

/// What `build` would do, without touching the filesystem.
pub fn plan(config: &BuildConfig, force: bool) -> Result<BuildPlan> {
	let units = sources::resolve(config)?
		.into_iter()
		.map(|unit| {
			let staleness = unit_staleness(config, &unit, force);
			(unit, staleness)
		})
		.collect::<Vec<_>>();

	let binary_path = config.binary_path();
	let object_paths = units
		.iter()
		.map(|(unit, _)| unit.object_path.clone())
		.collect::<Vec<_>>();

	// Any recompiled object ends up newer than the binary.
	let relink = force
		|| units.iter().any(|(_, staleness)| staleness.is_stale())
		|| staleness::needs_relink(&binary_path, &object_paths);

	Ok(BuildPlan {
		units,
		binary_path,
		relink,
	})
}
