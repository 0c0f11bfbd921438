use crate::commands::build::build_and_report;
use crate::project_data::Project;
use crate::toolchain::ProcessToolchain;
use crate::{Error, Result};
use notify::{DebouncedEvent, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;
use tracing::{error, info};

pub struct Options<'a> {
	pub debounce_delay: Duration,
	pub project_directory: &'a Path,
}

/// Builds, then rebuilds on every change to a source directory or explicit
/// source file. Build failures are reported and watching goes on.
pub fn execute(options: &Options) -> Result<()> {
	let project = Project::load(options.project_directory)?;
	let toolchain = ProcessToolchain::new(&project.configuration);
	let config = project.build_config(&toolchain)?;

	let (tx_watcher, rx_watcher) = channel();
	let mut watcher = RecommendedWatcher::new(tx_watcher, options.debounce_delay)
		.map_err(|err| Error::failed_to_watch(&project.directory, err))?;

	for path in config
		.source_directories
		.iter()
		.chain(config.source_files.iter())
	{
		watcher
			.watch(path, RecursiveMode::NonRecursive)
			.map_err(|err| Error::failed_to_watch(path, err))?;
	}

	let report = |result: Result<_>| {
		if let Err(err) = result {
			error!("{}", err);
		}
	};

	report(build_and_report(&config, &toolchain, false));

	loop {
		match rx_watcher.recv() {
			Ok(DebouncedEvent::Create(path))
			| Ok(DebouncedEvent::Remove(path))
			| Ok(DebouncedEvent::Rename(_, path))
			| Ok(DebouncedEvent::Write(path)) => {
				info!("{} changed, rebuilding.", path.to_string_lossy());
				report(build_and_report(&config, &toolchain, false));
			}
			Ok(DebouncedEvent::Rescan) => {
				report(build_and_report(&config, &toolchain, false));
			}
			Ok(DebouncedEvent::Error(err, path)) => {
				let path = path.unwrap_or_else(|| project.directory.clone());
				return Err(Error::failed_to_watch(path, err));
			}
			Ok(_) => {}
			Err(err) => return Err(Error::message(format!("Watcher stopped: {}.", err))),
		}
	}
}
