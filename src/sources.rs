use crate::build_config::BuildConfig;
use crate::types::{SourceKind, SourceUnit};
use crate::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Regular files directly inside `directory`, sorted by name.
fn list_files(directory: &Path) -> Result<Vec<PathBuf>> {
	let entries =
		fs::read_dir(directory).map_err(|err| Error::failed_to_read_directory(directory, err))?;

	let mut paths = vec![];
	for entry in entries {
		let entry = entry.map_err(|err| Error::failed_to_read_directory(directory, err))?;
		let path = entry.path();
		if path.is_file() {
			paths.push(path);
		}
	}

	paths.sort();
	Ok(paths)
}

fn check_object_paths(units: &[SourceUnit]) -> Result<()> {
	let mut sources_by_object: HashMap<&Path, &Path> = HashMap::new();

	for unit in units {
		if let Some(first) = sources_by_object.insert(&unit.object_path, &unit.source_path) {
			return Err(Error::duplicate_object_path(
				&unit.object_path,
				first,
				&unit.source_path,
			));
		}
	}

	Ok(())
}

/// Directory sources come first, C before C++ within each directory, then
/// the explicit files. Fails before anything is compiled.
pub fn resolve(config: &BuildConfig) -> Result<Vec<SourceUnit>> {
	let mut units = vec![];

	for directory in &config.source_directories {
		let files = list_files(directory)?;

		for &kind in SourceKind::ALL.iter() {
			for path in &files {
				if SourceKind::from_path(path) == Some(kind) {
					units.push(SourceUnit::new(
						path.clone(),
						kind,
						&config.object_directory,
					)?);
				}
			}
		}
	}

	for path in &config.source_files {
		let kind = SourceKind::from_path(path).ok_or_else(|| Error::unsupported_source_kind(path))?;
		units.push(SourceUnit::new(
			path.clone(),
			kind,
			&config.object_directory,
		)?);
	}

	check_object_paths(&units)?;

	Ok(units)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::errors::ErrorKind;
	use crate::settings::Settings;
	use tempfile::TempDir;

	fn project(files: &[&str]) -> TempDir {
		let directory = TempDir::new().unwrap();
		for file in files {
			let path = directory.path().join(file);
			fs::create_dir_all(path.parent().unwrap()).unwrap();
			fs::write(path, "").unwrap();
		}
		directory
	}

	fn sources(units: &[SourceUnit], root: &Path) -> Vec<String> {
		units
			.iter()
			.map(|unit| {
				unit.source_path
					.strip_prefix(root)
					.unwrap()
					.to_string_lossy()
					.replace('\\', "/")
			})
			.collect()
	}

	#[test]
	fn test_directory_order() {
		let directory = project(&[
			"src/main.cpp",
			"src/b.c",
			"src/a.c",
			"src/util.h",
			"src/notes.txt",
			"src/nested/ignored.c",
			"lib/z.cc",
		]);
		let mut settings = Settings::default();
		settings.source_directories = vec![PathBuf::from("src"), PathBuf::from("lib")];
		let config = BuildConfig::new(&settings, directory.path());

		let units = resolve(&config).unwrap();
		assert_eq!(
			sources(&units, directory.path()),
			vec!["src/a.c", "src/b.c", "src/main.cpp", "lib/z.cc"]
		);
		assert_eq!(units[2].kind, SourceKind::Cpp);
		assert_eq!(units[2].object_path, config.object_directory.join("main.o"));
		assert_eq!(
			units[2].dependency_file_path,
			config.object_directory.join("main.o.d")
		);
	}

	#[test]
	fn test_explicit_files_come_last() {
		let directory = project(&["src/a.c", "tools/probe.cpp"]);
		let mut settings = Settings::default();
		settings.source_files = vec![PathBuf::from("tools/probe.cpp")];
		let config = BuildConfig::new(&settings, directory.path());

		let units = resolve(&config).unwrap();
		assert_eq!(
			sources(&units, directory.path()),
			vec!["src/a.c", "tools/probe.cpp"]
		);
	}

	#[test]
	fn test_unsupported_source_kind() {
		let directory = project(&["src/a.c", "scripts/gen.py"]);
		let mut settings = Settings::default();
		settings.source_files = vec![PathBuf::from("scripts/gen.py")];
		let config = BuildConfig::new(&settings, directory.path());

		let err = resolve(&config).unwrap_err();
		assert!(matches!(err.kind, ErrorKind::UnsupportedSourceKind(_)));
	}

	#[test]
	fn test_duplicate_object_path() {
		let directory = project(&["src/foo.c", "src/foo.cpp"]);
		let config = BuildConfig::new(&Settings::default(), directory.path());

		let err = resolve(&config).unwrap_err();
		match err.kind {
			ErrorKind::DuplicateObjectPath(object, first, second) => {
				assert_eq!(object, config.object_directory.join("foo.o"));
				assert_eq!(first, directory.path().join("src/foo.c"));
				assert_eq!(second, directory.path().join("src/foo.cpp"));
			}
			kind => panic!("unexpected error {:?}", kind),
		}
	}

	#[test]
	fn test_duplicate_across_directories() {
		let directory = project(&["src/util.c", "vendor/util.c"]);
		let mut settings = Settings::default();
		settings.source_directories = vec![PathBuf::from("src"), PathBuf::from("vendor")];
		let config = BuildConfig::new(&settings, directory.path());

		assert!(resolve(&config).is_err());
	}

	#[test]
	fn test_missing_directory() {
		let directory = project(&[]);
		let config = BuildConfig::new(&Settings::default(), directory.path());

		let err = resolve(&config).unwrap_err();
		assert!(matches!(err.kind, ErrorKind::FailedToReadDirectory(_)));
	}
}
