use crate::dependency_file;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StaleReason {
	ChangedDependency(PathBuf),
	Forced,
	MalformedDependencyFile,
	MissingDependency(PathBuf),
	MissingDependencyFile,
	MissingObject,
}

impl fmt::Display for StaleReason {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			StaleReason::ChangedDependency(path) => {
				write!(f, "'{}' changed", path.to_string_lossy())
			}
			StaleReason::Forced => write!(f, "forced"),
			StaleReason::MalformedDependencyFile => write!(f, "dependency file is malformed"),
			StaleReason::MissingDependency(path) => {
				write!(f, "'{}' no longer exists", path.to_string_lossy())
			}
			StaleReason::MissingDependencyFile => write!(f, "dependency file is missing"),
			StaleReason::MissingObject => write!(f, "object file is missing"),
		}
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Staleness {
	Stale(StaleReason),
	UpToDate,
}

impl Staleness {
	pub fn is_stale(&self) -> bool {
		matches!(self, Staleness::Stale(_))
	}
}

fn modified(path: &Path) -> Option<SystemTime> {
	fs::metadata(path).and_then(|metadata| metadata.modified()).ok()
}

/// Decides whether an object has to be recompiled, and why. Only reads the
/// filesystem.
///
/// Relative dependency paths are resolved against `working_directory`, the
/// directory the compiler ran from.
pub fn check(
	object_path: &Path,
	dependency_file_path: &Path,
	working_directory: &Path,
) -> Staleness {
	let object_modified = match modified(object_path) {
		Some(time) => time,
		None => return Staleness::Stale(StaleReason::MissingObject),
	};

	if !dependency_file_path.exists() {
		return Staleness::Stale(StaleReason::MissingDependencyFile);
	}

	let dependencies = match dependency_file::load(dependency_file_path) {
		Ok(dependencies) => dependencies,
		Err(_) => return Staleness::Stale(StaleReason::MalformedDependencyFile),
	};

	for dependency in dependencies {
		match modified(&working_directory.join(&dependency)) {
			None => return Staleness::Stale(StaleReason::MissingDependency(dependency)),
			Some(time) if time > object_modified => {
				return Staleness::Stale(StaleReason::ChangedDependency(dependency));
			}
			Some(_) => {}
		}
	}

	Staleness::UpToDate
}

/// A missing object counts as newer, the linker will report it.
pub fn needs_relink(binary_path: &Path, object_paths: &[PathBuf]) -> bool {
	let binary_modified = match modified(binary_path) {
		Some(time) => time,
		None => return true,
	};

	object_paths.iter().any(|object_path| match modified(object_path) {
		Some(time) => time > binary_modified,
		None => true,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use filetime::{set_file_mtime, FileTime};
	use tempfile::TempDir;

	const T0: i64 = 1_600_000_000;

	fn touch(path: &Path, contents: &str, seconds: i64) {
		fs::write(path, contents).unwrap();
		set_file_mtime(path, FileTime::from_unix_time(seconds, 0)).unwrap();
	}

	struct Fixture {
		directory: TempDir,
	}

	impl Fixture {
		// a.c includes util.h; both older than a.o.
		fn new() -> Self {
			let directory = TempDir::new().unwrap();
			let root = directory.path();
			fs::create_dir(root.join("obj")).unwrap();
			touch(&root.join("a.c"), "#include \"util.h\"\n", T0);
			touch(&root.join("util.h"), "\n", T0);
			touch(&root.join("obj/a.o"), "", T0 + 10);
			touch(&root.join("obj/a.o.d"), "obj/a.o: a.c util.h\n", T0 + 10);
			Fixture { directory }
		}

		fn root(&self) -> &Path {
			self.directory.path()
		}

		fn check(&self) -> Staleness {
			check(
				&self.root().join("obj/a.o"),
				&self.root().join("obj/a.o.d"),
				self.root(),
			)
		}
	}

	#[test]
	fn test_up_to_date() {
		let fixture = Fixture::new();
		assert_eq!(fixture.check(), Staleness::UpToDate);
	}

	#[test]
	fn test_same_time_is_up_to_date() {
		let fixture = Fixture::new();
		set_file_mtime(
			fixture.root().join("util.h"),
			FileTime::from_unix_time(T0 + 10, 0),
		)
		.unwrap();
		assert_eq!(fixture.check(), Staleness::UpToDate);
	}

	#[test]
	fn test_missing_object() {
		let fixture = Fixture::new();
		fs::remove_file(fixture.root().join("obj/a.o")).unwrap();
		assert_eq!(fixture.check(), Staleness::Stale(StaleReason::MissingObject));
	}

	#[test]
	fn test_missing_object_ignores_dependency_file() {
		let fixture = Fixture::new();
		fs::remove_file(fixture.root().join("obj/a.o")).unwrap();
		fs::write(fixture.root().join("obj/a.o.d"), "obj/a.o:\n").unwrap();
		assert!(fixture.check().is_stale());
	}

	#[test]
	fn test_missing_dependency_file() {
		let fixture = Fixture::new();
		fs::remove_file(fixture.root().join("obj/a.o.d")).unwrap();
		assert_eq!(
			fixture.check(),
			Staleness::Stale(StaleReason::MissingDependencyFile)
		);
	}

	#[test]
	fn test_malformed_dependency_file() {
		let fixture = Fixture::new();
		touch(&fixture.root().join("obj/a.o.d"), "truncated", T0 + 10);
		assert_eq!(
			fixture.check(),
			Staleness::Stale(StaleReason::MalformedDependencyFile)
		);
	}

	#[test]
	fn test_changed_dependency() {
		let fixture = Fixture::new();
		set_file_mtime(
			fixture.root().join("util.h"),
			FileTime::from_unix_time(T0 + 20, 0),
		)
		.unwrap();
		assert_eq!(
			fixture.check(),
			Staleness::Stale(StaleReason::ChangedDependency(PathBuf::from("util.h")))
		);
	}

	#[test]
	fn test_vanished_dependency() {
		let fixture = Fixture::new();
		fs::remove_file(fixture.root().join("util.h")).unwrap();
		assert_eq!(
			fixture.check(),
			Staleness::Stale(StaleReason::MissingDependency(PathBuf::from("util.h")))
		);
	}

	#[test]
	fn test_absolute_dependencies() {
		let fixture = Fixture::new();
		let header = fixture.root().join("util.h");
		touch(
			&fixture.root().join("obj/a.o.d"),
			&format!("obj/a.o: {}\n", header.to_string_lossy()),
			T0 + 10,
		);
		assert_eq!(fixture.check(), Staleness::UpToDate);

		set_file_mtime(&header, FileTime::from_unix_time(T0 + 20, 0)).unwrap();
		assert!(fixture.check().is_stale());
	}

	#[test]
	fn test_empty_dependency_list() {
		let fixture = Fixture::new();
		touch(&fixture.root().join("obj/a.o.d"), "obj/a.o:\n", T0 + 10);
		assert_eq!(fixture.check(), Staleness::UpToDate);
	}

	#[test]
	fn test_needs_relink() {
		let fixture = Fixture::new();
		let binary = fixture.root().join("main");
		let objects = vec![fixture.root().join("obj/a.o")];

		assert!(needs_relink(&binary, &objects));

		touch(&binary, "", T0 + 10);
		assert!(!needs_relink(&binary, &objects));

		set_file_mtime(&objects[0], FileTime::from_unix_time(T0 + 11, 0)).unwrap();
		assert!(needs_relink(&binary, &objects));

		assert!(needs_relink(&binary, &[fixture.root().join("obj/missing.o")]));
	}
}
