use crate::paths::{DEPENDENCY_FILE_EXTENSION, OBJECT_FILE_EXTENSION};
use crate::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SourceKind {
	C,
	Cpp,
}

impl SourceKind {
	/// Order in which kinds are collected from a source directory.
	pub const ALL: [SourceKind; 2] = [SourceKind::C, SourceKind::Cpp];

	pub fn extensions(self) -> &'static [&'static str] {
		match self {
			SourceKind::C => &["c"],
			SourceKind::Cpp => &["cpp", "cc", "cxx"],
		}
	}

	pub fn from_path(path: &Path) -> Option<Self> {
		let extension = path.extension()?.to_str()?;
		Self::ALL
			.iter()
			.copied()
			.find(|kind| kind.extensions().contains(&extension))
	}
}

impl fmt::Display for SourceKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			SourceKind::C => write!(f, "C"),
			SourceKind::Cpp => write!(f, "C++"),
		}
	}
}

/// One compilable source and the artifacts it produces.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceUnit {
	pub source_path: PathBuf,
	pub kind: SourceKind,
	pub object_path: PathBuf,
	/// Always next to `object_path`, so that both age together.
	pub dependency_file_path: PathBuf,
}

impl SourceUnit {
	pub fn new(source_path: PathBuf, kind: SourceKind, object_directory: &Path) -> Result<Self> {
		let stem = source_path
			.file_stem()
			.ok_or_else(|| Error::path_has_invalid_file_name(&source_path))?;

		let mut object_file_name = stem.to_os_string();
		object_file_name.push(".");
		object_file_name.push(OBJECT_FILE_EXTENSION);

		let mut dependency_file_name = object_file_name.clone();
		dependency_file_name.push(".");
		dependency_file_name.push(DEPENDENCY_FILE_EXTENSION);

		let object_path = object_directory.join(object_file_name);
		let dependency_file_path = object_directory.join(dependency_file_name);

		Ok(SourceUnit {
			source_path,
			kind,
			object_path,
			dependency_file_path,
		})
	}
}

#[derive(Debug)]
pub struct BuildResult {
	pub binary_path: PathBuf,
	/// In source resolution order, compiled or reused alike.
	pub object_paths: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_from_path() {
		assert_eq!(SourceKind::from_path(Path::new("a.c")), Some(SourceKind::C));
		assert_eq!(
			SourceKind::from_path(Path::new("src/b.cpp")),
			Some(SourceKind::Cpp)
		);
		assert_eq!(SourceKind::from_path(Path::new("c.cc")), Some(SourceKind::Cpp));
		assert_eq!(SourceKind::from_path(Path::new("script.py")), None);
		assert_eq!(SourceKind::from_path(Path::new("Makefile")), None);
	}

	#[test]
	fn test_unit_paths() {
		let unit = SourceUnit::new(
			PathBuf::from("src/net.client.cpp"),
			SourceKind::Cpp,
			Path::new("obj"),
		)
		.unwrap();

		assert_eq!(unit.object_path, PathBuf::from("obj/net.client.o"));
		assert_eq!(unit.dependency_file_path, PathBuf::from("obj/net.client.o.d"));
	}
}
