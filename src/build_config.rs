use crate::settings::Settings;
use crate::types::SourceKind;
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn default_c_compiler() -> String {
	"gcc".to_string()
}

fn default_cpp_compiler() -> String {
	"g++".to_string()
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Compilers {
	#[serde(default = "default_c_compiler")]
	pub c: String,
	#[serde(default = "default_cpp_compiler")]
	pub cpp: String,
}

impl Compilers {
	pub fn get(&self, kind: SourceKind) -> &str {
		match kind {
			SourceKind::C => &self.c,
			SourceKind::Cpp => &self.cpp,
		}
	}
}

impl Default for Compilers {
	fn default() -> Self {
		Compilers {
			c: default_c_compiler(),
			cpp: default_cpp_compiler(),
		}
	}
}

fn default_common_flags() -> String {
	"-Wall".to_string()
}

fn default_cpp_flags() -> String {
	"-std=c++17".to_string()
}

/// Whitespace-separated flag strings.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Flags {
	#[serde(default = "default_common_flags")]
	pub common: String,
	#[serde(default)]
	pub c: String,
	#[serde(default = "default_cpp_flags")]
	pub cpp: String,
}

impl Flags {
	pub fn get(&self, kind: SourceKind) -> &str {
		match kind {
			SourceKind::C => &self.c,
			SourceKind::Cpp => &self.cpp,
		}
	}

	pub fn args(&self, kind: SourceKind) -> Vec<String> {
		split_flags(&self.common)
			.chain(split_flags(self.get(kind)))
			.collect()
	}
}

impl Default for Flags {
	fn default() -> Self {
		Flags {
			common: default_common_flags(),
			c: String::new(),
			cpp: default_cpp_flags(),
		}
	}
}

pub fn split_flags(flags: &str) -> impl Iterator<Item = String> + '_ {
	flags.split_whitespace().map(|flag| flag.to_string())
}

pub fn append_flags(flags: &mut String, extra: &str) {
	let extra = extra.trim();
	if extra.is_empty() {
		return;
	}
	if !flags.is_empty() && !flags.ends_with(char::is_whitespace) {
		flags.push(' ');
	}
	flags.push_str(extra);
}

/// Everything one build run needs, with every path made absolute.
#[derive(Clone, Debug)]
pub struct BuildConfig {
	pub binary_directory: PathBuf,
	pub binary_name: String,
	pub compilers: Compilers,
	pub flags: Flags,
	pub link_flags: String,
	pub linker: String,
	pub object_directory: PathBuf,
	pub source_directories: Vec<PathBuf>,
	pub source_files: Vec<PathBuf>,
	/// Tools run from here, relative dependency paths resolve from here.
	pub working_directory: PathBuf,
}

impl BuildConfig {
	pub fn new(settings: &Settings, project_directory: &Path) -> Self {
		let resolve = |path: &PathBuf| project_directory.join(path);

		BuildConfig {
			binary_directory: resolve(&settings.binary_directory),
			binary_name: settings.binary_name.clone(),
			compilers: settings.compilers.clone(),
			flags: settings.flags.clone(),
			link_flags: settings.link_flags.clone(),
			linker: settings
				.linker
				.clone()
				.unwrap_or_else(|| settings.compilers.cpp.clone()),
			object_directory: resolve(&settings.object_directory),
			source_directories: settings.source_directories.iter().map(resolve).collect(),
			source_files: settings.source_files.iter().map(resolve).collect(),
			working_directory: project_directory.to_path_buf(),
		}
	}

	pub fn binary_path(&self) -> PathBuf {
		self.binary_directory.join(&self.binary_name)
	}

	pub fn resolve(&self, path: &Path) -> PathBuf {
		self.working_directory.join(path)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_flag_args() {
		let flags = Flags {
			common: "-Wall  -Iinclude".to_string(),
			c: String::new(),
			cpp: "-std=c++17".to_string(),
		};

		assert_eq!(flags.args(SourceKind::C), vec!["-Wall", "-Iinclude"]);
		assert_eq!(
			flags.args(SourceKind::Cpp),
			vec!["-Wall", "-Iinclude", "-std=c++17"]
		);
	}

	#[test]
	fn test_append_flags() {
		let mut flags = String::new();
		append_flags(&mut flags, " -Iexternal/json/include ");
		append_flags(&mut flags, "");
		append_flags(&mut flags, "-DNDEBUG");
		assert_eq!(flags, "-Iexternal/json/include -DNDEBUG");
	}

	#[test]
	fn test_new_resolves_paths() {
		let settings = Settings::default();
		let config = BuildConfig::new(&settings, Path::new("/work/relay"));

		assert_eq!(config.object_directory, PathBuf::from("/work/relay/obj"));
		assert_eq!(config.binary_path(), PathBuf::from("/work/relay/bin/main"));
		assert_eq!(
			config.source_directories,
			vec![PathBuf::from("/work/relay/src")]
		);
		assert_eq!(config.linker, "g++");
	}
}
