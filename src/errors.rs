use std::convert::Into;
use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

/// Captured output of a failed tool invocation, reproduced verbatim.
#[derive(Debug, Default)]
pub struct Diagnostics {
	pub stdout: String,
	pub stderr: String,
}

impl fmt::Display for Diagnostics {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		if !self.stdout.is_empty() {
			write!(f, "\n{}", self.stdout.trim_end())?;
		}
		if !self.stderr.is_empty() {
			write!(f, "\n{}", self.stderr.trim_end())?;
		}
		Ok(())
	}
}

#[derive(Debug)]
pub enum ErrorKind {
	CompileFailed(PathBuf, Diagnostics),
	DuplicateObjectPath(PathBuf, PathBuf, PathBuf),
	ExecutionFailed(PathBuf),
	FailedToConvertUTF8(Vec<u8>),
	FailedToCreateDirectory(PathBuf),
	FailedToDeserialize(String),
	FailedToExecute(PathBuf),
	FailedToRead(PathBuf),
	FailedToReadDirectory(PathBuf),
	FailedToRemoveDirectory(PathBuf),
	FailedToWatch(PathBuf),
	FailedToWrite(PathBuf),
	LinkFailed(PathBuf, Diagnostics),
	MalformedDependencyFile(PathBuf),
	Message(String),
	PathHasInvalidFileName(PathBuf),
	ProvisioningFailed(String),
	UnsupportedSourceKind(PathBuf),
}

#[derive(Debug)]
pub struct Error {
	pub kind: ErrorKind,
	source: Option<Box<dyn StdError + Sync + Send>>,
}

impl Error {
	pub fn compile_failed(path: impl Into<PathBuf>, diagnostics: Diagnostics) -> Self {
		Error {
			kind: ErrorKind::CompileFailed(path.into(), diagnostics),
			source: None,
		}
	}

	pub fn compile_failed_to_execute(path: impl Into<PathBuf>, source: Error) -> Self {
		Error {
			kind: ErrorKind::CompileFailed(path.into(), Diagnostics::default()),
			source: Some(source.into()),
		}
	}

	pub fn duplicate_object_path(
		object: impl Into<PathBuf>,
		first: impl Into<PathBuf>,
		second: impl Into<PathBuf>,
	) -> Self {
		Error {
			kind: ErrorKind::DuplicateObjectPath(object.into(), first.into(), second.into()),
			source: None,
		}
	}

	pub fn execution_failed(path: impl Into<PathBuf>) -> Self {
		Error {
			kind: ErrorKind::ExecutionFailed(path.into()),
			source: None,
		}
	}

	pub fn failed_to_convert_utf8(
		contents: &[u8],
		source: impl Into<Box<dyn StdError + Send + Sync>>,
	) -> Self {
		Error {
			kind: ErrorKind::FailedToConvertUTF8(contents.to_vec()),
			source: Some(source.into()),
		}
	}

	pub fn failed_to_create_directory(path: impl Into<PathBuf>, source: ::std::io::Error) -> Self {
		Error {
			kind: ErrorKind::FailedToCreateDirectory(path.into()),
			source: Some(source.into()),
		}
	}

	pub fn failed_to_deserialize(
		contents: &str,
		source: impl Into<Box<dyn StdError + Send + Sync>>,
	) -> Self {
		Error {
			kind: ErrorKind::FailedToDeserialize(contents.to_string()),
			source: Some(source.into()),
		}
	}

	pub fn failed_to_execute(path: impl Into<PathBuf>, source: ::std::io::Error) -> Self {
		Error {
			kind: ErrorKind::FailedToExecute(path.into()),
			source: Some(source.into()),
		}
	}

	pub fn failed_to_read(path: impl Into<PathBuf>, source: ::std::io::Error) -> Self {
		Error {
			kind: ErrorKind::FailedToRead(path.into()),
			source: Some(source.into()),
		}
	}

	pub fn failed_to_read_directory(path: impl Into<PathBuf>, source: ::std::io::Error) -> Self {
		Error {
			kind: ErrorKind::FailedToReadDirectory(path.into()),
			source: Some(source.into()),
		}
	}

	pub fn failed_to_remove_directory(path: impl Into<PathBuf>, source: ::std::io::Error) -> Self {
		Error {
			kind: ErrorKind::FailedToRemoveDirectory(path.into()),
			source: Some(source.into()),
		}
	}

	pub fn failed_to_watch(path: impl Into<PathBuf>, source: notify::Error) -> Self {
		Error {
			kind: ErrorKind::FailedToWatch(path.into()),
			source: Some(source.into()),
		}
	}

	pub fn failed_to_write(path: impl Into<PathBuf>, source: ::std::io::Error) -> Self {
		Error {
			kind: ErrorKind::FailedToWrite(path.into()),
			source: Some(source.into()),
		}
	}

	pub fn link_failed(path: impl Into<PathBuf>, diagnostics: Diagnostics) -> Self {
		Error {
			kind: ErrorKind::LinkFailed(path.into(), diagnostics),
			source: None,
		}
	}

	pub fn link_failed_to_execute(path: impl Into<PathBuf>, source: Error) -> Self {
		Error {
			kind: ErrorKind::LinkFailed(path.into(), Diagnostics::default()),
			source: Some(source.into()),
		}
	}

	pub fn malformed_dependency_file(
		path: impl Into<PathBuf>,
		source: Option<Box<dyn StdError + Send + Sync>>,
	) -> Self {
		Error {
			kind: ErrorKind::MalformedDependencyFile(path.into()),
			source,
		}
	}

	pub fn message(text: impl ToString) -> Self {
		Self {
			kind: ErrorKind::Message(text.to_string()),
			source: None,
		}
	}

	pub fn path_has_invalid_file_name(path: impl Into<PathBuf>) -> Self {
		Error {
			kind: ErrorKind::PathHasInvalidFileName(path.into()),
			source: None,
		}
	}

	pub fn provisioning_failed(what: impl ToString, source: Option<Error>) -> Self {
		Error {
			kind: ErrorKind::ProvisioningFailed(what.to_string()),
			source: source.map(Into::into),
		}
	}

	pub fn unsupported_source_kind(path: impl Into<PathBuf>) -> Self {
		Error {
			kind: ErrorKind::UnsupportedSourceKind(path.into()),
			source: None,
		}
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match &self.kind {
			ErrorKind::CompileFailed(path, diagnostics) => write!(
				f,
				"Failed to compile '{}'.{}",
				path.to_string_lossy(),
				diagnostics,
			),
			ErrorKind::DuplicateObjectPath(object, first, second) => write!(
				f,
				"Sources '{}' and '{}' both compile to '{}'.",
				first.to_string_lossy(),
				second.to_string_lossy(),
				object.to_string_lossy(),
			),
			ErrorKind::ExecutionFailed(path) => {
				write!(f, "Execution of '{}' failed.", path.to_string_lossy())
			}
			ErrorKind::FailedToConvertUTF8(data) => {
				write!(f, "Failed to convert UTF8 from '{:x?}'.", data)
			}
			ErrorKind::FailedToCreateDirectory(path) => write!(
				f,
				"Failed to create directory '{}'.",
				path.to_string_lossy(),
			),
			ErrorKind::FailedToDeserialize(contents) => {
				write!(f, "Failed to deserialize '{}'.", contents)
			}
			ErrorKind::FailedToExecute(path) => {
				write!(f, "Failed to execute '{}'.", path.to_string_lossy())
			}
			ErrorKind::FailedToRead(path) => {
				write!(f, "Failed to read '{}'.", path.to_string_lossy())
			}
			ErrorKind::FailedToReadDirectory(path) => {
				write!(f, "Failed to read directory '{}'.", path.to_string_lossy())
			}
			ErrorKind::FailedToRemoveDirectory(path) => write!(
				f,
				"Failed to remove directory '{}'.",
				path.to_string_lossy(),
			),
			ErrorKind::FailedToWatch(path) => {
				write!(f, "Failed to watch '{}'.", path.to_string_lossy())
			}
			ErrorKind::FailedToWrite(path) => {
				write!(f, "Failed to write '{}'.", path.to_string_lossy())
			}
			ErrorKind::LinkFailed(path, diagnostics) => write!(
				f,
				"Failed to link '{}'.{}",
				path.to_string_lossy(),
				diagnostics,
			),
			ErrorKind::MalformedDependencyFile(path) => write!(
				f,
				"Dependency file '{}' is malformed.",
				path.to_string_lossy(),
			),
			ErrorKind::Message(message) => write!(f, "{}", message),
			ErrorKind::PathHasInvalidFileName(path) => {
				write!(f, "Path '{}' has invalid filename.", path.to_string_lossy())
			}
			ErrorKind::ProvisioningFailed(what) => write!(f, "Failed to provision {}.", what),
			ErrorKind::UnsupportedSourceKind(path) => write!(
				f,
				"Source '{}' has an unsupported extension.",
				path.to_string_lossy(),
			),
		}
	}
}

impl StdError for Error {
	fn source(&self) -> Option<&(dyn StdError + 'static)> {
		self.source
			.as_ref()
			.map(|c| &**c as &(dyn StdError + 'static))
	}
}

impl From<&str> for Error {
	fn from(text: &str) -> Self {
		Self::message(text)
	}
}

impl From<String> for Error {
	fn from(text: String) -> Self {
		Self::message(text)
	}
}

pub type Result<T> = ::std::result::Result<T, Error>;
