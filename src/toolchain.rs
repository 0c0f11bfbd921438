use crate::configuration::Configuration;
use crate::errors::Diagnostics;
use crate::{Error, Result};
use encoding::all::UTF_8;
use encoding::{DecoderTrap, Encoding};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// A command line for an external tool, run without a shell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invocation {
	pub program: String,
	pub args: Vec<String>,
	pub current_directory: PathBuf,
}

impl Invocation {
	pub fn new(program: impl ToString, current_directory: &Path) -> Self {
		Invocation {
			program: program.to_string(),
			args: vec![],
			current_directory: current_directory.to_path_buf(),
		}
	}

	pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
		self.args.push(arg.as_ref().to_string());
		self
	}

	pub fn path_arg(self, path: &Path) -> Self {
		self.arg(path.to_string_lossy())
	}

	pub fn args<I>(mut self, args: I) -> Self
	where
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		self.args
			.extend(args.into_iter().map(|arg| arg.as_ref().to_string()));
		self
	}
}

impl fmt::Display for Invocation {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.program)?;
		for arg in &self.args {
			write!(f, " {}", arg)?;
		}
		Ok(())
	}
}

#[derive(Clone, Debug, Default)]
pub struct InvocationOutput {
	/// `None` when the process was terminated by a signal.
	pub code: Option<i32>,
	pub stdout: String,
	pub stderr: String,
}

impl InvocationOutput {
	pub fn success(&self) -> bool {
		self.code == Some(0)
	}

	pub fn into_diagnostics(self) -> Diagnostics {
		Diagnostics {
			stdout: self.stdout,
			stderr: self.stderr,
		}
	}
}

/// The only way the build reaches compilers, linkers and other tools.
pub trait Toolchain {
	/// Fails only if the tool could not be run at all; a non-zero exit code
	/// is reported through the output.
	fn invoke(&self, invocation: &Invocation) -> Result<InvocationOutput>;
}

pub struct ProcessToolchain<'a> {
	configuration: &'a Configuration,
}

impl<'a> ProcessToolchain<'a> {
	pub fn new(configuration: &'a Configuration) -> Self {
		ProcessToolchain { configuration }
	}
}

fn decode(bytes: &[u8]) -> Result<String> {
	UTF_8
		.decode(bytes, DecoderTrap::Ignore)
		.map_err(|err| Error::failed_to_convert_utf8(bytes, err.into_owned()))
}

impl Toolchain for ProcessToolchain<'_> {
	fn invoke(&self, invocation: &Invocation) -> Result<InvocationOutput> {
		let program = self.configuration.resolve_program(&invocation.program);
		debug!("{}", invocation);

		let output = Command::new(&program)
			.args(&invocation.args)
			.current_dir(&invocation.current_directory)
			.output()
			.map_err(|err| Error::failed_to_execute(&program, err))?;

		Ok(InvocationOutput {
			code: output.status.code(),
			stdout: decode(&output.stdout)?,
			stderr: decode(&output.stderr)?,
		})
	}
}
