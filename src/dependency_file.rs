//! Reader for the make-rule dependency files emitted by `-MMD -MF`.

use crate::{Error, Result};
use encoding::all::UTF_8;
use encoding::{DecoderTrap, Encoding};
use nom::{
	bytes::complete::{take_till, take_till1},
	character::complete::{char, multispace0},
	multi::many0,
	sequence::{preceded, terminated},
	IResult,
};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub type DependencySet = BTreeSet<PathBuf>;

fn target(input: &str) -> IResult<&str, &str> {
	terminated(take_till(|c: char| c == ':'), char(':'))(input)
}

fn dependency(input: &str) -> IResult<&str, &str> {
	preceded(multispace0, take_till1(|c: char| c.is_whitespace()))(input)
}

/// Everything after the first colon, split on whitespace.
pub fn rule(input: &str) -> IResult<&str, Vec<&str>> {
	preceded(target, many0(dependency))(input)
}

fn join_continuations(contents: &str) -> String {
	contents.replace("\\\r\n", "").replace("\\\n", "")
}

pub fn parse(contents: &str) -> Option<DependencySet> {
	let contents = join_continuations(contents);
	let (_, dependencies) = rule(&contents).ok()?;
	Some(dependencies.into_iter().map(PathBuf::from).collect())
}

/// Fails with `MalformedDependencyFile` whenever the dependencies cannot be
/// known, which is not the same as having none.
pub fn load(path: &Path) -> Result<DependencySet> {
	let bytes =
		fs::read(path).map_err(|err| Error::malformed_dependency_file(path, Some(err.into())))?;

	let contents = UTF_8
		.decode(&bytes, DecoderTrap::Strict)
		.map_err(|err| Error::malformed_dependency_file(path, Some(err.into_owned().into())))?;

	parse(&contents).ok_or_else(|| Error::malformed_dependency_file(path, None))
}
