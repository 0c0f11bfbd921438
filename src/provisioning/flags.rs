use crate::build_config::{append_flags, BuildConfig};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FlagsSettings {
	#[serde(default)]
	pub common: String,
	#[serde(default)]
	pub c: String,
	#[serde(default)]
	pub cpp: String,
	#[serde(default)]
	pub link: String,
}

impl FlagsSettings {
	pub fn apply(&self, mut config: BuildConfig) -> BuildConfig {
		append_flags(&mut config.flags.common, &self.common);
		append_flags(&mut config.flags.c, &self.c);
		append_flags(&mut config.flags.cpp, &self.cpp);
		append_flags(&mut config.link_flags, &self.link);
		config
	}
}
