use std::path::PathBuf;

pub const COMPILE_COMMANDS_FILE_NAME: &str = "compile_commands.json";
pub const CONFIGURATION_FILE_NAME: &str = "config.yml";
pub const DEPENDENCY_FILE_EXTENSION: &str = "d";
pub const OBJECT_FILE_EXTENSION: &str = "o";
pub const SETTINGS_FILE_NAME: &str = "ccbuild.yml";

lazy_static! {
	pub static ref USER_SETTINGS_DIRECTORY: PathBuf = dirs::home_dir()
		.unwrap_or_else(std::env::temp_dir)
		.join(".ccbuild");
}
