mod display_version_file;
mod find_version_files;
mod get_relative_path;
mod get_verstamp_config;
mod open_version_file;

pub use display_version_file::{display_update, display_version, display_version_file};
pub use find_version_files::find_version_files;
pub use get_relative_path::get_relative_path;
pub use get_verstamp_config::{CONFIG_FILE, get_verstamp_config, get_verstamp_dir};
pub use open_version_file::open_version_file;
