//! User configuration stored in `~/.devradar/config.ini`.
//!
//! - [`settings`]: one struct per `[section]`
//! - [`defaults`]: `DEFAULT_*` constants and `ConfigFile::default()`
//! - [`file`]: load/save and the config paths
//! - [`keys`]: typed get/set by `section.key` name for the CLI
//!
//! A missing file means defaults. Values present in the file overlay the
//! defaults; invalid values are rejected with
//! [`ConfigFileError::InvalidValue`].

mod defaults;
mod file;
mod keys;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::{
    ApiSettings, ConfigFile, LocationSettings, LoggingSettings, RealtimeSettings, ViewSettings,
};
