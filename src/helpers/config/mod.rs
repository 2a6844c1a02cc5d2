use super::*;

mod build_config;
mod config_builder;
mod config_entries;
mod load_toml;
mod master_config;
mod parse_args;

pub use build_config::build_config;
#[cfg(test)]
pub use build_config::build_config_with;
pub use master_config::MasterConfig;

use config_builder::*;
use config_entries::*;
use load_toml::*;
use parse_args::*;
