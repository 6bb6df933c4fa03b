//! Configuration management for forge

mod forge_config;

pub use forge_config::ForgeConfig;
