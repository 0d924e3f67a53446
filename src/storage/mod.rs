pub mod engine_config;
pub mod paths;
pub mod snapshot;
