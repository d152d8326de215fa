pub mod create;
pub mod get;
pub mod list;
pub mod map_config;
pub mod markers;
