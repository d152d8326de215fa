pub mod auth;
pub mod completion;
pub mod config;
pub mod db;
pub mod identity;
pub mod repositories;
pub mod state;
