#[path = "../common/mod.rs"]
#[macro_use]
pub mod common;

mod admin;
mod alerts;
mod assistant;
mod auth;
mod events;
mod health;
mod profiles;
mod resources;
