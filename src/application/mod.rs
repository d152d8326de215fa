pub mod admin;
pub mod alerts;
pub mod assistant;
pub mod auth;
pub mod events;
pub mod profiles;
pub mod resources;
