pub mod alerts;
pub mod assistant;
pub mod auth;
pub mod emergency;
pub mod events;
pub mod identity;
pub mod profiles;
pub mod resources;
