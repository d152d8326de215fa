pub mod alerts;
pub mod events;
pub mod mock;
pub mod profiles;
pub mod resources;
pub mod sessions;
