pub mod admin;
pub mod client;
pub mod dtos;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
