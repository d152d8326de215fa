pub mod chat;
pub mod disaster_info;
pub mod earthquake_info;
pub mod locate_resources;
pub mod prompt;
pub mod safety_tips;
pub mod severity;
