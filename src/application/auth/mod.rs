pub mod login;
pub mod logout;
pub mod refresh;
pub mod signup;
pub mod token_utils;
