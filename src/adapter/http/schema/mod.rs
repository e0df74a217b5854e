pub mod message;
pub mod profile;
