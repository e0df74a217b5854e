pub mod experience;
pub mod id;
pub mod profile;
