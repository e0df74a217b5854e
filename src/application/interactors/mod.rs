pub mod experience;
pub mod friend;
pub mod profile;
pub mod skill;
