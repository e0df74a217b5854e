use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::experience::Experience;
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::{FriendSummary, Profile, ProfileFilter, ProfilePatch};

/// Member of one of the set-like array fields of a profile.
#[derive(Debug, Clone, PartialEq)]
pub enum SetMember {
    Skill(String),
    Friend(Id<Profile>),
}

#[async_trait]
pub trait ProfileReader: Send + Sync {
    async fn find_many(&self, filter: &ProfileFilter) -> AppResult<Vec<Profile>>;
    async fn find_by_id(&self, profile_id: &Id<Profile>) -> AppResult<Option<Profile>>;
    /// Soft-deleted profiles still hold their email.
    async fn is_email_taken(&self, email: &str) -> AppResult<bool>;
    async fn find_summaries(&self, profile_ids: &[Id<Profile>]) -> AppResult<Vec<FriendSummary>>;
}

/// Every method except `insert` and `soft_delete` targets live profiles only and
/// returns `None` when there is none with that id.
#[async_trait]
pub trait ProfileWriter: Send + Sync {
    async fn insert(&self, profile: Profile) -> AppResult<Profile>;
    async fn update_fields(&self, profile_id: &Id<Profile>, patch: ProfilePatch) -> AppResult<Option<Profile>>;
    async fn add_to_set(&self, profile_id: &Id<Profile>, member: SetMember) -> AppResult<Option<Profile>>;
    async fn remove_from_set(&self, profile_id: &Id<Profile>, member: SetMember) -> AppResult<Option<Profile>>;
    async fn push_experience(&self, profile_id: &Id<Profile>, experience: Experience) -> AppResult<Option<Profile>>;
    async fn pull_experience(
        &self,
        profile_id: &Id<Profile>,
        experience_id: &Id<Experience>,
    ) -> AppResult<Option<Profile>>;
    /// Flags the profile whatever its current state; `false` when the id is unknown.
    async fn soft_delete(&self, profile_id: &Id<Profile>) -> AppResult<bool>;
}
