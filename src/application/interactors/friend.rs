use std::sync::Arc;

use tracing::warn;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::id::IdDTO;
use crate::application::dto::profile::{FriendDTO, FriendSummaryDTO, ProfileDTO};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::profile::{ProfileReader, ProfileWriter, SetMember};
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;

/// Links a profile to another one. The edge is stored on the first profile only.
#[derive(Clone)]
pub struct AddFriendInteractor {
    db_session: Arc<dyn DBSession>,
    profile_reader: Arc<dyn ProfileReader>,
    profile_writer: Arc<dyn ProfileWriter>,
}

impl AddFriendInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        profile_reader: Arc<dyn ProfileReader>,
        profile_writer: Arc<dyn ProfileWriter>,
    ) -> Self {
        Self {
            db_session,
            profile_reader,
            profile_writer,
        }
    }

    pub async fn execute(&self, dto: FriendDTO) -> AppResult<ProfileDTO> {
        let profile_id: Id<Profile> = dto.profile_id.try_into()?;
        let friend_id: Id<Profile> = dto.friend_id.try_into()?;

        let profile = self.profile_reader.find_by_id(&profile_id).await?;
        let friend = self.profile_reader.find_by_id(&friend_id).await?;
        if profile.is_none() || friend.is_none() {
            warn!(profile_id = %profile_id, friend_id = %friend_id, "Friend link between unknown profiles");
            return Err(AppError::ProfileNotFound);
        }

        // Either side may be soft-deleted between the lookups and this write.
        let profile = self
            .profile_writer
            .add_to_set(&profile_id, SetMember::Friend(friend_id))
            .await?
            .ok_or(AppError::ProfileNotFound)?;
        self.db_session.commit().await?;

        Ok(profile.into())
    }
}

#[derive(Clone)]
pub struct DeleteFriendInteractor {
    db_session: Arc<dyn DBSession>,
    profile_writer: Arc<dyn ProfileWriter>,
}

impl DeleteFriendInteractor {
    pub fn new(db_session: Arc<dyn DBSession>, profile_writer: Arc<dyn ProfileWriter>) -> Self {
        Self {
            db_session,
            profile_writer,
        }
    }

    pub async fn execute(&self, dto: FriendDTO) -> AppResult<ProfileDTO> {
        let profile_id: Id<Profile> = dto.profile_id.try_into()?;
        let friend_id: Id<Profile> = dto.friend_id.try_into()?;

        let profile = self
            .profile_writer
            .remove_from_set(&profile_id, SetMember::Friend(friend_id))
            .await?
            .ok_or(AppError::ProfileNotFound)?;
        self.db_session.commit().await?;

        Ok(profile.into())
    }
}

#[derive(Clone)]
pub struct GetFriendsInteractor {
    profile_reader: Arc<dyn ProfileReader>,
}

impl GetFriendsInteractor {
    pub fn new(profile_reader: Arc<dyn ProfileReader>) -> Self {
        Self { profile_reader }
    }

    pub async fn execute(&self, dto: IdDTO) -> AppResult<Vec<FriendSummaryDTO>> {
        let profile_id: Id<Profile> = dto.id.try_into()?;
        let profile = self
            .profile_reader
            .find_by_id(&profile_id)
            .await?
            .ok_or(AppError::ProfileNotFound)?;

        if profile.friends.is_empty() {
            return Ok(Vec::new());
        }
        let friends = self.profile_reader.find_summaries(&profile.friends).await?;

        Ok(friends.into_iter().map(FriendSummaryDTO::from).collect())
    }
}
