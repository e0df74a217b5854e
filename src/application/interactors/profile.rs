use std::sync::Arc;

use tracing::{info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::id::IdDTO;
use crate::application::dto::profile::{
    CreateProfileDTO, ListProfilesDTO, ProfileDTO, ProfileDetailsDTO, UpdateInformationDTO, UpdateProfileDTO,
};
use crate::application::interactors::experience::{experience_from_input, new_experience};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::profile::{ProfileReader, ProfileWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::{Profile, ProfileFilter, ProfilePatch};

/// Returns the value when it is present and not blank.
pub(crate) fn required_field(field: &str, value: Option<String>) -> AppResult<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::ValidationError(format!("Field `{}` is required", field))),
    }
}

#[derive(Clone)]
pub struct ListProfilesInteractor {
    profile_reader: Arc<dyn ProfileReader>,
}

impl ListProfilesInteractor {
    pub fn new(profile_reader: Arc<dyn ProfileReader>) -> Self {
        Self { profile_reader }
    }

    pub async fn execute(&self, dto: ListProfilesDTO) -> AppResult<Vec<ProfileDTO>> {
        let skills = dto
            .skills
            .map(|skills| {
                skills
                    .into_iter()
                    .map(|skill| skill.trim().to_string())
                    .filter(|skill| !skill.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|skills| !skills.is_empty());
        let location = dto.location.filter(|location| !location.is_empty());

        let filter = ProfileFilter { skills, location };
        let profiles = self.profile_reader.find_many(&filter).await?;

        Ok(profiles.into_iter().map(ProfileDTO::from).collect())
    }
}

#[derive(Clone)]
pub struct GetProfileInteractor {
    profile_reader: Arc<dyn ProfileReader>,
}

impl GetProfileInteractor {
    pub fn new(profile_reader: Arc<dyn ProfileReader>) -> Self {
        Self { profile_reader }
    }

    pub async fn execute(&self, dto: IdDTO) -> AppResult<ProfileDetailsDTO> {
        let profile_id: Id<Profile> = dto.id.try_into()?;
        let profile = self
            .profile_reader
            .find_by_id(&profile_id)
            .await?
            .ok_or(AppError::ProfileNotFound)?;

        let friends = if profile.friends.is_empty() {
            Vec::new()
        } else {
            self.profile_reader.find_summaries(&profile.friends).await?
        };

        Ok(ProfileDetailsDTO::new(profile, friends))
    }
}

#[derive(Clone)]
pub struct CreateProfileInteractor {
    db_session: Arc<dyn DBSession>,
    profile_reader: Arc<dyn ProfileReader>,
    profile_writer: Arc<dyn ProfileWriter>,
}

impl CreateProfileInteractor {
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

    pub async fn execute(&self, dto: CreateProfileDTO) -> AppResult<ProfileDTO> {
        let name = required_field("name", dto.name)?;
        let email = required_field("email", dto.email)?;

        if self.profile_reader.is_email_taken(&email).await? {
            warn!("Profile creation with an email already in use: {}", email);
            return Err(AppError::EmailAlreadyExists);
        }

        let experience = dto.experience.into_iter().map(new_experience).collect();
        let profile = Profile::new(name, email, dto.skills, dto.information.into(), experience);

        let stored = self.profile_writer.insert(profile).await?;
        self.db_session.commit().await?;
        info!(profile_id = %stored.id, "Profile created");

        Ok(stored.into())
    }
}

#[derive(Clone)]
pub struct UpdateProfileInteractor {
    db_session: Arc<dyn DBSession>,
    profile_reader: Arc<dyn ProfileReader>,
    profile_writer: Arc<dyn ProfileWriter>,
}

impl UpdateProfileInteractor {
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

    pub async fn execute(&self, dto: UpdateProfileDTO) -> AppResult<ProfileDTO> {
        let profile_id: Id<Profile> = dto.id.try_into()?;

        let name = dto.name.map(|name| required_field("name", Some(name))).transpose()?;
        let email = dto.email.map(|email| required_field("email", Some(email))).transpose()?;
        let experience = dto
            .experience
            .map(|entries| entries.into_iter().map(experience_from_input).collect::<AppResult<Vec<_>>>())
            .transpose()?;
        let friends = dto
            .friends
            .map(|ids| ids.into_iter().map(Id::<Profile>::try_from).collect::<AppResult<Vec<_>>>())
            .transpose()?;

        let patch = ProfilePatch {
            name,
            email,
            skills: dto.skills,
            experience,
            information: dto.information.map(Into::into),
            friends,
        }
        .normalized();

        if patch.is_empty() {
            let profile = self
                .profile_reader
                .find_by_id(&profile_id)
                .await?
                .ok_or(AppError::ProfileNotFound)?;
            return Ok(profile.into());
        }

        let profile = self
            .profile_writer
            .update_fields(&profile_id, patch)
            .await?
            .ok_or(AppError::ProfileNotFound)?;
        self.db_session.commit().await?;

        Ok(profile.into())
    }
}

#[derive(Clone)]
pub struct DeleteProfileInteractor {
    db_session: Arc<dyn DBSession>,
    profile_writer: Arc<dyn ProfileWriter>,
}

impl DeleteProfileInteractor {
    pub fn new(db_session: Arc<dyn DBSession>, profile_writer: Arc<dyn ProfileWriter>) -> Self {
        Self {
            db_session,
            profile_writer,
        }
    }

    pub async fn execute(&self, dto: IdDTO) -> AppResult<()> {
        let profile_id: Id<Profile> = dto.id.try_into()?;

        if !self.profile_writer.soft_delete(&profile_id).await? {
            return Err(AppError::ProfileNotFound);
        }
        self.db_session.commit().await?;
        info!(profile_id = %profile_id, "Profile soft-deleted");

        Ok(())
    }
}

#[derive(Clone)]
pub struct UpdateInformationInteractor {
    db_session: Arc<dyn DBSession>,
    profile_writer: Arc<dyn ProfileWriter>,
}

impl UpdateInformationInteractor {
    pub fn new(db_session: Arc<dyn DBSession>, profile_writer: Arc<dyn ProfileWriter>) -> Self {
        Self {
            db_session,
            profile_writer,
        }
    }

    pub async fn execute(&self, dto: UpdateInformationDTO) -> AppResult<ProfileDTO> {
        let profile_id: Id<Profile> = dto.profile_id.try_into()?;

        let profile = self
            .profile_writer
            .update_fields(&profile_id, ProfilePatch::information(dto.information.into()))
            .await?
            .ok_or(AppError::ProfileNotFound)?;
        self.db_session.commit().await?;

        Ok(profile.into())
    }
}
