use std::sync::Arc;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::profile::{AddExperienceDTO, DeleteExperienceDTO, ExperienceInputDTO, ProfileDTO};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::profile::ProfileWriter;
use crate::domain::entities::experience::Experience;
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;

/// Builds an entry with a fresh id, whatever the input carried.
pub(crate) fn new_experience(dto: ExperienceInputDTO) -> Experience {
    Experience::new(dto.title, dto.company, dto.dates, dto.description)
}

/// Builds an entry keeping the client-supplied id when there is one.
pub(crate) fn experience_from_input(dto: ExperienceInputDTO) -> AppResult<Experience> {
    let id = dto.id.clone().map(Id::<Experience>::try_from).transpose()?;
    let mut experience = new_experience(dto);
    if let Some(id) = id {
        experience.id = id;
    }
    Ok(experience)
}

#[derive(Clone)]
pub struct AddExperienceInteractor {
    db_session: Arc<dyn DBSession>,
    profile_writer: Arc<dyn ProfileWriter>,
}

impl AddExperienceInteractor {
    pub fn new(db_session: Arc<dyn DBSession>, profile_writer: Arc<dyn ProfileWriter>) -> Self {
        Self {
            db_session,
            profile_writer,
        }
    }

    pub async fn execute(&self, dto: AddExperienceDTO) -> AppResult<ProfileDTO> {
        let profile_id: Id<Profile> = dto.profile_id.try_into()?;

        let profile = self
            .profile_writer
            .push_experience(&profile_id, new_experience(dto.experience))
            .await?
            .ok_or(AppError::ProfileNotFound)?;
        self.db_session.commit().await?;

        Ok(profile.into())
    }
}

#[derive(Clone)]
pub struct DeleteExperienceInteractor {
    db_session: Arc<dyn DBSession>,
    profile_writer: Arc<dyn ProfileWriter>,
}

impl DeleteExperienceInteractor {
    pub fn new(db_session: Arc<dyn DBSession>, profile_writer: Arc<dyn ProfileWriter>) -> Self {
        Self {
            db_session,
            profile_writer,
        }
    }

    pub async fn execute(&self, dto: DeleteExperienceDTO) -> AppResult<ProfileDTO> {
        let profile_id: Id<Profile> = dto.profile_id.try_into()?;
        let experience_id: Id<Experience> = dto.experience_id.try_into()?;

        let profile = self
            .profile_writer
            .pull_experience(&profile_id, &experience_id)
            .await?
            .ok_or(AppError::ProfileNotFound)?;
        self.db_session.commit().await?;

        Ok(profile.into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::{fixture, rstest};

    use crate::application::app_error::AppError;
    use crate::application::dto::profile::{AddExperienceDTO, DeleteExperienceDTO, ExperienceInputDTO};
    use crate::application::interactors::experience::{
        experience_from_input, AddExperienceInteractor, DeleteExperienceInteractor,
    };
    use crate::domain::entities::experience::Experience;
    use crate::domain::entities::id::Id;
    use crate::domain::entities::profile::Profile;
    use crate::tests::mocks::{committing_session, profile, MockDBSessionMock, MockProfileWriterMock};

    #[fixture]
    fn engineer() -> ExperienceInputDTO {
        ExperienceInputDTO {
            id: None,
            title: Some("Eng".to_string()),
            company: Some("Acme".to_string()),
            dates: Some("2020-2021".to_string()),
            description: Some("did stuff".to_string()),
        }
    }

    #[rstest]
    fn test_experience_from_input_keeps_given_id(mut engineer: ExperienceInputDTO) {
        let id: Id<Experience> = Id::generate();
        engineer.id = Some(id.to_string());

        let experience = experience_from_input(engineer).unwrap();

        assert_eq!(experience.id, id);
        assert_eq!(experience.company.as_deref(), Some("Acme"));
    }

    #[rstest]
    fn test_experience_from_input_rejects_malformed_id(mut engineer: ExperienceInputDTO) {
        engineer.id = Some("exp-1".to_string());

        assert!(matches!(experience_from_input(engineer).unwrap_err(), AppError::InvalidId(_)));
    }

    // === AddExperienceInteractor ===
    #[rstest]
    #[tokio::test]
    async fn test_add_experience_appends_entry_with_generated_id(engineer: ExperienceInputDTO) {
        let ana = profile("Ana", "ana@x.com");
        let profile_id = ana.id.to_string();

        let mut writer = MockProfileWriterMock::new();
        writer
            .expect_push_experience()
            .withf(|_, experience| experience.title.as_deref() == Some("Eng") && experience.dates.is_some())
            .returning(move |_, experience| {
                let mut updated = ana.clone();
                updated.experience.push(experience);
                Ok(Some(updated))
            });

        let result = AddExperienceInteractor::new(Arc::new(committing_session()), Arc::new(writer))
            .execute(AddExperienceDTO {
                profile_id,
                experience: engineer,
            })
            .await
            .unwrap();

        assert_eq!(result.experience.len(), 1);
        assert!(!result.experience[0].id.is_empty());
        assert_eq!(result.experience[0].description.as_deref(), Some("did stuff"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_add_experience_ignores_client_id(mut engineer: ExperienceInputDTO) {
        let client_id: Id<Experience> = Id::generate();
        engineer.id = Some(client_id.to_string());

        let mut writer = MockProfileWriterMock::new();
        writer
            .expect_push_experience()
            .withf(move |_, experience| experience.id != client_id)
            .returning(|_, _| Ok(Some(profile("Ana", "ana@x.com"))));

        let result = AddExperienceInteractor::new(Arc::new(committing_session()), Arc::new(writer))
            .execute(AddExperienceDTO {
                profile_id: Id::<Profile>::generate().to_string(),
                experience: engineer,
            })
            .await;

        assert!(result.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn test_add_experience_missing_profile(engineer: ExperienceInputDTO) {
        let mut writer = MockProfileWriterMock::new();
        writer.expect_push_experience().returning(|_, _| Ok(None));

        let result = AddExperienceInteractor::new(Arc::new(MockDBSessionMock::new()), Arc::new(writer))
            .execute(AddExperienceDTO {
                profile_id: Id::<Profile>::generate().to_string(),
                experience: engineer,
            })
            .await;

        assert!(matches!(result.unwrap_err(), AppError::ProfileNotFound));
    }

    // === DeleteExperienceInteractor ===
    #[rstest]
    #[tokio::test]
    async fn test_delete_unknown_experience_is_noop() {
        let mut ana = profile("Ana", "ana@x.com");
        ana.experience.push(Experience::new(Some("Eng".to_string()), None, None, None));
        let profile_id = ana.id.to_string();

        let mut writer = MockProfileWriterMock::new();
        writer
            .expect_pull_experience()
            .returning(move |_, _| Ok(Some(ana.clone())));

        let result = DeleteExperienceInteractor::new(Arc::new(committing_session()), Arc::new(writer))
            .execute(DeleteExperienceDTO {
                profile_id,
                experience_id: Id::<Experience>::generate().to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.experience.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_delete_experience_passes_both_ids() {
        let profile_id: Id<Profile> = Id::generate();
        let experience_id: Id<Experience> = Id::generate();
        let (expected_profile, expected_experience) = (profile_id.clone(), experience_id.clone());

        let mut writer = MockProfileWriterMock::new();
        writer
            .expect_pull_experience()
            .withf(move |p, e| *p == expected_profile && *e == expected_experience)
            .returning(|_, _| Ok(Some(profile("Ana", "ana@x.com"))));

        let result = DeleteExperienceInteractor::new(Arc::new(committing_session()), Arc::new(writer))
            .execute(DeleteExperienceDTO {
                profile_id: profile_id.to_string(),
                experience_id: experience_id.to_string(),
            })
            .await
            .unwrap();

        assert!(result.experience.is_empty());
    }

    #[rstest]
    #[case("not-a-uuid", "019c47ec-183d-744e-b11d-cd409015bf13")]
    #[case("019c47ec-183d-744e-b11d-cd409015bf13", "not-a-uuid")]
    #[tokio::test]
    async fn test_delete_experience_invalid_ids(#[case] profile_id: &str, #[case] experience_id: &str) {
        let mut writer = MockProfileWriterMock::new();
        writer.expect_pull_experience().never();

        let result = DeleteExperienceInteractor::new(Arc::new(MockDBSessionMock::new()), Arc::new(writer))
            .execute(DeleteExperienceDTO {
                profile_id: profile_id.to_string(),
                experience_id: experience_id.to_string(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidId(_)));
    }
}
