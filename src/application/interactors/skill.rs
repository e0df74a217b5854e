use std::sync::Arc;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::profile::{ProfileDTO, SkillDTO};
use crate::application::interactors::profile::required_field;
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::profile::{ProfileWriter, SetMember};
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;

#[derive(Clone)]
pub struct AddSkillInteractor {
    db_session: Arc<dyn DBSession>,
    profile_writer: Arc<dyn ProfileWriter>,
}

impl AddSkillInteractor {
    pub fn new(db_session: Arc<dyn DBSession>, profile_writer: Arc<dyn ProfileWriter>) -> Self {
        Self {
            db_session,
            profile_writer,
        }
    }

    pub async fn execute(&self, dto: SkillDTO) -> AppResult<ProfileDTO> {
        let profile_id: Id<Profile> = dto.profile_id.try_into()?;
        let skill = required_field("skill", Some(dto.skill))?;

        let profile = self
            .profile_writer
            .add_to_set(&profile_id, SetMember::Skill(skill))
            .await?
            .ok_or(AppError::ProfileNotFound)?;
        self.db_session.commit().await?;

        Ok(profile.into())
    }
}

#[derive(Clone)]
pub struct DeleteSkillInteractor {
    db_session: Arc<dyn DBSession>,
    profile_writer: Arc<dyn ProfileWriter>,
}

impl DeleteSkillInteractor {
    pub fn new(db_session: Arc<dyn DBSession>, profile_writer: Arc<dyn ProfileWriter>) -> Self {
        Self {
            db_session,
            profile_writer,
        }
    }

    pub async fn execute(&self, dto: SkillDTO) -> AppResult<ProfileDTO> {
        let profile_id: Id<Profile> = dto.profile_id.try_into()?;

        let profile = self
            .profile_writer
            .remove_from_set(&profile_id, SetMember::Skill(dto.skill))
            .await?
            .ok_or(AppError::ProfileNotFound)?;
        self.db_session.commit().await?;

        Ok(profile.into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rstest::rstest;

    use crate::application::app_error::AppError;
    use crate::application::dto::profile::SkillDTO;
    use crate::application::interactors::skill::{AddSkillInteractor, DeleteSkillInteractor};
    use crate::application::interface::gateway::profile::SetMember;
    use crate::domain::entities::id::Id;
    use crate::domain::entities::profile::Profile;
    use crate::tests::mocks::{profile, MockDBSessionMock, MockProfileWriterMock};

    /// Writer whose set operations behave like the store: add is idempotent, remove tolerates absence.
    fn set_backed_writer(stored: Arc<Mutex<Profile>>) -> MockProfileWriterMock {
        let mut writer = MockProfileWriterMock::new();
        let on_add = stored.clone();
        writer.expect_add_to_set().returning(move |_, member| {
            let mut profile = on_add.lock().unwrap();
            if let SetMember::Skill(skill) = member {
                if !profile.skills.contains(&skill) {
                    profile.skills.push(skill);
                }
            }
            Ok(Some(profile.clone()))
        });
        let on_remove = stored;
        writer.expect_remove_from_set().returning(move |_, member| {
            let mut profile = on_remove.lock().unwrap();
            if let SetMember::Skill(skill) = member {
                profile.skills.retain(|s| *s != skill);
            }
            Ok(Some(profile.clone()))
        });
        writer
    }

    fn any_commit() -> Arc<MockDBSessionMock> {
        let mut db_session = MockDBSessionMock::new();
        db_session.expect_commit().returning(|| Ok(()));
        Arc::new(db_session)
    }

    fn skill(profile_id: &str, skill: &str) -> SkillDTO {
        SkillDTO {
            profile_id: profile_id.to_string(),
            skill: skill.to_string(),
        }
    }

    // Walks the add/add/delete/delete sequence on one profile
    // Verifies:
    // - Adding an existing skill keeps a single copy
    // - Deleting an absent skill is not an error
    #[rstest]
    #[tokio::test]
    async fn test_skill_set_semantics() {
        let stored = Arc::new(Mutex::new(profile("Ana", "ana@x.com")));
        let profile_id = stored.lock().unwrap().id.to_string();
        let writer = Arc::new(set_backed_writer(stored));
        let add = AddSkillInteractor::new(any_commit(), writer.clone());
        let delete = DeleteSkillInteractor::new(any_commit(), writer);

        let first = add.execute(skill(&profile_id, "go")).await.unwrap();
        assert_eq!(first.skills, vec!["go".to_string()]);

        let second = add.execute(skill(&profile_id, "go")).await.unwrap();
        assert_eq!(second.skills, vec!["go".to_string()]);

        let removed = delete.execute(skill(&profile_id, "go")).await.unwrap();
        assert!(removed.skills.is_empty());

        let removed_again = delete.execute(skill(&profile_id, "go")).await.unwrap();
        assert!(removed_again.skills.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_add_skill_missing_profile() {
        let mut writer = MockProfileWriterMock::new();
        writer.expect_add_to_set().returning(|_, _| Ok(None));

        let result = AddSkillInteractor::new(Arc::new(MockDBSessionMock::new()), Arc::new(writer))
            .execute(skill(&Id::<Profile>::generate().to_string(), "go"))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::ProfileNotFound));
    }

    #[rstest]
    #[tokio::test]
    async fn test_add_blank_skill_is_rejected() {
        let mut writer = MockProfileWriterMock::new();
        writer.expect_add_to_set().never();

        let result = AddSkillInteractor::new(Arc::new(MockDBSessionMock::new()), Arc::new(writer))
            .execute(skill(&Id::<Profile>::generate().to_string(), "  "))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::ValidationError(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_delete_skill_missing_profile() {
        let mut writer = MockProfileWriterMock::new();
        writer
            .expect_remove_from_set()
            .withf(|_, member| *member == SetMember::Skill("go".to_string()))
            .returning(|_, _| Ok(None));

        let result = DeleteSkillInteractor::new(Arc::new(MockDBSessionMock::new()), Arc::new(writer))
            .execute(skill(&Id::<Profile>::generate().to_string(), "go"))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::ProfileNotFound));
    }
}
