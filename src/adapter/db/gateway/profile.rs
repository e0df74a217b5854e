use std::collections::HashMap;

use async_trait::async_trait;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::Row;
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::gateway::profile::{ProfileReader, ProfileWriter, SetMember};
use crate::domain::entities::experience::Experience;
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::{FriendSummary, Information, Profile, ProfileFilter, ProfilePatch};

const PROFILE_COLUMNS: &str =
    "id, name, email, skills, experience, information, friends, is_deleted, created_at, updated_at";

/// Shape of one element of the `experience` JSONB array.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExperienceDocument {
    id: Uuid,
    title: Option<String>,
    company: Option<String>,
    dates: Option<String>,
    description: Option<String>,
}

impl From<Experience> for ExperienceDocument {
    fn from(experience: Experience) -> Self {
        Self {
            id: experience.id.value,
            title: experience.title,
            company: experience.company,
            dates: experience.dates,
            description: experience.description,
        }
    }
}

impl From<ExperienceDocument> for Experience {
    fn from(document: ExperienceDocument) -> Self {
        Self {
            id: Id::new(document.id),
            title: document.title,
            company: document.company,
            dates: document.dates,
            description: document.description,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct InformationDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    website: Option<String>,
}

impl From<Information> for InformationDocument {
    fn from(information: Information) -> Self {
        Self {
            bio: information.bio,
            location: information.location,
            website: information.website,
        }
    }
}

impl From<InformationDocument> for Information {
    fn from(document: InformationDocument) -> Self {
        Self {
            bio: document.bio,
            location: document.location,
            website: document.website,
        }
    }
}

fn experience_documents(entries: Vec<Experience>) -> Json<Vec<ExperienceDocument>> {
    Json(entries.into_iter().map(ExperienceDocument::from).collect())
}

/// Escapes LIKE metacharacters so the input only ever matches literally.
fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn map_unique_violation(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::EmailAlreadyExists,
        other => AppError::DatabaseError(other),
    }
}

#[derive(Clone)]
pub struct ProfileGateway {
    session: SqlxSession,
}

impl ProfileGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn to_profile(row: &PgRow) -> AppResult<Profile> {
        let experience: Json<Vec<ExperienceDocument>> = row.try_get("experience")?;
        let information: Json<InformationDocument> = row.try_get("information")?;
        let friends: Vec<Uuid> = row.try_get("friends")?;

        Ok(Profile {
            id: Id::new(row.try_get("id")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            skills: row.try_get("skills")?,
            experience: experience.0.into_iter().map(Experience::from).collect(),
            information: information.0.into(),
            friends: friends.into_iter().map(Id::new).collect(),
            is_deleted: row.try_get("is_deleted")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn find_profile(result: Option<PgRow>) -> AppResult<Option<Profile>> {
        match result {
            Some(row) => Ok(Some(Self::to_profile(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ProfileReader for ProfileGateway {
    async fn find_many(&self, filter: &ProfileFilter) -> AppResult<Vec<Profile>> {
        let skills = filter.skills.clone();
        let location = filter.location.as_deref().map(escape_like);
        self.session
            .with_tx(|tx| {
                async move {
                    let rows = sqlx::query(&format!(
                        r#"
                            SELECT {PROFILE_COLUMNS}
                            FROM profiles
                            WHERE
                                is_deleted = false
                                AND ($1::text[] IS NULL OR skills && $1::text[])
                                AND ($2::text IS NULL OR information->>'location' ILIKE '%' || $2::text || '%')
                            ORDER BY created_at
                        "#
                    ))
                    .bind(skills)
                    .bind(location)
                    .fetch_all(tx.as_mut())
                    .await?;
                    rows.iter().map(Self::to_profile).collect()
                }
                .boxed()
            })
            .await
    }

    async fn find_by_id(&self, profile_id: &Id<Profile>) -> AppResult<Option<Profile>> {
        let id = profile_id.value;
        self.session
            .with_tx(|tx| {
                async move {
                    let result = sqlx::query(&format!(
                        r#"
                            SELECT {PROFILE_COLUMNS}
                            FROM profiles
                            WHERE id = $1 AND is_deleted = false
                        "#
                    ))
                    .bind(id)
                    .fetch_optional(tx.as_mut())
                    .await?;
                    Self::find_profile(result)
                }
                .boxed()
            })
            .await
    }

    async fn is_email_taken(&self, email: &str) -> AppResult<bool> {
        let email = email.to_owned();
        self.session
            .with_tx(|tx| {
                async move {
                    let row = sqlx::query(
                        r#"
                            SELECT EXISTS(SELECT 1 FROM profiles WHERE email = $1) AS taken
                        "#,
                    )
                    .bind(email)
                    .fetch_one(tx.as_mut())
                    .await?;
                    let taken: bool = row.try_get("taken")?;
                    Ok(taken)
                }
                .boxed()
            })
            .await
    }

    async fn find_summaries(&self, profile_ids: &[Id<Profile>]) -> AppResult<Vec<FriendSummary>> {
        let ids: Vec<Uuid> = profile_ids.iter().map(|id| id.value).collect();
        let rows = self
            .session
            .with_tx(|tx| {
                let ids = ids.clone();
                async move {
                    let rows = sqlx::query(
                        r#"
                            SELECT id, name, email
                            FROM profiles
                            WHERE id = ANY($1) AND is_deleted = false
                        "#,
                    )
                    .bind(ids)
                    .fetch_all(tx.as_mut())
                    .await?;
                    Ok(rows)
                }
                .boxed()
            })
            .await?;

        let mut by_id = HashMap::with_capacity(rows.len());
        for row in rows {
            let id: Uuid = row.try_get("id")?;
            by_id.insert(
                id,
                FriendSummary {
                    id: Id::new(id),
                    name: row.try_get("name")?,
                    email: row.try_get("email")?,
                },
            );
        }
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}

#[async_trait]
impl ProfileWriter for ProfileGateway {
    async fn insert(&self, profile: Profile) -> AppResult<Profile> {
        self.session
            .with_tx(|tx| {
                let profile = profile.clone();
                async move {
                    let friends: Vec<Uuid> = profile.friends.iter().map(|id| id.value).collect();
                    let row = sqlx::query(&format!(
                        r#"
                            INSERT INTO profiles
                                (id, name, email, skills, experience, information, friends,
                                 is_deleted, created_at, updated_at)
                            VALUES
                                ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                            RETURNING
                                {PROFILE_COLUMNS}
                        "#
                    ))
                    .bind(profile.id.value)
                    .bind(&profile.name)
                    .bind(&profile.email)
                    .bind(&profile.skills)
                    .bind(experience_documents(profile.experience))
                    .bind(Json(InformationDocument::from(profile.information)))
                    .bind(friends)
                    .bind(profile.is_deleted)
                    .bind(profile.created_at)
                    .bind(profile.updated_at)
                    .fetch_one(tx.as_mut())
                    .await
                    .map_err(map_unique_violation)?;
                    Self::to_profile(&row)
                }
                .boxed()
            })
            .await
    }

    async fn update_fields(&self, profile_id: &Id<Profile>, patch: ProfilePatch) -> AppResult<Option<Profile>> {
        let id = profile_id.value;
        self.session
            .with_tx(|tx| {
                async move {
                    let friends: Option<Vec<Uuid>> = patch
                        .friends
                        .map(|friends| friends.into_iter().map(|id| id.value).collect());
                    let result = sqlx::query(&format!(
                        r#"
                            UPDATE
                                profiles
                            SET
                                name = COALESCE($2, name),
                                email = COALESCE($3, email),
                                skills = COALESCE($4::text[], skills),
                                experience = COALESCE($5::jsonb, experience),
                                information = COALESCE($6::jsonb, information),
                                friends = COALESCE($7::uuid[], friends),
                                updated_at = now()
                            WHERE
                                id = $1 AND is_deleted = false
                            RETURNING
                                {PROFILE_COLUMNS}
                        "#
                    ))
                    .bind(id)
                    .bind(patch.name)
                    .bind(patch.email)
                    .bind(patch.skills)
                    .bind(patch.experience.map(experience_documents))
                    .bind(patch.information.map(|information| Json(InformationDocument::from(information))))
                    .bind(friends)
                    .fetch_optional(tx.as_mut())
                    .await
                    .map_err(map_unique_violation)?;
                    Self::find_profile(result)
                }
                .boxed()
            })
            .await
    }

    async fn add_to_set(&self, profile_id: &Id<Profile>, member: SetMember) -> AppResult<Option<Profile>> {
        let id = profile_id.value;
        self.session
            .with_tx(|tx| {
                async move {
                    let query = match &member {
                        SetMember::Skill(_) => format!(
                            r#"
                                UPDATE profiles
                                SET
                                    skills = CASE WHEN $2::text = ANY(skills) THEN skills
                                             ELSE array_append(skills, $2::text) END,
                                    updated_at = now()
                                WHERE id = $1 AND is_deleted = false
                                RETURNING {PROFILE_COLUMNS}
                            "#
                        ),
                        SetMember::Friend(_) => format!(
                            r#"
                                UPDATE profiles
                                SET
                                    friends = CASE WHEN $2::uuid = ANY(friends) THEN friends
                                              ELSE array_append(friends, $2::uuid) END,
                                    updated_at = now()
                                WHERE id = $1 AND is_deleted = false
                                RETURNING {PROFILE_COLUMNS}
                            "#
                        ),
                    };
                    let statement = sqlx::query(&query).bind(id);
                    let statement = match member {
                        SetMember::Skill(skill) => statement.bind(skill),
                        SetMember::Friend(friend_id) => statement.bind(friend_id.value),
                    };
                    let result = statement.fetch_optional(tx.as_mut()).await?;
                    Self::find_profile(result)
                }
                .boxed()
            })
            .await
    }

    async fn remove_from_set(&self, profile_id: &Id<Profile>, member: SetMember) -> AppResult<Option<Profile>> {
        let id = profile_id.value;
        self.session
            .with_tx(|tx| {
                async move {
                    let query = match &member {
                        SetMember::Skill(_) => format!(
                            r#"
                                UPDATE profiles
                                SET skills = array_remove(skills, $2::text), updated_at = now()
                                WHERE id = $1 AND is_deleted = false
                                RETURNING {PROFILE_COLUMNS}
                            "#
                        ),
                        SetMember::Friend(_) => format!(
                            r#"
                                UPDATE profiles
                                SET friends = array_remove(friends, $2::uuid), updated_at = now()
                                WHERE id = $1 AND is_deleted = false
                                RETURNING {PROFILE_COLUMNS}
                            "#
                        ),
                    };
                    let statement = sqlx::query(&query).bind(id);
                    let statement = match member {
                        SetMember::Skill(skill) => statement.bind(skill),
                        SetMember::Friend(friend_id) => statement.bind(friend_id.value),
                    };
                    let result = statement.fetch_optional(tx.as_mut()).await?;
                    Self::find_profile(result)
                }
                .boxed()
            })
            .await
    }

    async fn push_experience(&self, profile_id: &Id<Profile>, experience: Experience) -> AppResult<Option<Profile>> {
        let id = profile_id.value;
        self.session
            .with_tx(|tx| {
                async move {
                    let result = sqlx::query(&format!(
                        r#"
                            UPDATE profiles
                            SET
                                experience = experience || jsonb_build_array($2::jsonb),
                                updated_at = now()
                            WHERE id = $1 AND is_deleted = false
                            RETURNING {PROFILE_COLUMNS}
                        "#
                    ))
                    .bind(id)
                    .bind(Json(ExperienceDocument::from(experience)))
                    .fetch_optional(tx.as_mut())
                    .await?;
                    Self::find_profile(result)
                }
                .boxed()
            })
            .await
    }

    async fn pull_experience(
        &self,
        profile_id: &Id<Profile>,
        experience_id: &Id<Experience>,
    ) -> AppResult<Option<Profile>> {
        let id = profile_id.value;
        let experience_id = experience_id.value.to_string();
        self.session
            .with_tx(|tx| {
                async move {
                    let result = sqlx::query(&format!(
                        r#"
                            UPDATE profiles
                            SET
                                experience = COALESCE(
                                    (
                                        SELECT jsonb_agg(entry ORDER BY position)
                                        FROM jsonb_array_elements(experience) WITH ORDINALITY AS e(entry, position)
                                        WHERE entry->>'id' <> $2::text
                                    ),
                                    '[]'::jsonb
                                ),
                                updated_at = now()
                            WHERE id = $1 AND is_deleted = false
                            RETURNING {PROFILE_COLUMNS}
                        "#
                    ))
                    .bind(id)
                    .bind(experience_id)
                    .fetch_optional(tx.as_mut())
                    .await?;
                    Self::find_profile(result)
                }
                .boxed()
            })
            .await
    }

    async fn soft_delete(&self, profile_id: &Id<Profile>) -> AppResult<bool> {
        let id = profile_id.value;
        self.session
            .with_tx(|tx| {
                async move {
                    let result = sqlx::query(
                        r#"
                            UPDATE profiles
                            SET is_deleted = true, updated_at = now()
                            WHERE id = $1
                            RETURNING id
                        "#,
                    )
                    .bind(id)
                    .fetch_optional(tx.as_mut())
                    .await?;
                    Ok(result.is_some())
                }
                .boxed()
            })
            .await
    }
}
