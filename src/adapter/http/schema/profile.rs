use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::dto::profile::{
    ExperienceDTO, ExperienceInputDTO, FriendSummaryDTO, InformationDTO, ProfileDTO, ProfileDetailsDTO,
};

/// Free-form profile details. Keys other than these are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct Information {
    #[schema(example = "Backend developer")]
    pub bio: Option<String>,
    #[schema(example = "Berlin")]
    pub location: Option<String>,
    #[schema(example = "https://example.com")]
    pub website: Option<String>,
}

impl From<Information> for InformationDTO {
    fn from(information: Information) -> Self {
        Self {
            bio: information.bio,
            location: information.location,
            website: information.website,
        }
    }
}

impl From<InformationDTO> for Information {
    fn from(dto: InformationDTO) -> Self {
        Self {
            bio: dto.bio,
            location: dto.location,
            website: dto.website,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ExperienceRequest {
    /// Honoured only when the whole list is replaced through a profile update.
    #[schema(example = "019c47ec-183d-744e-b11d-cd409015bf13")]
    pub id: Option<String>,
    #[schema(example = "Engineer")]
    pub title: Option<String>,
    #[schema(example = "Acme")]
    pub company: Option<String>,
    #[schema(example = "2020-2021")]
    pub dates: Option<String>,
    #[schema(example = "Built the billing service")]
    pub description: Option<String>,
}

impl From<ExperienceRequest> for ExperienceInputDTO {
    fn from(request: ExperienceRequest) -> Self {
        Self {
            id: request.id,
            title: request.title,
            company: request.company,
            dates: request.dates,
            description: request.description,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "name": "Ana",
    "email": "ana@example.com",
    "skills": ["rust", "sql"],
    "information": { "location": "Berlin" }
}))]
pub struct CreateProfileRequest {
    #[validate(length(min = 1, message = "Field `name` is required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Field `email` is required"))]
    pub email: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub information: Information,
    #[serde(default)]
    pub experience: Vec<ExperienceRequest>,
}

/// Partial update. Each present field replaces the stored value; `id` and `is_deleted` are not updatable.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({ "name": "Ana Maria", "skills": ["rust"] }))]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "Field `name` must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Field `email` must not be empty"))]
    pub email: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<Vec<ExperienceRequest>>,
    pub information: Option<Information>,
    pub friends: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({ "skill": "rust" }))]
pub struct AddSkillRequest {
    #[validate(length(min = 1, message = "Field `skill` is required"))]
    pub skill: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({ "friend_id": "019c47ec-183d-744e-b11d-cd409015bf13" }))]
pub struct AddFriendRequest {
    #[serde(alias = "friendId")]
    #[validate(length(min = 1, message = "Field `friend_id` is required"))]
    pub friend_id: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListProfilesQuery {
    /// Comma-separated skills; a profile matches when it has any of them.
    #[param(example = "rust,go")]
    pub skills: Option<String>,
    /// Case-insensitive substring of the profile location.
    #[param(example = "berl")]
    pub location: Option<String>,
}

impl ListProfilesQuery {
    pub fn skill_list(&self) -> Option<Vec<String>> {
        self.skills
            .as_deref()
            .map(|skills| skills.split(',').map(str::to_string).collect())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExperienceResponse {
    #[schema(example = "019c47ec-183d-744e-b11d-cd409015bf13")]
    pub id: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub dates: Option<String>,
    pub description: Option<String>,
}

impl From<ExperienceDTO> for ExperienceResponse {
    fn from(dto: ExperienceDTO) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            company: dto.company,
            dates: dto.dates,
            description: dto.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FriendSummaryResponse {
    #[schema(example = "019c47ec-183d-744e-b11d-cd409015bf14")]
    pub id: String,
    #[schema(example = "Bob")]
    pub name: String,
    #[schema(example = "bob@example.com")]
    pub email: String,
}

impl From<FriendSummaryDTO> for FriendSummaryResponse {
    fn from(dto: FriendSummaryDTO) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            email: dto.email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "id": "019c47ec-183d-744e-b11d-cd409015bf13",
    "name": "Ana",
    "email": "ana@example.com",
    "skills": ["rust"],
    "experience": [],
    "information": { "location": "Berlin" },
    "friends": ["019c47ec-183d-744e-b11d-cd409015bf14"],
    "created_at": "2026-01-01T00:00:00Z",
    "updated_at": "2026-01-01T00:00:00Z"
}))]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceResponse>,
    pub information: Information,
    pub friends: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileDTO> for ProfileResponse {
    fn from(dto: ProfileDTO) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            email: dto.email,
            skills: dto.skills,
            experience: dto.experience.into_iter().map(ExperienceResponse::from).collect(),
            information: dto.information.into(),
            friends: dto.friends,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

/// Profile with `friends` resolved to live summaries.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileDetailsResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceResponse>,
    pub information: Information,
    pub friends: Vec<FriendSummaryResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileDetailsDTO> for ProfileDetailsResponse {
    fn from(dto: ProfileDetailsDTO) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            email: dto.email,
            skills: dto.skills,
            experience: dto.experience.into_iter().map(ExperienceResponse::from).collect(),
            information: dto.information.into(),
            friends: dto.friends.into_iter().map(FriendSummaryResponse::from).collect(),
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;
    use validator::Validate;

    use crate::adapter::http::schema::profile::{
        AddFriendRequest, CreateProfileRequest, Information, ListProfilesQuery, UpdateProfileRequest,
    };

    #[rstest]
    fn test_update_request_drops_protected_fields() {
        let request: UpdateProfileRequest = serde_json::from_value(json!({
            "name": "Ana",
            "is_deleted": true,
            "isDeleted": true,
            "id": "019c47ec-183d-744e-b11d-cd409015bf13"
        }))
        .unwrap();

        assert_eq!(request.name.as_deref(), Some("Ana"));
        assert!(request.email.is_none());
        assert!(request.validate().is_ok());
    }

    #[rstest]
    fn test_information_rejects_unknown_keys() {
        let result = serde_json::from_value::<Information>(json!({ "location": "Berlin", "age": 30 }));

        assert!(result.is_err());
    }

    #[rstest]
    fn test_create_request_defaults() {
        let request: CreateProfileRequest =
            serde_json::from_value(json!({ "name": "Ana", "email": "ana@x.com" })).unwrap();

        assert!(request.skills.is_empty());
        assert!(request.experience.is_empty());
        assert!(request.information.location.is_none());
    }

    #[rstest]
    #[case(json!({ "name": "", "email": "ana@x.com" }))]
    #[case(json!({ "name": "Ana", "email": "" }))]
    fn test_create_request_rejects_empty_fields(#[case] body: serde_json::Value) {
        let request: CreateProfileRequest = serde_json::from_value(body).unwrap();

        assert!(request.validate().is_err());
    }

    #[rstest]
    #[case(json!({ "friend_id": "abc" }))]
    #[case(json!({ "friendId": "abc" }))]
    fn test_add_friend_request_accepts_both_spellings(#[case] body: serde_json::Value) {
        let request: AddFriendRequest = serde_json::from_value(body).unwrap();

        assert_eq!(request.friend_id, "abc");
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("rust"), Some(vec!["rust"]))]
    #[case(Some("rust, go"), Some(vec!["rust", " go"]))]
    fn test_skill_list_splits_on_commas(#[case] raw: Option<&str>, #[case] expected: Option<Vec<&str>>) {
        let query = ListProfilesQuery {
            skills: raw.map(str::to_string),
            location: None,
        };

        let expected = expected.map(|skills| skills.into_iter().map(str::to_string).collect::<Vec<_>>());
        assert_eq!(query.skill_list(), expected);
    }
}
