use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::schema::message::MessageResponse;
use crate::adapter::http::schema::profile::{
    AddFriendRequest, AddSkillRequest, CreateProfileRequest, ExperienceRequest, FriendSummaryResponse, Information,
    ListProfilesQuery, ProfileDetailsResponse, ProfileResponse, UpdateProfileRequest,
};
use crate::adapter::http::validation::ValidJson;
use crate::application::app_error::AppResult;
use crate::application::dto::id::IdDTO;
use crate::application::dto::profile::{
    AddExperienceDTO, CreateProfileDTO, DeleteExperienceDTO, FriendDTO, ListProfilesDTO, SkillDTO,
    UpdateInformationDTO, UpdateProfileDTO,
};
use crate::application::interactors::experience::{AddExperienceInteractor, DeleteExperienceInteractor};
use crate::application::interactors::friend::{AddFriendInteractor, DeleteFriendInteractor, GetFriendsInteractor};
use crate::application::interactors::profile::{
    CreateProfileInteractor, DeleteProfileInteractor, GetProfileInteractor, ListProfilesInteractor,
    UpdateInformationInteractor, UpdateProfileInteractor,
};
use crate::application::interactors::skill::{AddSkillInteractor, DeleteSkillInteractor};

#[utoipa::path(
    get,
    path = "/api/profiles",
    tag = "Profiles",
    params(ListProfilesQuery),
    responses(
        (status = 200, description = "Live profiles matching the filters", body = [ProfileResponse]),
        (
            status = 500,
            description = "Internal server error",
            body = ErrorResponse,
            example = json!({ "error": "Internal Server Error" })
        )
    )
)]
pub async fn list_profiles(
    interactor: ListProfilesInteractor,
    Query(query): Query<ListProfilesQuery>,
) -> AppResult<impl IntoResponse> {
    let dto = ListProfilesDTO {
        skills: query.skill_list(),
        location: query.location,
    };
    let profiles = interactor.execute(dto).await?;
    let response: Vec<ProfileResponse> = profiles.into_iter().map(ProfileResponse::from).collect();
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/profiles/{id}",
    tag = "Profiles",
    params(("id" = String, Path, description = "Profile id")),
    responses(
        (status = 200, description = "Profile with resolved friends", body = ProfileDetailsResponse),
        (
            status = 400,
            description = "Malformed id",
            body = ErrorResponse,
            example = json!({ "error": "Invalid UUID: invalid character" })
        ),
        (
            status = 404,
            description = "Profile not found",
            body = ErrorResponse,
            example = json!({ "error": "Profile not found" })
        )
    )
)]
pub async fn get_profile(interactor: GetProfileInteractor, Path(id): Path<String>) -> AppResult<impl IntoResponse> {
    let profile = interactor.execute(IdDTO { id }).await?;
    Ok((StatusCode::OK, Json(ProfileDetailsResponse::from(profile))))
}

#[utoipa::path(
    post,
    path = "/api/profiles",
    tag = "Profiles",
    request_body = CreateProfileRequest,
    responses(
        (status = 201, description = "Profile created", body = ProfileResponse),
        (
            status = 400,
            description = "Missing name or email, or malformed body",
            body = ErrorResponse,
            example = json!({ "error": "Field `email` is required" })
        ),
        (
            status = 409,
            description = "Email already used",
            body = ErrorResponse,
            example = json!({ "error": "Email already exists" })
        )
    )
)]
pub async fn create_profile(
    interactor: CreateProfileInteractor,
    ValidJson(payload): ValidJson<CreateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = CreateProfileDTO {
        name: payload.name,
        email: payload.email,
        skills: payload.skills,
        information: payload.information.into(),
        experience: payload.experience.into_iter().map(Into::into).collect(),
    };
    let profile = interactor.execute(dto).await?;
    Ok((StatusCode::CREATED, Json(ProfileResponse::from(profile))))
}

#[utoipa::path(
    put,
    path = "/api/profiles/{id}",
    tag = "Profiles",
    params(("id" = String, Path, description = "Profile id")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Malformed id or body", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 409, description = "Email already used", body = ErrorResponse)
    )
)]
pub async fn update_profile(
    interactor: UpdateProfileInteractor,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<UpdateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = UpdateProfileDTO {
        id,
        name: payload.name,
        email: payload.email,
        skills: payload.skills,
        experience: payload
            .experience
            .map(|entries| entries.into_iter().map(Into::into).collect()),
        information: payload.information.map(Into::into),
        friends: payload.friends,
    };
    let profile = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}

#[utoipa::path(
    delete,
    path = "/api/profiles/{id}",
    tag = "Profiles",
    params(("id" = String, Path, description = "Profile id")),
    responses(
        (
            status = 200,
            description = "Profile flagged as deleted",
            body = MessageResponse,
            example = json!({ "message": "Profile deleted successfully" })
        ),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    )
)]
pub async fn delete_profile(
    interactor: DeleteProfileInteractor,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    interactor.execute(IdDTO { id }).await?;
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Profile deleted successfully".to_string(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/profiles/{id}/experience",
    tag = "Experience",
    params(("id" = String, Path, description = "Profile id")),
    request_body = ExperienceRequest,
    responses(
        (status = 200, description = "Profile with the appended entry", body = ProfileResponse),
        (status = 400, description = "Malformed id or body", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    )
)]
pub async fn add_experience(
    interactor: AddExperienceInteractor,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<ExperienceRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = AddExperienceDTO {
        profile_id: id,
        experience: payload.into(),
    };
    let profile = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}

#[utoipa::path(
    delete,
    path = "/api/profiles/{id}/experience/{experience_id}",
    tag = "Experience",
    params(
        ("id" = String, Path, description = "Profile id"),
        ("experience_id" = String, Path, description = "Experience entry id")
    ),
    responses(
        (status = 200, description = "Profile without the entry", body = ProfileResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    )
)]
pub async fn delete_experience(
    interactor: DeleteExperienceInteractor,
    Path((id, experience_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let dto = DeleteExperienceDTO {
        profile_id: id,
        experience_id,
    };
    let profile = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}

#[utoipa::path(
    post,
    path = "/api/profiles/{id}/skills",
    tag = "Skills",
    params(("id" = String, Path, description = "Profile id")),
    request_body = AddSkillRequest,
    responses(
        (status = 200, description = "Profile with the skill", body = ProfileResponse),
        (
            status = 400,
            description = "Malformed id or missing skill",
            body = ErrorResponse,
            example = json!({ "error": "Field `skill` is required" })
        ),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    )
)]
pub async fn add_skill(
    interactor: AddSkillInteractor,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<AddSkillRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = SkillDTO {
        profile_id: id,
        skill: payload.skill,
    };
    let profile = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}

#[utoipa::path(
    delete,
    path = "/api/profiles/{id}/skills/{skill}",
    tag = "Skills",
    params(
        ("id" = String, Path, description = "Profile id"),
        ("skill" = String, Path, description = "Skill to remove")
    ),
    responses(
        (status = 200, description = "Profile without the skill", body = ProfileResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    )
)]
pub async fn delete_skill(
    interactor: DeleteSkillInteractor,
    Path((id, skill)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let dto = SkillDTO { profile_id: id, skill };
    let profile = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}

#[utoipa::path(
    put,
    path = "/api/profiles/{id}/information",
    tag = "Profiles",
    params(("id" = String, Path, description = "Profile id")),
    request_body = Information,
    responses(
        (status = 200, description = "Profile with replaced information", body = ProfileResponse),
        (
            status = 400,
            description = "Malformed id or unknown information key",
            body = ErrorResponse
        ),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    )
)]
pub async fn update_information(
    interactor: UpdateInformationInteractor,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<Information>,
) -> AppResult<impl IntoResponse> {
    let dto = UpdateInformationDTO {
        profile_id: id,
        information: payload.into(),
    };
    let profile = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}

#[utoipa::path(
    post,
    path = "/api/profiles/{id}/friends",
    tag = "Friends",
    params(("id" = String, Path, description = "Profile id")),
    request_body = AddFriendRequest,
    responses(
        (status = 200, description = "Profile with the new friend reference", body = ProfileResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Profile or friend not found", body = ErrorResponse)
    )
)]
pub async fn add_friend(
    interactor: AddFriendInteractor,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<AddFriendRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = FriendDTO {
        profile_id: id,
        friend_id: payload.friend_id,
    };
    let profile = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}

#[utoipa::path(
    delete,
    path = "/api/profiles/{id}/friends/{friend_id}",
    tag = "Friends",
    params(
        ("id" = String, Path, description = "Profile id"),
        ("friend_id" = String, Path, description = "Friend profile id")
    ),
    responses(
        (status = 200, description = "Profile without the friend reference", body = ProfileResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    )
)]
pub async fn delete_friend(
    interactor: DeleteFriendInteractor,
    Path((id, friend_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let dto = FriendDTO {
        profile_id: id,
        friend_id,
    };
    let profile = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}

#[utoipa::path(
    get,
    path = "/api/profiles/{id}/friends",
    tag = "Friends",
    params(("id" = String, Path, description = "Profile id")),
    responses(
        (status = 200, description = "Live friends of the profile", body = [FriendSummaryResponse]),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    )
)]
pub async fn get_friends(interactor: GetFriendsInteractor, Path(id): Path<String>) -> AppResult<impl IntoResponse> {
    let friends = interactor.execute(IdDTO { id }).await?;
    let response: Vec<FriendSummaryResponse> = friends.into_iter().map(FriendSummaryResponse::from).collect();
    Ok((StatusCode::OK, Json(response)))
}
