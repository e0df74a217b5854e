use axum::response::Html;
use axum::Json;
use utoipa::openapi::OpenApi as OpenApiDoc;
use utoipa::OpenApi;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::routes::profile;
use crate::adapter::http::schema::message::MessageResponse;
use crate::adapter::http::schema::profile::{
    AddFriendRequest, AddSkillRequest, CreateProfileRequest, ExperienceRequest, ExperienceResponse,
    FriendSummaryResponse, Information, ProfileDetailsResponse, ProfileResponse, UpdateProfileRequest,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Profile Store", description = "CRUD service for user profiles"),
    paths(
        profile::list_profiles,
        profile::get_profile,
        profile::create_profile,
        profile::update_profile,
        profile::delete_profile,
        profile::add_experience,
        profile::delete_experience,
        profile::add_skill,
        profile::delete_skill,
        profile::update_information,
        profile::add_friend,
        profile::delete_friend,
        profile::get_friends
    ),
    components(
        schemas(
            ErrorResponse,
            MessageResponse,
            Information,
            ExperienceRequest,
            ExperienceResponse,
            CreateProfileRequest,
            UpdateProfileRequest,
            AddSkillRequest,
            AddFriendRequest,
            ProfileResponse,
            ProfileDetailsResponse,
            FriendSummaryResponse
        )
    ),
    tags(
        (name = "Profiles", description = "Profile lifecycle"),
        (name = "Experience", description = "Work history entries"),
        (name = "Skills", description = "Skill set of a profile"),
        (name = "Friends", description = "One-directional friend references")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<OpenApiDoc> {
    Json(ApiDoc::openapi())
}

pub async fn docs_ui() -> Html<&'static str> {
    Html(
        r#"
            <!doctype html>
            <html>
              <head>
                <title>Profile Store API</title>
                <meta charset="utf-8">
                <meta name="viewport" content="width=device-width, initial-scale=1">
                <script src="https://unpkg.com/@stoplight/elements/web-components.min.js"></script>
                <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements/styles.min.css">
              </head>
              <body style="height: 100%; margin: 0;">
                <elements-api
                  apiDescriptionUrl="openapi.json"
                  basePath="/"
                  router="hash"
                />
              </body>
            </html>
        "#,
    )
}
