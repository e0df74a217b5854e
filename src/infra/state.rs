use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use sqlx::PgPool;

use crate::adapter::db::gateway::profile::ProfileGateway;
use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::{AppError, AppResult};
use crate::application::interactors::experience::{AddExperienceInteractor, DeleteExperienceInteractor};
use crate::application::interactors::friend::{AddFriendInteractor, DeleteFriendInteractor, GetFriendsInteractor};
use crate::application::interactors::profile::{
    CreateProfileInteractor, DeleteProfileInteractor, GetProfileInteractor, ListProfilesInteractor,
    UpdateInformationInteractor, UpdateProfileInteractor,
};
use crate::application::interactors::skill::{AddSkillInteractor, DeleteSkillInteractor};
use crate::infra::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
}

#[async_trait]
pub trait FromAppState: Sized {
    async fn from_app_state(state: &AppState) -> AppResult<Self>;
}

/// Every interactor is built per request on a fresh lazy session.
macro_rules! from_request_parts {
    ($($interactor:ty),+ $(,)?) => {
        $(
            impl<S> FromRequestParts<S> for $interactor
            where
                S: Send + Sync,
                AppState: FromRef<S>,
            {
                type Rejection = AppError;

                async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
                    let app_state = AppState::from_ref(state);
                    <$interactor>::from_app_state(&app_state).await
                }
            }
        )+
    };
}

fn profile_gateway(state: &AppState) -> (SqlxSession, Arc<ProfileGateway>) {
    let session = SqlxSession::new_lazy(state.pool.clone());
    let gateway = Arc::new(ProfileGateway::new(session.clone()));
    (session, gateway)
}

// ListProfilesInteractor
#[async_trait]
impl FromAppState for ListProfilesInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let (_, profile_gateway) = profile_gateway(state);
        Ok(ListProfilesInteractor::new(profile_gateway))
    }
}

// GetProfileInteractor
#[async_trait]
impl FromAppState for GetProfileInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let (_, profile_gateway) = profile_gateway(state);
        Ok(GetProfileInteractor::new(profile_gateway))
    }
}

// CreateProfileInteractor
#[async_trait]
impl FromAppState for CreateProfileInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let (session, profile_gateway) = profile_gateway(state);
        Ok(CreateProfileInteractor::new(
            Arc::new(session),
            profile_gateway.clone(),
            profile_gateway,
        ))
    }
}

// UpdateProfileInteractor
#[async_trait]
impl FromAppState for UpdateProfileInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let (session, profile_gateway) = profile_gateway(state);
        Ok(UpdateProfileInteractor::new(
            Arc::new(session),
            profile_gateway.clone(),
            profile_gateway,
        ))
    }
}

// DeleteProfileInteractor
#[async_trait]
impl FromAppState for DeleteProfileInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let (session, profile_gateway) = profile_gateway(state);
        Ok(DeleteProfileInteractor::new(Arc::new(session), profile_gateway))
    }
}

// UpdateInformationInteractor
#[async_trait]
impl FromAppState for UpdateInformationInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let (session, profile_gateway) = profile_gateway(state);
        Ok(UpdateInformationInteractor::new(Arc::new(session), profile_gateway))
    }
}

// AddExperienceInteractor
#[async_trait]
impl FromAppState for AddExperienceInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let (session, profile_gateway) = profile_gateway(state);
        Ok(AddExperienceInteractor::new(Arc::new(session), profile_gateway))
    }
}

// DeleteExperienceInteractor
#[async_trait]
impl FromAppState for DeleteExperienceInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let (session, profile_gateway) = profile_gateway(state);
        Ok(DeleteExperienceInteractor::new(Arc::new(session), profile_gateway))
    }
}

// AddSkillInteractor
#[async_trait]
impl FromAppState for AddSkillInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let (session, profile_gateway) = profile_gateway(state);
        Ok(AddSkillInteractor::new(Arc::new(session), profile_gateway))
    }
}

// DeleteSkillInteractor
#[async_trait]
impl FromAppState for DeleteSkillInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let (session, profile_gateway) = profile_gateway(state);
        Ok(DeleteSkillInteractor::new(Arc::new(session), profile_gateway))
    }
}

// AddFriendInteractor
#[async_trait]
impl FromAppState for AddFriendInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let (session, profile_gateway) = profile_gateway(state);
        Ok(AddFriendInteractor::new(
            Arc::new(session),
            profile_gateway.clone(),
            profile_gateway,
        ))
    }
}

// DeleteFriendInteractor
#[async_trait]
impl FromAppState for DeleteFriendInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let (session, profile_gateway) = profile_gateway(state);
        Ok(DeleteFriendInteractor::new(Arc::new(session), profile_gateway))
    }
}

// GetFriendsInteractor
#[async_trait]
impl FromAppState for GetFriendsInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let (_, profile_gateway) = profile_gateway(state);
        Ok(GetFriendsInteractor::new(profile_gateway))
    }
}

from_request_parts!(
    ListProfilesInteractor,
    GetProfileInteractor,
    CreateProfileInteractor,
    UpdateProfileInteractor,
    DeleteProfileInteractor,
    UpdateInformationInteractor,
    AddExperienceInteractor,
    DeleteExperienceInteractor,
    AddSkillInteractor,
    DeleteSkillInteractor,
    AddFriendInteractor,
    DeleteFriendInteractor,
    GetFriendsInteractor,
);
