use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::application::app_error::AppError;

/// JSON body that passed both decoding and its `validator` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidJson(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::extract::{FromRequest, Request};
    use rstest::rstest;
    use serde::Deserialize;
    use validator::Validate;

    use crate::adapter::http::validation::ValidJson;
    use crate::application::app_error::AppError;

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "Field `skill` is required"))]
        skill: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn test_valid_json_accepts_valid_payload() {
        let ValidJson(payload) = ValidJson::<Payload>::from_request(json_request(r#"{"skill":"rust"}"#), &())
            .await
            .unwrap();

        assert_eq!(payload.skill, "rust");
    }

    #[rstest]
    #[case(r#"{"skill":""}"#)]
    #[case(r#"{"other":"rust"}"#)]
    #[case("not json")]
    #[tokio::test]
    async fn test_valid_json_rejects_as_validation_error(#[case] body: &str) {
        let result = ValidJson::<Payload>::from_request(json_request(body), &()).await;

        assert!(matches!(result.unwrap_err(), AppError::ValidationError(_)));
    }
}
