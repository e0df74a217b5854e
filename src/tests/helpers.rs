#![cfg(test)]

use axum::body::Body;
use axum::http::Request;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub fn unique_email() -> String {
    format!("{}@test.example", Uuid::now_v7().as_simple())
}

pub async fn delete_profile(pool: &PgPool, profile_id: Uuid) {
    sqlx::query("DELETE FROM profiles WHERE id = $1")
        .bind(profile_id)
        .execute(pool)
        .await
        .expect("delete profile");
}

pub async fn is_deleted_flag(pool: &PgPool, profile_id: Uuid) -> Option<bool> {
    sqlx::query_scalar::<_, bool>("SELECT is_deleted FROM profiles WHERE id = $1")
        .bind(profile_id)
        .fetch_optional(pool)
        .await
        .expect("read is_deleted")
}

pub async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (u16, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status().as_u16();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Creates a profile through the API and returns its id.
pub async fn create_profile(app: &Router, name: &str, email: &str, body: Option<Value>) -> Uuid {
    let mut payload = body.unwrap_or_else(|| serde_json::json!({}));
    payload["name"] = Value::from(name);
    payload["email"] = Value::from(email);
    let (status, json) = call(app, "POST", "/api/profiles", Some(payload)).await;
    assert_eq!(status, 201, "create profile: {}", json);
    json["id"].as_str().and_then(|id| Uuid::parse_str(id).ok()).expect("profile id")
}

mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::unique_email;

    #[rstest]
    fn test_unique_email_back_to_back_calls_differ() {
        let emails: HashSet<String> = (0..1000).map(|_| unique_email()).collect();

        assert_eq!(emails.len(), 1000);
    }
}
