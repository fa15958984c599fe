//! 应用组装：服务初始化与路由合并

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::auth::{AuthService, AuthState, JwtManager, create_auth_router};
use crate::model::config::Config;
use crate::questions::{QuestionService, create_questions_router};

/// 根据配置初始化全部服务并返回完整路由
pub fn build_app(config: &Config) -> anyhow::Result<Router> {
    let secret_seed = config
        .jwt_secret
        .as_deref()
        .unwrap_or(&config.admin_password);
    let jwt = Arc::new(JwtManager::new(secret_seed, config.token_expiry_secs));

    let auth = AuthService::new(&config.admin_username, &config.admin_password, jwt.clone())?;
    let questions = Arc::new(QuestionService::open(&config.database_path)?);

    Ok(create_router(AuthState::new(auth), questions, jwt))
}

/// 合并认证路由与题目路由
///
/// - `/auth/login`
/// - `/questions/...`
pub fn create_router(
    auth: AuthState,
    questions: Arc<QuestionService>,
    jwt: Arc<JwtManager>,
) -> Router {
    Router::new()
        .nest("/auth", create_auth_router(auth))
        .merge(create_questions_router(questions, jwt))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn test_app() -> Router {
        let jwt = Arc::new(JwtManager::new("test-secret", Some(3600)));
        let auth = AuthService::with_cost("admin", "motdepasse", jwt.clone(), 4).unwrap();
        let questions = Arc::new(QuestionService::open(":memory:").unwrap());
        create_router(AuthState::new(auth), questions, jwt)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.expect("request");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn login(app: &Router) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/auth/login",
            None,
            Some(json!({"username": "admin", "password": "motdepasse"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().unwrap().to_string()
    }

    async fn create_question(app: &Router, token: &str, intitule: &str) -> Value {
        let (status, body) = send(
            app,
            "POST",
            "/questions",
            Some(token),
            Some(json!({
                "intitule": intitule,
                "isVraie": true,
                "explication": "Parce que."
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[tokio::test]
    async fn test_login_success_and_failure() {
        let app = test_app();
        let token = login(&app).await;
        assert!(!token.is_empty());

        let (status, body) = send(
            &app,
            "POST",
            "/auth/login",
            None,
            Some(json!({"username": "admin", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["type"], "invalid_credentials");

        let (status, _) = send(
            &app,
            "POST",
            "/auth/login",
            None,
            Some(json!({"username": "root", "password": "motdepasse"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_mutations_require_token() {
        let app = test_app();
        let payload = json!({"intitule": "q", "explication": "e"});

        let (status, body) = send(&app, "POST", "/questions", None, Some(payload.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["type"], "authentication_error");

        let (status, _) = send(
            &app,
            "POST",
            "/questions",
            Some("not.a.token"),
            Some(payload.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, "PUT", "/questions/1", None, Some(payload)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, "DELETE", "/questions/1", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(&app, "GET", "/questions", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let app = test_app();
        let token = login(&app).await;

        let created = create_question(&app, &token, "La Terre est ronde").await;
        assert_eq!(created["intitule"], "La Terre est ronde");
        assert_eq!(created["isVraie"], true);
        assert_eq!(created["nbVoteVrai"], 0);
        assert_eq!(created["nbVoteFaux"], 0);
        assert!(created["createdAt"].is_string());

        let id = created["id"].as_i64().unwrap();
        let (status, fetched) = send(&app, "GET", &format!("/questions/{}", id), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_missing_question_reads_as_null() {
        let app = test_app();
        let (status, body) = send(&app, "GET", "/questions/42", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_votes() {
        let app = test_app();
        let token = login(&app).await;
        let id = create_question(&app, &token, "q").await["id"].as_i64().unwrap();

        let (status, body) = send(
            &app,
            "POST",
            &format!("/questions/vote-vrai/{}", id),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let (status, _) = send(
            &app,
            "POST",
            &format!("/questions/vote-faux/{}", id),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        send(&app, "POST", &format!("/questions/vote-faux/{}", id), None, None).await;

        let (_, fetched) = send(&app, "GET", &format!("/questions/{}", id), None, None).await;
        assert_eq!(fetched["nbVoteVrai"], 1);
        assert_eq!(fetched["nbVoteFaux"], 2);

        let (status, body) = send(&app, "POST", "/questions/vote-vrai/999", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["type"], "not_found");
        assert_eq!(body["error"]["message"], "Question with ID 999 not found.");
    }

    #[tokio::test]
    async fn test_pagination_and_full_listing() {
        let app = test_app();
        let token = login(&app).await;
        for n in 0..23 {
            create_question(&app, &token, &format!("q{}", n)).await;
        }

        let (_, all) = send(&app, "GET", "/questions", None, None).await;
        assert_eq!(all.as_array().unwrap().len(), 23);

        let (_, page1) = send(&app, "GET", "/questions?page=1", None, None).await;
        let (_, page2) = send(&app, "GET", "/questions?page=2", None, None).await;
        assert_eq!(page1.as_array().unwrap().len(), 20);
        assert_eq!(page2.as_array().unwrap().len(), 3);
        assert_eq!(page2[0]["intitule"], "q20");

        let (status, body) = send(&app, "GET", "/questions?page=0", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_request");

        let (status, _) = send(&app, "GET", "/questions?page=abc", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let app = test_app();
        let token = login(&app).await;
        let id = create_question(&app, &token, "avant").await["id"].as_i64().unwrap();

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/questions/{}", id),
            Some(&token),
            Some(json!({"intitule": "après", "isVraie": false})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["intitule"], "après");
        assert_eq!(updated["isVraie"], false);
        assert_eq!(updated["explication"], "Parce que.");

        let (status, body) = send(
            &app,
            "DELETE",
            &format!("/questions/{}", id),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let (_, fetched) = send(&app, "GET", &format!("/questions/{}", id), None, None).await;
        assert_eq!(fetched, Value::Null);

        let (status, _) = send(
            &app,
            "POST",
            &format!("/questions/vote-faux/{}", id),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_rejected_input_uses_error_envelope() {
        let app = test_app();
        let token = login(&app).await;

        let (status, body) = send(&app, "POST", "/questions/vote-vrai/abc", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_request");

        let (status, body) = send(&app, "GET", "/questions/abc", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_request");

        let (status, body) = send(&app, "GET", "/questions?page=", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_request");

        let (status, body) = send(
            &app,
            "POST",
            "/questions",
            Some(&token),
            Some(json!({"intitule": "sans explication"})),
        )
        .await;
        assert!(status.is_client_error());
        assert_eq!(body["error"]["type"], "invalid_request");

        let request = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.expect("request");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["type"], "invalid_request");
    }

    #[tokio::test]
    async fn test_edge_cases_of_question_routes() {
        let app = test_app();
        let token = login(&app).await;

        let (status, created) = send(
            &app,
            "POST",
            "/questions",
            Some(&token),
            Some(json!({
                "intitule": "q",
                "explication": "e",
                "nbVoteVrai": 99,
                "nbVoteFaux": 7
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["nbVoteVrai"], 0);
        assert_eq!(created["nbVoteFaux"], 0);
        assert_eq!(created["isVraie"], false);
        let id = created["id"].as_i64().unwrap();

        let (status, unchanged) = send(
            &app,
            "PUT",
            &format!("/questions/{}", id),
            Some(&token),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(unchanged["intitule"], "q");
        assert_eq!(unchanged["id"], id);

        let (status, page) = send(
            &app,
            "GET",
            &format!("/questions?page={}", i64::MAX),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page, json!([]));

        let (status, body) = send(&app, "DELETE", "/questions/12345", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));
    }
}
