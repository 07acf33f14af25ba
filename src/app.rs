use crate::{
    modules::{self, hub},
    types::Context,
    utils::storage::{CV_FOLDER, PHOTO_FOLDER},
};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors, services::ServeDir, trace};

pub struct App {
    ctx: Arc<Context>,
    router: Router,
}

pub fn router(ctx: Arc<Context>) -> Router {
    let uploads_dir = ctx.storage.uploads_dir.clone();

    Router::new()
        .nest("/api", modules::get_router())
        .merge(hub::routes::get_router())
        .with_state(ctx.clone())
        .nest_service(
            &format!("/{}", CV_FOLDER),
            ServeDir::new(uploads_dir.join(CV_FOLDER)),
        )
        .nest_service(
            &format!("/{}", PHOTO_FOLDER),
            ServeDir::new(uploads_dir.join(PHOTO_FOLDER)),
        )
        .layer(Extension(ctx))
        .layer(DefaultBodyLimit::max(1024 * 1024 * 10))
        .layer(trace::TraceLayer::new_for_http())
        .layer(
            cors::CorsLayer::new()
                .allow_methods([
                    Method::OPTIONS,
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                .allow_origin(cors::Any),
        )
}

impl App {
    pub fn new(ctx: Arc<Context>) -> Self {
        Self {
            router: router(ctx.clone()),
            ctx,
        }
    }

    pub async fn serve(self) -> std::io::Result<()> {
        let address = format!("{}:{}", self.ctx.app.host, self.ctx.app.port);
        let listener = TcpListener::bind(&address).await?;

        tracing::info!("App is running on {}", address);

        axum::serve(listener, self.router).await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::modules::{
        auth::service::jwt::{self, TokenRole},
        user::repository::{self as user_repository, test::insert, Role, Status},
    };
    use crate::types::test::{context, context_with_pool};
    use axum::{body::Body, http::Request, http::StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        for (method, uri) in [
            (Method::GET, "/api/wallet"),
            (Method::GET, "/api/auth/me"),
            (Method::GET, "/api/admin/overview"),
            (Method::GET, "/api/orders/my"),
            (Method::GET, "/api/provider/me"),
        ] {
            let response = router(context())
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        }
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        let response = router(context())
            .oneshot(
                Request::builder()
                    .uri("/api/kitchens")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn answers_cors_preflight_from_any_origin() {
        let response = router(context())
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/auth/login")
                    .header(header::ORIGIN, "http://localhost:8081")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some("*")
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn role_guarded_routes_forbid_other_roles(pool: sqlx::PgPool) {
        let ctx = context_with_pool(pool.clone());
        let client = insert(&pool, "client@example.com", Role::Client, Status::Active).await;
        let provider = insert(&pool, "pro@example.com", Role::Provider, Status::Active).await;
        let client_token = jwt::issue(&ctx.jwt, &client, TokenRole::Client).unwrap();
        let provider_token = jwt::issue(&ctx.jwt, &provider, TokenRole::Provider).unwrap();

        for (token, uri) in [
            (&client_token, "/api/admin/overview"),
            (&client_token, "/api/admin/users"),
            (&client_token, "/api/wallet"),
            (&provider_token, "/api/admin/overview"),
        ] {
            let response = router(ctx.clone())
                .oneshot(
                    Request::builder()
                        .uri(uri)
                        .header(header::AUTHORIZATION, format!("Bearer {}", token))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::FORBIDDEN, "{}", uri);
            assert_eq!(json_body(response).await, json!({ "error": "Forbidden" }));
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn firebase_accounts_cannot_log_in_with_a_password(pool: sqlx::PgPool) {
        let ctx = context_with_pool(pool.clone());
        user_repository::create(
            &pool,
            user_repository::CreateUserPayload {
                email: "google@example.com".to_string(),
                full_name: "Google User".to_string(),
                role: Role::Client,
                status: Status::Active,
                password_hash: user_repository::FIREBASE_PASSWORD_SENTINEL.to_string(),
                email_confirmed: true,
                firebase_uid: Some("firebase-uid-1".to_string()),
            },
        )
        .await
        .unwrap();

        for password in ["FIREBASE", "anything"] {
            let response = router(ctx.clone())
                .oneshot(
                    Request::builder()
                        .method(Method::POST)
                        .uri("/api/auth/login")
                        .header(header::CONTENT_TYPE, "application/json")
                        .body(Body::from(
                            json!({ "email": "google@example.com", "password": password })
                                .to_string(),
                        ))
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(
                json_body(response).await,
                json!({ "error": "UseFirebaseLogin" })
            );
        }
    }
}
