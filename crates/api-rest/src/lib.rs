//! # API REST
//!
//! REST surface for the neuromatch screening service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status mapping)
//!
//! Uses `api-shared` for the wire types and `neuromatch-core` /
//! `neuromatch-chat` for the actual work. Every handler is a thin mapping
//! from a service result to a status code; failures are logged here and the
//! client only ever sees a generic message.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    ChatReq, ChatRes, DashboardRes, DiseaseRes, DiseasesRes, HealthRes, HealthService, LoginReq,
    RegisterReq, ScreenReq, ScreenRes, UserProfileRes,
};
use neuromatch_chat::{ChatBackend, ChatError};
use neuromatch_core::{catalog, classify, AuthError, QueryVector, ReferenceTable, UserStore};

/// Application state shared across REST API handlers.
///
/// The reference table is loaded once at startup and published here frozen;
/// handlers only ever read it.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<ReferenceTable>,
    pub users: Arc<UserStore>,
    pub chat: Arc<dyn ChatBackend>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        register,
        login,
        screen,
        dashboard,
        chat,
        list_diseases,
        get_disease
    ),
    components(schemas(
        HealthRes,
        RegisterReq,
        LoginReq,
        UserProfileRes,
        ScreenReq,
        ScreenRes,
        DashboardRes,
        ChatReq,
        ChatRes,
        DiseaseRes,
        DiseasesRes
    ))
)]
struct ApiDoc;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/screen", post(screen))
        .route("/dashboard", get(dashboard))
        .route("/chat", post(chat))
        .route("/diseases", get(list_diseases))
        .route("/diseases/:slug", get(get_disease))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve the REST API until the process exits.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterReq,
    responses(
        (status = 200, description = "User registered", body = UserProfileRes),
        (status = 400, description = "Missing fields"),
        (status = 409, description = "Account already exists"),
        (status = 500, description = "Internal server error")
    )
)]
/// Register a new user.
///
/// # Errors
/// Returns `400 Bad Request` when a field is blank, `409 Conflict` when the
/// username or email is already registered.
#[axum::debug_handler]
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterReq>,
) -> Result<Json<UserProfileRes>, (StatusCode, &'static str)> {
    match state.users.register(&req.username, &req.email, &req.password) {
        Ok(user) => Ok(Json(profile(user))),
        Err(AuthError::MissingField) => {
            Err((StatusCode::BAD_REQUEST, "Please fill out all fields"))
        }
        Err(AuthError::AccountExists) => Err((StatusCode::CONFLICT, "Account already exists")),
        Err(e) => {
            tracing::error!("Register error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Authenticated", body = UserProfileRes),
        (status = 401, description = "Incorrect email or password"),
        (status = 500, description = "Internal server error")
    )
)]
/// Authenticate a user by email and password.
///
/// # Errors
/// Returns `401 Unauthorized` for an unknown email or a wrong password; the
/// two cases are indistinguishable to the client.
#[axum::debug_handler]
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginReq>,
) -> Result<Json<UserProfileRes>, (StatusCode, &'static str)> {
    match state.users.authenticate(&req.email, &req.password) {
        Ok(user) => Ok(Json(profile(user))),
        Err(AuthError::InvalidCredentials) => {
            Err((StatusCode::UNAUTHORIZED, "Incorrect email/password"))
        }
        Err(e) => {
            tracing::error!("Login error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    post,
    path = "/screen",
    request_body = ScreenReq,
    responses(
        (status = 200, description = "Screening result", body = ScreenRes),
        (status = 422, description = "Query does not match the reference table")
    )
)]
/// Run the nearest-match screening for one set of clinical values.
///
/// Name and gender are echoed back for display and never enter the distance
/// computation.
#[axum::debug_handler]
async fn screen(
    State(state): State<AppState>,
    Json(req): Json<ScreenReq>,
) -> Result<Json<ScreenRes>, (StatusCode, &'static str)> {
    let query = QueryVector {
        age: req.age,
        memory_loss: req.memory_loss,
        behaviour: req.behaviour,
        tremors: req.tremors,
        coordination: req.coordination,
        seizures: req.seizures,
        vision: req.vision,
        copper: req.copper,
    };

    match classify(&query.as_features(), &state.table) {
        Ok(result) => Ok(Json(ScreenRes {
            name: req.name,
            gender: req.gender,
            age: req.age,
            memory_loss: req.memory_loss,
            behaviour: req.behaviour,
            tremors: req.tremors,
            coordination: req.coordination,
            seizures: req.seizures,
            vision: req.vision,
            copper: req.copper,
            prediction: result.to_string(),
        })),
        Err(e) => {
            tracing::warn!("Screen query rejected: {}", e);
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                "Query does not match the reference table",
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Disease distribution chart data", body = DashboardRes)
    )
)]
/// Disease distribution over the reference dataset, for the dashboard chart.
#[axum::debug_handler]
async fn dashboard(State(state): State<AppState>) -> Json<DashboardRes> {
    let distribution = state.table.label_distribution();
    Json(DashboardRes {
        labels: distribution.iter().map(|c| c.label.clone()).collect(),
        values: distribution.iter().map(|c| c.count).collect(),
    })
}

#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatReq,
    responses(
        (status = 200, description = "Chat reply", body = ChatRes),
        (status = 400, description = "No message provided"),
        (status = 502, description = "Upstream chat service failed"),
        (status = 503, description = "Chat backend not configured")
    )
)]
/// Forward one free-text message to the configured chat backend.
///
/// # Errors
/// Returns `503 Service Unavailable` when no backend is configured and
/// `502 Bad Gateway` when the upstream call fails; upstream details are
/// logged, never returned to the client.
#[axum::debug_handler]
async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatReq>,
) -> Result<Json<ChatRes>, (StatusCode, &'static str)> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "No message provided"));
    }

    match state.chat.send(message).await {
        Ok(reply) => Ok(Json(ChatRes { reply })),
        Err(ChatError::NotConfigured) => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Chat backend not configured",
        )),
        Err(e) => {
            tracing::error!("Chat upstream error: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                "An error occurred while processing your request",
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/diseases",
    responses(
        (status = 200, description = "Disease information catalog", body = DiseasesRes)
    )
)]
/// List the informational catalog of covered diseases.
#[axum::debug_handler]
async fn list_diseases(State(_state): State<AppState>) -> Json<DiseasesRes> {
    Json(DiseasesRes {
        diseases: catalog::all().iter().map(disease_res).collect(),
    })
}

#[utoipa::path(
    get,
    path = "/diseases/{slug}",
    responses(
        (status = 200, description = "Disease information", body = DiseaseRes),
        (status = 404, description = "Unknown disease")
    )
)]
/// Look up one disease catalog entry by slug.
#[axum::debug_handler]
async fn get_disease(
    State(_state): State<AppState>,
    AxumPath(slug): AxumPath<String>,
) -> Result<Json<DiseaseRes>, (StatusCode, &'static str)> {
    match catalog::find(&slug) {
        Some(entry) => Ok(Json(disease_res(entry))),
        None => Err((StatusCode::NOT_FOUND, "Unknown disease")),
    }
}

fn profile(user: neuromatch_core::UserRecord) -> UserProfileRes {
    UserProfileRes {
        id: user.id.simple().to_string(),
        username: user.username,
        email: user.email,
        created_at: user.created_at.to_rfc3339(),
    }
}

fn disease_res(entry: &catalog::DiseaseInfo) -> DiseaseRes {
    DiseaseRes {
        slug: entry.slug.to_string(),
        name: entry.name.to_string(),
        overview: entry.overview.to_string(),
        prevention: entry.prevention.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuromatch_chat::DisabledBackend;
    use neuromatch_core::{CoreConfig, ReferenceCase};
    use tempfile::TempDir;

    fn test_state(dir: &TempDir) -> AppState {
        let cfg = Arc::new(CoreConfig::new(
            dir.path().join("unused-dataset.csv"),
            dir.path().join("users"),
        ));
        let table = ReferenceTable::from_rows(vec![
            ReferenceCase::new(
                vec![70.0, 1.0, 2.0, 1.0, 0.0, 0.0, 1.0, 50.0],
                Some("Wilson Disease".into()),
            ),
            ReferenceCase::new(vec![20.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0], None),
        ]);
        AppState {
            table: Arc::new(table),
            users: Arc::new(UserStore::new(cfg)),
            chat: Arc::new(DisabledBackend),
        }
    }

    fn screen_req(age: f64, copper: f64) -> ScreenReq {
        ScreenReq {
            name: "Asha".into(),
            gender: "female".into(),
            age,
            memory_loss: 1.0,
            behaviour: 2.0,
            tremors: 1.0,
            coordination: 0.0,
            seizures: 0.0,
            vision: 1.0,
            copper,
        }
    }

    #[tokio::test]
    async fn screen_returns_the_nearest_label_and_echoes_display_fields() {
        let dir = TempDir::new().expect("tempdir");
        let state = test_state(&dir);

        let res = screen(State(state), Json(screen_req(69.0, 48.0)))
            .await
            .expect("screening should succeed");
        assert_eq!(res.0.prediction, "Wilson Disease");
        assert_eq!(res.0.name, "Asha");
        assert_eq!(res.0.gender, "female");
    }

    #[tokio::test]
    async fn screen_maps_unlabeled_match_to_unknown() {
        let dir = TempDir::new().expect("tempdir");
        let state = test_state(&dir);

        let mut req = screen_req(20.0, 10.0);
        req.memory_loss = 0.0;
        req.behaviour = 0.0;
        req.tremors = 0.0;
        req.vision = 0.0;
        let res = screen(State(state), Json(req))
            .await
            .expect("screening should succeed");
        assert_eq!(res.0.prediction, "Unknown");
    }

    #[tokio::test]
    async fn register_then_login_and_conflict_mapping() {
        let dir = TempDir::new().expect("tempdir");
        let state = test_state(&dir);

        let req = RegisterReq {
            username: "priya".into(),
            email: "priya@example.org".into(),
            password: "s3cret".into(),
        };
        register(State(state.clone()), Json(req.clone()))
            .await
            .expect("register should succeed");

        let conflict = register(State(state.clone()), Json(req))
            .await
            .expect_err("duplicate register should fail");
        assert_eq!(conflict.0, StatusCode::CONFLICT);

        let login_res = login(
            State(state.clone()),
            Json(LoginReq {
                email: "priya@example.org".into(),
                password: "s3cret".into(),
            }),
        )
        .await
        .expect("login should succeed");
        assert_eq!(login_res.0.username, "priya");

        let unauthorized = login(
            State(state),
            Json(LoginReq {
                email: "priya@example.org".into(),
                password: "wrong".into(),
            }),
        )
        .await
        .expect_err("wrong password should fail");
        assert_eq!(unauthorized.0, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn dashboard_arrays_are_index_aligned() {
        let dir = TempDir::new().expect("tempdir");
        let state = test_state(&dir);

        let res = dashboard(State(state)).await;
        assert_eq!(res.0.labels, vec!["Unknown", "Wilson Disease"]);
        assert_eq!(res.0.values, vec![1, 1]);
    }

    #[tokio::test]
    async fn chat_maps_missing_backend_and_empty_message() {
        let dir = TempDir::new().expect("tempdir");
        let state = test_state(&dir);

        let empty = chat(
            State(state.clone()),
            Json(ChatReq {
                message: "   ".into(),
            }),
        )
        .await
        .expect_err("empty message should fail");
        assert_eq!(empty.0, StatusCode::BAD_REQUEST);

        let unavailable = chat(
            State(state),
            Json(ChatReq {
                message: "hello".into(),
            }),
        )
        .await
        .expect_err("disabled backend should fail");
        assert_eq!(unavailable.0, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn disease_lookup_maps_unknown_slug_to_404() {
        let dir = TempDir::new().expect("tempdir");
        let state = test_state(&dir);

        let found = get_disease(State(state.clone()), AxumPath("wilson".into()))
            .await
            .expect("known slug should resolve");
        assert_eq!(found.0.name, "Wilson Disease");

        let missing = get_disease(State(state), AxumPath("alzheimers".into()))
            .await
            .expect_err("unknown slug should fail");
        assert_eq!(missing.0, StatusCode::NOT_FOUND);
    }
}
