//! Request and response bodies for the REST API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Registration request.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterReq {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

/// The authenticated (or newly registered) user's public profile.
///
/// Never carries the password hash.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct UserProfileRes {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

/// Screening request: eight numeric clinical values plus display-only
/// name and gender (they never enter the matching).
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct ScreenReq {
    pub name: String,
    pub gender: String,
    pub age: f64,
    pub memory_loss: f64,
    pub behaviour: f64,
    pub tremors: f64,
    pub coordination: f64,
    pub seizures: f64,
    pub vision: f64,
    pub copper: f64,
}

/// Screening response: the submitted values echoed back for display, plus
/// the matched disease label or `"Unknown"`.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct ScreenRes {
    pub name: String,
    pub gender: String,
    pub age: f64,
    pub memory_loss: f64,
    pub behaviour: f64,
    pub tremors: f64,
    pub coordination: f64,
    pub seizures: f64,
    pub vision: f64,
    pub copper: f64,
    pub prediction: String,
}

/// Dashboard chart data: disease labels and their row counts, aligned by
/// index, ordered by descending count.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct DashboardRes {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

/// Chat request.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct ChatReq {
    pub message: String,
}

/// Chat reply.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct ChatRes {
    pub reply: String,
}

/// One disease catalog entry.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct DiseaseRes {
    pub slug: String,
    pub name: String,
    pub overview: String,
    pub prevention: String,
}

/// The full disease catalog.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct DiseasesRes {
    pub diseases: Vec<DiseaseRes>,
}
