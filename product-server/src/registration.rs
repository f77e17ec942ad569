//! Forum user registration endpoint.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::model::{User, UserResource};
use crate::validation::validate_user;
use crate::AppState;

/// Business operation invoked with every valid registration.
pub trait RegisterUseCase: Send + Sync {
    fn register_user(&self, user: User, send_welcome_mail: bool);
}

/// Registrar that only records the registration in the log.
#[derive(Debug, Default)]
pub struct LoggingRegistrar;

impl RegisterUseCase for LoggingRegistrar {
    fn register_user(&self, user: User, send_welcome_mail: bool) {
        info!(name = %user.name, send_welcome_mail, "user registered");
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterParams {
    #[serde(rename = "sendWelcomeMail", default)]
    pub send_welcome_mail: bool,
}

pub async fn register_user(
    State(state): State<AppState>,
    Path(forum_id): Path<u64>,
    Query(params): Query<RegisterParams>,
    Json(resource): Json<UserResource>,
) -> Result<Response, ApiError> {
    let user = validate_user(&resource).map_err(ApiError::Validation)?;
    info!(forum_id, "registering user");
    state
        .registrations
        .register_user(user, params.send_welcome_mail);
    // The registration date is assigned by the use case, never by the caller.
    let echoed = UserResource {
        registration_date: None,
        ..resource
    };
    Ok(Json(echoed).into_response())
}
