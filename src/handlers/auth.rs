// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthResponse, LoginUserPayload, MeResponse, RegisterCorretorPayload},
};

// Cadastro público de corretor (a conta nasce com a ficha 'pendente')
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterCorretorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let (token, _corretor) = app_state
        .auth_service
        .register_corretor(
            &payload.nome,
            &payload.email,
            &payload.password,
            &payload.whatsapp,
            &payload.estado,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}

// Handler de login
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token }))
}

// Handler da rota protegida /me: conta + ficha de corretor (quando houver)
pub async fn get_me(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<MeResponse>, AppError> {
    let corretor = app_state.corretor_repo.find_by_user_id(user.id).await?;

    Ok(Json(MeResponse { user, corretor }))
}
