// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{auth::{User, UserRole}, corretor::{Corretor, CorretorStatus}},
};

// Valida o Bearer token e devolve a conta correspondente
async fn autenticar(app_state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    if let Some(auth_header) = auth_header {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            return app_state.auth_service.validate_token(token).await;
        }
    }

    Err(AppError::InvalidToken)
}

// Guard genérico: qualquer conta autenticada
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = autenticar(&app_state, request.headers()).await?;

    // Insere o usuário nos "extensions" da requisição
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Guard do back-office administrativo
pub async fn admin_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = autenticar(&app_state, request.headers()).await?;

    if user.role != UserRole::Admin {
        return Err(AppError::Forbidden);
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Guard do painel do corretor: além da conta, exige a ficha aprovada.
// Corretor pendente/rejeitado autentica mas não entra no painel.
pub async fn corretor_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = autenticar(&app_state, request.headers()).await?;

    if user.role != UserRole::Corretor {
        return Err(AppError::Forbidden);
    }

    let corretor = app_state
        .corretor_repo
        .find_by_user_id(user.id)
        .await?
        .ok_or(AppError::Forbidden)?;

    if corretor.status != CorretorStatus::Aprovado {
        return Err(AppError::CorretorNaoAprovado);
    }

    request.extensions_mut().insert(user);
    request.extensions_mut().insert(corretor);
    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}

// Extrator da ficha do corretor aprovado (inserida pelo corretor_guard)
pub struct CorretorContext(pub Corretor);

impl<S> FromRequestParts<S> for CorretorContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Corretor>()
            .cloned()
            .map(CorretorContext)
            .ok_or(AppError::Forbidden)
    }
}
