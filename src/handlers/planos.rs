// src/handlers/planos.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::plano::{FaixaPreco, Plano, PlanoComPrecos, PrecoPlano, TabelaPrecos},
};

// =============================================================================
//  PLANOS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanoPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Essencial Ambulatorial")]
    pub nome: String,

    #[validate(length(min = 2, message = "A operadora deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Unimed")]
    pub operadora: String,

    #[validate(length(min = 2, message = "O tipo deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Individual")]
    pub tipo: String,
}

// POST /api/admin/planos
#[utoipa::path(
    post,
    path = "/api/admin/planos",
    tag = "Planos",
    request_body = CreatePlanoPayload,
    responses(
        (status = 201, description = "Plano criado", body = Plano)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_plano(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePlanoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let plano = app_state
        .plano_repo
        .create(&payload.nome, &payload.operadora, &payload.tipo)
        .await?;

    Ok((StatusCode::CREATED, Json(plano)))
}

// GET /api/admin/planos
#[utoipa::path(
    get,
    path = "/api/admin/planos",
    tag = "Planos",
    responses(
        (status = 200, description = "Todos os planos", body = Vec<Plano>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_planos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let planos = app_state.plano_repo.list().await?;

    Ok((StatusCode::OK, Json(planos)))
}

// GET /api/admin/planos/{id}/precos
#[utoipa::path(
    get,
    path = "/api/admin/planos/{id}/precos",
    tag = "Planos",
    responses(
        (status = 200, description = "Plano com as faixas de preço", body = PlanoComPrecos),
        (status = 404, description = "Plano não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_plano_com_precos(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let plano = app_state
        .plano_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Plano não encontrado.".to_string()))?;

    let precos = app_state.plano_repo.list_precos(id).await?;

    Ok((StatusCode::OK, Json(PlanoComPrecos { plano, precos })))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanoPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub nome: Option<String>,
    #[validate(length(min = 2, message = "A operadora deve ter no mínimo 2 caracteres."))]
    pub operadora: Option<String>,
    #[validate(length(min = 2, message = "O tipo deve ter no mínimo 2 caracteres."))]
    pub tipo: Option<String>,
}

// PUT /api/admin/planos/{id}
#[utoipa::path(
    put,
    path = "/api/admin/planos/{id}",
    tag = "Planos",
    request_body = UpdatePlanoPayload,
    responses(
        (status = 200, description = "Plano atualizado", body = Plano)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_plano(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePlanoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let plano = app_state
        .plano_repo
        .update(
            id,
            payload.nome.as_deref(),
            payload.operadora.as_deref(),
            payload.tipo.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(plano)))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetAtivoPayload {
    #[schema(example = false)]
    pub ativo: bool,
}

// PATCH /api/admin/planos/{id}/ativo
#[utoipa::path(
    patch,
    path = "/api/admin/planos/{id}/ativo",
    tag = "Planos",
    request_body = SetAtivoPayload,
    responses(
        (status = 200, description = "Plano ativado/desativado na vitrine", body = Plano)
    ),
    security(("api_jwt" = []))
)]
pub async fn set_ativo_plano(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetAtivoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let plano = app_state.plano_repo.set_ativo(id, payload.ativo).await?;

    Ok((StatusCode::OK, Json(plano)))
}

// DELETE /api/admin/planos/{id} — as faixas de preço caem junto (CASCADE)
#[utoipa::path(
    delete,
    path = "/api/admin/planos/{id}",
    tag = "Planos",
    responses(
        (status = 204, description = "Plano e faixas de preço excluídos"),
        (status = 409, description = "Plano referenciado por propostas")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_plano(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.plano_repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  PREÇOS POR FAIXA ETÁRIA
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertPrecoPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "29-33")]
    pub faixa_etaria: String,

    #[schema(example = "389.90")]
    pub preco: Decimal,
}

// PUT /api/admin/planos/{id}/precos — um preço por (plano, faixa)
#[utoipa::path(
    put,
    path = "/api/admin/planos/{id}/precos",
    tag = "Planos",
    request_body = UpsertPrecoPayload,
    responses(
        (status = 200, description = "Preço criado ou atualizado", body = PrecoPlano)
    ),
    security(("api_jwt" = []))
)]
pub async fn upsert_preco(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpsertPrecoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    if payload.preco <= Decimal::ZERO {
        return Err(AppError::InvalidInput(
            "O preço deve ser positivo.".to_string(),
        ));
    }

    let preco = app_state
        .plano_repo
        .upsert_preco(id, &payload.faixa_etaria, payload.preco)
        .await?;

    Ok((StatusCode::OK, Json(preco)))
}

// DELETE /api/admin/planos/precos/{preco_id}
#[utoipa::path(
    delete,
    path = "/api/admin/planos/precos/{preco_id}",
    tag = "Planos",
    responses(
        (status = 204, description = "Faixa de preço excluída")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_preco(
    State(app_state): State<AppState>,
    Path(preco_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.plano_repo.delete_preco(preco_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  TABELAS DE PREÇOS (referência administrativa)
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTabelaPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Unimed PME 2025")]
    pub nome: String,

    #[validate(length(min = 2, message = "A operadora deve ter no mínimo 2 caracteres."))]
    pub operadora: String,

    #[validate(length(min = 2, message = "O tipo deve ter no mínimo 2 caracteres."))]
    pub tipo: String,

    pub faixas: Vec<FaixaPreco>,
}

// POST /api/admin/tabelas-precos
#[utoipa::path(
    post,
    path = "/api/admin/tabelas-precos",
    tag = "Planos",
    request_body = CreateTabelaPayload,
    responses(
        (status = 201, description = "Tabela de preços criada", body = TabelaPrecos)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_tabela(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTabelaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let faixas = serde_json::to_value(&payload.faixas)
        .map_err(|e| AppError::InternalServerError(e.into()))?;

    let tabela = app_state
        .plano_repo
        .create_tabela(&payload.nome, &payload.operadora, &payload.tipo, &faixas)
        .await?;

    Ok((StatusCode::CREATED, Json(tabela)))
}

// GET /api/admin/tabelas-precos
#[utoipa::path(
    get,
    path = "/api/admin/tabelas-precos",
    tag = "Planos",
    responses(
        (status = 200, description = "Tabelas de preços cadastradas", body = Vec<TabelaPrecos>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_tabelas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let tabelas = app_state.plano_repo.list_tabelas().await?;

    Ok((StatusCode::OK, Json(tabelas)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTabelaPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub nome: Option<String>,
    #[validate(length(min = 2, message = "A operadora deve ter no mínimo 2 caracteres."))]
    pub operadora: Option<String>,
    #[validate(length(min = 2, message = "O tipo deve ter no mínimo 2 caracteres."))]
    pub tipo: Option<String>,
    pub faixas: Option<Vec<FaixaPreco>>,
}

// PUT /api/admin/tabelas-precos/{id}
#[utoipa::path(
    put,
    path = "/api/admin/tabelas-precos/{id}",
    tag = "Planos",
    request_body = UpdateTabelaPayload,
    responses(
        (status = 200, description = "Tabela de preços atualizada", body = TabelaPrecos)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_tabela(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTabelaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let faixas = match &payload.faixas {
        Some(f) => Some(
            serde_json::to_value(f).map_err(|e| AppError::InternalServerError(e.into()))?,
        ),
        None => None,
    };

    let tabela = app_state
        .plano_repo
        .update_tabela(
            id,
            payload.nome.as_deref(),
            payload.operadora.as_deref(),
            payload.tipo.as_deref(),
            faixas.as_ref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(tabela)))
}

// DELETE /api/admin/tabelas-precos/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/tabelas-precos/{id}",
    tag = "Planos",
    responses(
        (status = 204, description = "Tabela de preços excluída")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_tabela(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.plano_repo.delete_tabela(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
