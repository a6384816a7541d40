// src/handlers/publico.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        cotacao::Cotacao,
        lead::Lead,
        plano::PlanoComPrecos,
        proposta::PropostaDireta,
    },
};

// Validade da sessão de cotação entre as páginas do fluxo público
const VALIDADE_COTACAO_HORAS: i64 = 24;

// GET /api/publico/planos — vitrine com as faixas de preço
#[utoipa::path(
    get,
    path = "/api/publico/planos",
    tag = "Público",
    responses(
        (status = 200, description = "Planos ativos com preços por faixa etária", body = Vec<PlanoComPrecos>)
    )
)]
pub async fn list_planos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let planos = app_state.plano_repo.list_ativos_com_precos().await?;

    Ok((StatusCode::OK, Json(planos)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCotacaoPayload {
    pub plano_id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "29-33")]
    pub faixa_etaria: String,

    #[schema(example = "Ana Souza")]
    pub nome: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub whatsapp: Option<String>,
}

// POST /api/publico/cotacoes — cria a sessão de cotação e devolve o token
// que as próximas páginas do fluxo usam para recuperar a seleção
#[utoipa::path(
    post,
    path = "/api/publico/cotacoes",
    tag = "Público",
    request_body = CreateCotacaoPayload,
    responses(
        (status = 201, description = "Sessão de cotação criada", body = Cotacao),
        (status = 404, description = "Plano ou faixa etária sem preço cadastrado")
    )
)]
pub async fn create_cotacao(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCotacaoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let plano = app_state
        .plano_repo
        .find_by_id(payload.plano_id)
        .await?
        .filter(|p| p.ativo)
        .ok_or_else(|| AppError::NotFound("Plano não encontrado.".to_string()))?;

    // O preço é resolvido aqui e congelado na sessão
    let preco = app_state
        .plano_repo
        .find_preco(&app_state.db_pool, plano.id, &payload.faixa_etaria)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Não há preço cadastrado para esta faixa etária.".to_string())
        })?;

    let expira_em = Utc::now() + Duration::hours(VALIDADE_COTACAO_HORAS);

    let cotacao = app_state
        .cotacao_repo
        .create(
            plano.id,
            &payload.faixa_etaria,
            preco.preco,
            payload.nome.as_deref(),
            payload.email.as_deref(),
            payload.whatsapp.as_deref(),
            expira_em,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(cotacao)))
}

// GET /api/publico/cotacoes/{token} — sessão expirada responde como inexistente
#[utoipa::path(
    get,
    path = "/api/publico/cotacoes/{token}",
    tag = "Público",
    responses(
        (status = 200, description = "Sessão de cotação viva", body = Cotacao),
        (status = 404, description = "Sessão inexistente ou expirada")
    )
)]
pub async fn get_cotacao(
    State(app_state): State<AppState>,
    Path(token): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let cotacao = app_state
        .cotacao_repo
        .find_by_token(token)
        .await?
        .filter(|c| !c.expirada(Utc::now()))
        .ok_or_else(|| AppError::NotFound("Cotação não encontrada.".to_string()))?;

    Ok((StatusCode::OK, Json(cotacao)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Ana Souza")]
    pub nome: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "ana@email.com")]
    pub email: String,

    #[validate(length(min = 10, message = "O WhatsApp deve incluir o DDD."))]
    #[schema(example = "21977776666")]
    pub whatsapp: String,

    pub plano_id: Option<Uuid>,
    pub faixa_etaria: Option<String>,
    #[validate(length(equal = 2, message = "Use a sigla do estado (ex: RJ)."))]
    pub estado: Option<String>,
}

// POST /api/publico/leads — captação do site
#[utoipa::path(
    post,
    path = "/api/publico/leads",
    tag = "Público",
    request_body = CreateLeadPayload,
    responses(
        (status = 201, description = "Lead registrado", body = Lead)
    )
)]
pub async fn create_lead(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let lead = app_state
        .lead_repo
        .create(
            &payload.nome,
            &payload.email,
            &payload.whatsapp,
            payload.plano_id,
            payload.faixa_etaria.as_deref(),
            payload.estado.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(lead)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropostaDiretaPayload {
    // Token da sessão de cotação criada nas páginas anteriores
    pub cotacao_token: Uuid,

    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    #[schema(example = "João Pereira")]
    pub nome_cliente: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email_cliente: Option<String>,
    pub whatsapp_cliente: Option<String>,
}

// POST /api/publico/propostas — canal direto, a partir de uma cotação viva
#[utoipa::path(
    post,
    path = "/api/publico/propostas",
    tag = "Público",
    request_body = CreatePropostaDiretaPayload,
    responses(
        (status = 201, description = "Proposta registrada para análise", body = PropostaDireta),
        (status = 404, description = "Cotação inexistente ou expirada")
    )
)]
pub async fn create_proposta_direta(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePropostaDiretaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let cotacao = app_state
        .cotacao_repo
        .find_by_token(payload.cotacao_token)
        .await?
        .filter(|c| !c.expirada(Utc::now()))
        .ok_or_else(|| AppError::NotFound("Cotação não encontrada.".to_string()))?;

    let proposta = app_state
        .proposta_repo
        .create_direta(
            &payload.nome_cliente,
            payload.email_cliente.as_deref(),
            payload.whatsapp_cliente.as_deref(),
            cotacao.plano_id,
            cotacao.preco,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(proposta)))
}
