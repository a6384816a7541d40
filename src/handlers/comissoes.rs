// src/handlers/comissoes.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CorretorContext,
    models::comissao::{Comissao, ComissaoStatus, ResumoComissoes},
    services::comissao_service::resumir,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub status: Option<String>,
    pub busca: Option<String>,
    pub corretor_id: Option<Uuid>,
}

fn parse_status_filtro(raw: Option<&str>) -> Result<Option<ComissaoStatus>, AppError> {
    match raw.map(|s| s.to_ascii_lowercase()) {
        None => Ok(None),
        Some(s) if s == "todos" || s == "todas" => Ok(None),
        Some(s) => match s.as_str() {
            "pendente" => Ok(Some(ComissaoStatus::Pendente)),
            "pago" => Ok(Some(ComissaoStatus::Pago)),
            outro => Err(AppError::InvalidInput(format!(
                "Status desconhecido: {}",
                outro
            ))),
        },
    }
}

// =============================================================================
//  PAINEL ADMINISTRATIVO
// =============================================================================

// GET /api/admin/comissoes
#[utoipa::path(
    get,
    path = "/api/admin/comissoes",
    tag = "Comissões",
    params(
        ("status" = Option<String>, Query, description = "pendente | pago | todos"),
        ("busca" = Option<String>, Query, description = "Busca na descrição"),
        ("corretorId" = Option<Uuid>, Query, description = "Recorta por corretor")
    ),
    responses(
        (status = 200, description = "Comissões lançadas", body = Vec<Comissao>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_comissoes(
    State(app_state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = parse_status_filtro(query.status.as_deref())?;

    let comissoes = app_state
        .comissao_repo
        .list(query.corretor_id, status, query.busca.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(comissoes)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateComissaoPayload {
    pub corretor_id: Uuid,

    #[validate(length(min = 2, message = "A descrição deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Bônus de campanha - junho")]
    pub descricao: String,

    #[schema(example = "450.00")]
    pub valor: Decimal,

    #[schema(example = "3.50")]
    pub percentual: Option<Decimal>,

    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub data_prevista: NaiveDate,
}

// POST /api/admin/comissoes — lançamento manual
#[utoipa::path(
    post,
    path = "/api/admin/comissoes",
    tag = "Comissões",
    request_body = CreateComissaoPayload,
    responses(
        (status = 201, description = "Comissão lançada como pendente", body = Comissao),
        (status = 400, description = "Valor não positivo ou dados inválidos"),
        (status = 404, description = "Corretor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_comissao(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateComissaoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let comissao = app_state
        .comissao_service
        .criar_manual(
            payload.corretor_id,
            &payload.descricao,
            payload.valor,
            payload.percentual,
            payload.data_prevista,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(comissao)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarcarPagaPayload {
    #[schema(value_type = String, format = Date, example = "2024-06-05")]
    pub data_pagamento: NaiveDate,
}

// POST /api/admin/comissoes/{id}/pagar — pendente -> pago, sem volta
#[utoipa::path(
    post,
    path = "/api/admin/comissoes/{id}/pagar",
    tag = "Comissões",
    request_body = MarcarPagaPayload,
    responses(
        (status = 200, description = "Comissão marcada como paga", body = Comissao),
        (status = 409, description = "Comissão já estava paga")
    ),
    security(("api_jwt" = []))
)]
pub async fn marcar_paga(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MarcarPagaPayload>,
) -> Result<impl IntoResponse, AppError> {
    let comissao = app_state
        .comissao_service
        .marcar_paga(id, payload.data_pagamento)
        .await?;

    Ok((StatusCode::OK, Json(comissao)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumoQuery {
    pub corretor_id: Option<Uuid>,
}

// GET /api/admin/comissoes/resumo — agregação para o painel
#[utoipa::path(
    get,
    path = "/api/admin/comissoes/resumo",
    tag = "Comissões",
    params(
        ("corretorId" = Option<Uuid>, Query, description = "Recorta por corretor")
    ),
    responses(
        (status = 200, description = "Totais por status e por mês", body = ResumoComissoes)
    ),
    security(("api_jwt" = []))
)]
pub async fn resumo_comissoes(
    State(app_state): State<AppState>,
    Query(query): Query<ResumoQuery>,
) -> Result<impl IntoResponse, AppError> {
    let comissoes = app_state
        .comissao_repo
        .list(query.corretor_id, None, None)
        .await?;

    Ok((StatusCode::OK, Json(resumir(&comissoes))))
}

// =============================================================================
//  PAINEL DO CORRETOR
// =============================================================================

// GET /api/corretor/comissoes — só as do corretor logado
#[utoipa::path(
    get,
    path = "/api/corretor/comissoes",
    tag = "Comissões",
    params(
        ("status" = Option<String>, Query, description = "pendente | pago | todos")
    ),
    responses(
        (status = 200, description = "Comissões do corretor", body = Vec<Comissao>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_minhas_comissoes(
    State(app_state): State<AppState>,
    CorretorContext(corretor): CorretorContext,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = parse_status_filtro(query.status.as_deref())?;

    let comissoes = app_state
        .comissao_repo
        .list(Some(corretor.id), status, query.busca.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(comissoes)))
}

// GET /api/corretor/comissoes/resumo
#[utoipa::path(
    get,
    path = "/api/corretor/comissoes/resumo",
    tag = "Comissões",
    responses(
        (status = 200, description = "Totais do corretor por status e mês", body = ResumoComissoes)
    ),
    security(("api_jwt" = []))
)]
pub async fn resumo_minhas_comissoes(
    State(app_state): State<AppState>,
    CorretorContext(corretor): CorretorContext,
) -> Result<impl IntoResponse, AppError> {
    let comissoes = app_state
        .comissao_repo
        .list(Some(corretor.id), None, None)
        .await?;

    Ok((StatusCode::OK, Json(resumir(&comissoes))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filtro_todos_e_todas_desligam_o_status() {
        assert_eq!(parse_status_filtro(Some("todos")).unwrap(), None);
        assert_eq!(parse_status_filtro(Some("Todas")).unwrap(), None);
    }

    #[test]
    fn filtro_mapeia_pendente_e_pago() {
        assert_eq!(
            parse_status_filtro(Some("pendente")).unwrap(),
            Some(ComissaoStatus::Pendente)
        );
        assert_eq!(
            parse_status_filtro(Some("pago")).unwrap(),
            Some(ComissaoStatus::Pago)
        );
    }
}
