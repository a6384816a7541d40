// src/handlers/leads.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::lead::{Lead, LeadStatus},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub status: Option<String>,
    pub busca: Option<String>,
}

fn parse_status_filtro(raw: Option<&str>) -> Result<Option<LeadStatus>, AppError> {
    match raw.map(|s| s.to_ascii_lowercase()) {
        None => Ok(None),
        Some(s) if s == "todos" => Ok(None),
        Some(s) => match s.as_str() {
            "novo" => Ok(Some(LeadStatus::Novo)),
            "em_contato" => Ok(Some(LeadStatus::EmContato)),
            "convertido" => Ok(Some(LeadStatus::Convertido)),
            "perdido" => Ok(Some(LeadStatus::Perdido)),
            outro => Err(AppError::InvalidInput(format!(
                "Status desconhecido: {}",
                outro
            ))),
        },
    }
}

// GET /api/admin/leads
#[utoipa::path(
    get,
    path = "/api/admin/leads",
    tag = "Leads",
    params(
        ("status" = Option<String>, Query, description = "novo | em_contato | convertido | perdido | todos"),
        ("busca" = Option<String>, Query, description = "Busca por nome, e-mail ou WhatsApp")
    ),
    responses(
        (status = 200, description = "Leads capturados no site", body = Vec<Lead>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = parse_status_filtro(query.status.as_deref())?;

    let leads = app_state
        .lead_repo
        .list(status, query.busca.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(leads)))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStatusLeadPayload {
    #[schema(example = "em_contato")]
    pub status: LeadStatus,
}

// PATCH /api/admin/leads/{id}/status — progresso livre, sem trava de sentido
#[utoipa::path(
    patch,
    path = "/api/admin/leads/{id}/status",
    tag = "Leads",
    request_body = SetStatusLeadPayload,
    responses(
        (status = 200, description = "Status do lead atualizado", body = Lead)
    ),
    security(("api_jwt" = []))
)]
pub async fn set_status_lead(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStatusLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    let lead = app_state.lead_repo.set_status(id, payload.status).await?;

    Ok((StatusCode::OK, Json(lead)))
}

// DELETE /api/admin/leads/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/leads/{id}",
    tag = "Leads",
    responses(
        (status = 204, description = "Lead excluído")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_lead(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.lead_repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filtro_todos_desliga_o_status() {
        assert_eq!(parse_status_filtro(Some("Todos")).unwrap(), None);
        assert_eq!(parse_status_filtro(None).unwrap(), None);
    }

    #[test]
    fn filtro_aceita_em_contato() {
        assert_eq!(
            parse_status_filtro(Some("em_contato")).unwrap(),
            Some(LeadStatus::EmContato)
        );
    }
}
