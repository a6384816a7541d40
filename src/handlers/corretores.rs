// src/handlers/corretores.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::corretor::{Corretor, CorretorStatus},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub status: Option<String>,
    pub busca: Option<String>,
}

// "todos" (em qualquer caixa) desliga o filtro de status
fn parse_status_filtro(raw: Option<&str>) -> Result<Option<CorretorStatus>, AppError> {
    match raw.map(|s| s.to_ascii_lowercase()) {
        None => Ok(None),
        Some(s) if s == "todos" => Ok(None),
        Some(s) => match s.as_str() {
            "pendente" => Ok(Some(CorretorStatus::Pendente)),
            "aprovado" => Ok(Some(CorretorStatus::Aprovado)),
            "rejeitado" => Ok(Some(CorretorStatus::Rejeitado)),
            outro => Err(AppError::InvalidInput(format!(
                "Status desconhecido: {}",
                outro
            ))),
        },
    }
}

// GET /api/admin/corretores
#[utoipa::path(
    get,
    path = "/api/admin/corretores",
    tag = "Corretores",
    params(
        ("status" = Option<String>, Query, description = "pendente | aprovado | rejeitado | todos"),
        ("busca" = Option<String>, Query, description = "Busca por nome ou e-mail")
    ),
    responses(
        (status = 200, description = "Lista de corretores", body = Vec<Corretor>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_corretores(
    State(app_state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = parse_status_filtro(query.status.as_deref())?;

    let corretores = app_state
        .corretor_repo
        .list(status, query.busca.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(corretores)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCorretorPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub nome: Option<String>,

    #[validate(length(min = 10, message = "O WhatsApp deve incluir o DDD."))]
    pub whatsapp: Option<String>,

    #[validate(length(equal = 2, message = "Use a sigla do estado (ex: SP)."))]
    pub estado: Option<String>,
}

// PUT /api/admin/corretores/{id}
#[utoipa::path(
    put,
    path = "/api/admin/corretores/{id}",
    tag = "Corretores",
    request_body = UpdateCorretorPayload,
    responses(
        (status = 200, description = "Corretor atualizado", body = Corretor),
        (status = 404, description = "Corretor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_corretor(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCorretorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let corretor = app_state
        .corretor_repo
        .update(
            id,
            payload.nome.as_deref(),
            payload.whatsapp.as_deref(),
            payload.estado.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(corretor)))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStatusPayload {
    #[schema(example = "aprovado")]
    pub status: CorretorStatus,
}

// PATCH /api/admin/corretores/{id}/status
#[utoipa::path(
    patch,
    path = "/api/admin/corretores/{id}/status",
    tag = "Corretores",
    request_body = SetStatusPayload,
    responses(
        (status = 200, description = "Status atualizado (libera ou bloqueia o painel)", body = Corretor)
    ),
    security(("api_jwt" = []))
)]
pub async fn set_status_corretor(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let corretor = app_state.corretor_repo.set_status(id, payload.status).await?;

    Ok((StatusCode::OK, Json(corretor)))
}

// DELETE /api/admin/corretores/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/corretores/{id}",
    tag = "Corretores",
    responses(
        (status = 204, description = "Corretor excluído"),
        (status = 409, description = "Corretor possui propostas ou comissões")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_corretor(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.corretor_repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filtro_todos_desliga_o_status() {
        assert_eq!(parse_status_filtro(Some("todos")).unwrap(), None);
        assert_eq!(parse_status_filtro(Some("Todos")).unwrap(), None);
        assert_eq!(parse_status_filtro(None).unwrap(), None);
    }

    #[test]
    fn filtro_aceita_os_status_conhecidos() {
        assert_eq!(
            parse_status_filtro(Some("aprovado")).unwrap(),
            Some(CorretorStatus::Aprovado)
        );
        assert_eq!(
            parse_status_filtro(Some("Pendente")).unwrap(),
            Some(CorretorStatus::Pendente)
        );
    }

    #[test]
    fn filtro_recusa_status_desconhecido() {
        assert!(parse_status_filtro(Some("bloqueado")).is_err());
    }
}
