// src/handlers/modelos.rs

use axum::{
    extract::{Multipart, Path, State},
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
    models::modelo::ModeloProposta,
    services::storage::{self, BUCKET_ARQUIVOS},
};

// POST /api/admin/modelos (multipart/form-data)
//
// Campos de texto: nome, descricao (opcional). Arquivo: arquivo.
#[utoipa::path(
    post,
    path = "/api/admin/modelos",
    tag = "Modelos",
    responses(
        (status = 201, description = "Modelo de proposta criado", body = ModeloProposta),
        (status = 400, description = "Arquivo ausente ou dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_modelo(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut nome: Option<String> = None;
    let mut descricao: Option<String> = None;
    let mut arquivo: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::UploadFailed(e.to_string()))?
    {
        let nome_campo = field.name().unwrap_or_default().to_string();

        match nome_campo.as_str() {
            "nome" => {
                nome = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::UploadFailed(e.to_string()))?,
                );
            }
            "descricao" => {
                descricao = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::UploadFailed(e.to_string()))?,
                );
            }
            "arquivo" => {
                let nome_original = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "modelo.bin".to_string());
                let dados = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::UploadFailed(e.to_string()))?;
                arquivo = Some((nome_original, dados.to_vec()));
            }
            _ => {}
        }
    }

    let nome = nome
        .filter(|n| n.len() >= 2)
        .ok_or_else(|| AppError::InvalidInput("nome é obrigatório.".to_string()))?;
    let (nome_original, dados) = arquivo
        .ok_or_else(|| AppError::InvalidInput("arquivo é obrigatório.".to_string()))?;

    let chave = storage::nome_unico(&nome_original);
    let url = app_state.storage.save(BUCKET_ARQUIVOS, &chave, &dados).await?;

    let modelo = app_state
        .modelo_repo
        .create(&nome, descricao.as_deref(), &url)
        .await?;

    Ok((StatusCode::CREATED, Json(modelo)))
}

// GET /api/admin/modelos
#[utoipa::path(
    get,
    path = "/api/admin/modelos",
    tag = "Modelos",
    responses(
        (status = 200, description = "Todos os modelos", body = Vec<ModeloProposta>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_modelos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let modelos = app_state.modelo_repo.list().await?;

    Ok((StatusCode::OK, Json(modelos)))
}

// GET /api/corretor/modelos — só os ativos
#[utoipa::path(
    get,
    path = "/api/corretor/modelos",
    tag = "Modelos",
    responses(
        (status = 200, description = "Modelos ativos para download", body = Vec<ModeloProposta>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_modelos_ativos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let modelos = app_state.modelo_repo.list_ativos().await?;

    Ok((StatusCode::OK, Json(modelos)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateModeloPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub nome: Option<String>,
    pub descricao: Option<String>,
}

// PUT /api/admin/modelos/{id} — dados textuais; o arquivo é imutável
#[utoipa::path(
    put,
    path = "/api/admin/modelos/{id}",
    tag = "Modelos",
    request_body = UpdateModeloPayload,
    responses(
        (status = 200, description = "Modelo atualizado", body = ModeloProposta)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_modelo(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateModeloPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let modelo = app_state
        .modelo_repo
        .update(id, payload.nome.as_deref(), payload.descricao.as_deref(), None)
        .await?;

    Ok((StatusCode::OK, Json(modelo)))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetAtivoModeloPayload {
    #[schema(example = false)]
    pub ativo: bool,
}

// PATCH /api/admin/modelos/{id}/ativo
#[utoipa::path(
    patch,
    path = "/api/admin/modelos/{id}/ativo",
    tag = "Modelos",
    request_body = SetAtivoModeloPayload,
    responses(
        (status = 200, description = "Visibilidade para corretores alterada", body = ModeloProposta)
    ),
    security(("api_jwt" = []))
)]
pub async fn set_ativo_modelo(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetAtivoModeloPayload>,
) -> Result<impl IntoResponse, AppError> {
    let modelo = app_state.modelo_repo.set_ativo(id, payload.ativo).await?;

    Ok((StatusCode::OK, Json(modelo)))
}

// DELETE /api/admin/modelos/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/modelos/{id}",
    tag = "Modelos",
    responses(
        (status = 204, description = "Modelo excluído")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_modelo(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.modelo_repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
