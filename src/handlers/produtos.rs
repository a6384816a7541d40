// src/handlers/produtos.rs

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

use crate::{common::error::AppError, config::AppState, models::produto::Produto};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProdutoPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Amil 400")]
    pub nome: String,

    #[validate(length(min = 2, message = "A operadora deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Amil")]
    pub operadora: String,

    #[validate(length(min = 2, message = "O tipo deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Coletivo por adesão")]
    pub tipo: String,

    #[schema(example = "3.50")]
    pub comissao: Decimal,

    #[serde(default = "default_disponivel")]
    #[schema(example = true)]
    pub disponivel: bool,
}

fn default_disponivel() -> bool {
    true
}

// POST /api/admin/produtos
#[utoipa::path(
    post,
    path = "/api/admin/produtos",
    tag = "Produtos",
    request_body = CreateProdutoPayload,
    responses(
        (status = 201, description = "Produto criado", body = Produto),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_produto(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateProdutoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    if payload.comissao < Decimal::ZERO {
        return Err(AppError::InvalidInput(
            "A comissão não pode ser negativa.".to_string(),
        ));
    }

    let produto = app_state
        .produto_repo
        .create(
            &payload.nome,
            &payload.operadora,
            &payload.tipo,
            payload.comissao,
            payload.disponivel,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(produto)))
}

// GET /api/admin/produtos
#[utoipa::path(
    get,
    path = "/api/admin/produtos",
    tag = "Produtos",
    responses(
        (status = 200, description = "Todos os produtos", body = Vec<Produto>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_produtos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let produtos = app_state.produto_repo.list().await?;

    Ok((StatusCode::OK, Json(produtos)))
}

// GET /api/corretor/produtos — só o que está liberado para venda
#[utoipa::path(
    get,
    path = "/api/corretor/produtos",
    tag = "Produtos",
    responses(
        (status = 200, description = "Produtos disponíveis para venda", body = Vec<Produto>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_produtos_disponiveis(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let produtos = app_state.produto_repo.list_disponiveis().await?;

    Ok((StatusCode::OK, Json(produtos)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProdutoPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub nome: Option<String>,
    #[validate(length(min = 2, message = "A operadora deve ter no mínimo 2 caracteres."))]
    pub operadora: Option<String>,
    #[validate(length(min = 2, message = "O tipo deve ter no mínimo 2 caracteres."))]
    pub tipo: Option<String>,
    pub comissao: Option<Decimal>,
}

// PUT /api/admin/produtos/{id}
#[utoipa::path(
    put,
    path = "/api/admin/produtos/{id}",
    tag = "Produtos",
    request_body = UpdateProdutoPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Produto),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_produto(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProdutoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let produto = app_state
        .produto_repo
        .update(
            id,
            payload.nome.as_deref(),
            payload.operadora.as_deref(),
            payload.tipo.as_deref(),
            payload.comissao,
        )
        .await?;

    Ok((StatusCode::OK, Json(produto)))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetDisponibilidadePayload {
    #[schema(example = false)]
    pub disponivel: bool,
}

// PATCH /api/admin/produtos/{id}/disponibilidade
#[utoipa::path(
    patch,
    path = "/api/admin/produtos/{id}/disponibilidade",
    tag = "Produtos",
    request_body = SetDisponibilidadePayload,
    responses(
        (status = 200, description = "Visibilidade para corretores alterada", body = Produto)
    ),
    security(("api_jwt" = []))
)]
pub async fn set_disponibilidade(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetDisponibilidadePayload>,
) -> Result<impl IntoResponse, AppError> {
    let produto = app_state
        .produto_repo
        .set_disponibilidade(id, payload.disponivel)
        .await?;

    Ok((StatusCode::OK, Json(produto)))
}

// DELETE /api/admin/produtos/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/produtos/{id}",
    tag = "Produtos",
    responses(
        (status = 204, description = "Produto excluído"),
        (status = 409, description = "Produto referenciado por propostas")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_produto(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.produto_repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
