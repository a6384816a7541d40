// src/handlers/propostas.rs

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CorretorContext,
    models::proposta::{
        DocumentoProposta, DocumentoTipo, PropostaCorretor, PropostaCorretorComNome,
        PropostaDireta, PropostaStatus,
    },
    services::proposta_service::DocumentoUpload,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub status: Option<String>,
    pub busca: Option<String>,
}

// "todos" (em qualquer caixa) desliga o filtro de status; a busca textual
// continua valendo sozinha
fn parse_status_filtro(raw: Option<&str>) -> Result<Option<PropostaStatus>, AppError> {
    match raw.map(|s| s.to_ascii_lowercase()) {
        None => Ok(None),
        Some(s) if s == "todos" => Ok(None),
        Some(s) => match s.as_str() {
            "pendente" => Ok(Some(PropostaStatus::Pendente)),
            "aprovada" => Ok(Some(PropostaStatus::Aprovada)),
            "rejeitada" => Ok(Some(PropostaStatus::Rejeitada)),
            outro => Err(AppError::InvalidInput(format!(
                "Status desconhecido: {}",
                outro
            ))),
        },
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropostaDetalheResponse {
    pub proposta: PropostaCorretor,
    pub documentos: Vec<DocumentoProposta>,
}

// =============================================================================
//  PAINEL DO CORRETOR
// =============================================================================

// Campos textuais do formulário multipart de submissão
#[derive(Debug, Default, Validate)]
struct CamposSubmissao {
    #[validate(length(min = 2, message = "O nome do cliente deve ter no mínimo 2 caracteres."))]
    cliente: String,
    #[validate(email(message = "O e-mail do cliente é inválido."))]
    email_cliente: String,
    #[validate(length(min = 10, message = "O WhatsApp do cliente deve incluir o DDD."))]
    whatsapp_cliente: String,
}

// POST /api/corretor/propostas (multipart/form-data)
//
// Campos de texto: cliente, emailCliente, whatsappCliente, produtoId, valor.
// Arquivos: rg_frente, rg_verso, comprovante_residencia (obrigatórios) e
// proposta (opcional). O gate de completude roda no serviço antes de
// qualquer gravação.
#[utoipa::path(
    post,
    path = "/api/corretor/propostas",
    tag = "Propostas",
    responses(
        (status = 201, description = "Proposta submetida com os documentos", body = PropostaDetalheResponse),
        (status = 400, description = "Documento obrigatório ausente ou dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn submeter_proposta(
    State(app_state): State<AppState>,
    CorretorContext(corretor): CorretorContext,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut campos = CamposSubmissao::default();
    let mut produto_id: Option<Uuid> = None;
    let mut valor: Option<Decimal> = None;
    let mut documentos: Vec<DocumentoUpload> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::UploadFailed(e.to_string()))?
    {
        let nome_campo = field.name().unwrap_or_default().to_string();

        // Slots de arquivo têm nomes fixos; o resto é texto
        if let Some(tipo) = DocumentoTipo::from_field_name(&nome_campo) {
            let nome_original = field
                .file_name()
                .map(|s| s.to_string())
                .unwrap_or_else(|| format!("{}.bin", tipo.as_str()));

            let dados = field
                .bytes()
                .await
                .map_err(|e| AppError::UploadFailed(e.to_string()))?;

            documentos.push(DocumentoUpload {
                tipo,
                nome_original,
                dados: dados.to_vec(),
            });
            continue;
        }

        let texto = field
            .text()
            .await
            .map_err(|e| AppError::UploadFailed(e.to_string()))?;

        match nome_campo.as_str() {
            "cliente" => campos.cliente = texto,
            "emailCliente" => campos.email_cliente = texto,
            "whatsappCliente" => campos.whatsapp_cliente = texto,
            "produtoId" => {
                produto_id = Some(Uuid::parse_str(&texto).map_err(|_| {
                    AppError::InvalidInput("produtoId não é um UUID válido.".to_string())
                })?);
            }
            "valor" => {
                valor = Some(Decimal::from_str(&texto).map_err(|_| {
                    AppError::InvalidInput("valor não é um número válido.".to_string())
                })?);
            }
            // Campos desconhecidos são ignorados
            _ => {}
        }
    }

    campos.validate().map_err(AppError::ValidationError)?;

    let produto_id = produto_id
        .ok_or_else(|| AppError::InvalidInput("produtoId é obrigatório.".to_string()))?;
    let valor =
        valor.ok_or_else(|| AppError::InvalidInput("valor é obrigatório.".to_string()))?;

    let (proposta, documentos) = app_state
        .proposta_service
        .submeter(
            corretor.id,
            &campos.cliente,
            &campos.email_cliente,
            &campos.whatsapp_cliente,
            produto_id,
            valor,
            documentos,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PropostaDetalheResponse {
            proposta,
            documentos,
        }),
    ))
}

// GET /api/corretor/propostas — só as do corretor logado
#[utoipa::path(
    get,
    path = "/api/corretor/propostas",
    tag = "Propostas",
    params(
        ("status" = Option<String>, Query, description = "pendente | aprovada | rejeitada | todos"),
        ("busca" = Option<String>, Query, description = "Busca por cliente ou produto")
    ),
    responses(
        (status = 200, description = "Propostas do corretor, mais recentes primeiro", body = Vec<PropostaCorretor>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_minhas_propostas(
    State(app_state): State<AppState>,
    CorretorContext(corretor): CorretorContext,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = parse_status_filtro(query.status.as_deref())?;

    let propostas = app_state
        .proposta_repo
        .list_by_corretor(corretor.id, status, query.busca.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(propostas)))
}

// GET /api/corretor/propostas/{id}
#[utoipa::path(
    get,
    path = "/api/corretor/propostas/{id}",
    tag = "Propostas",
    responses(
        (status = 200, description = "Detalhe da proposta com documentos", body = PropostaDetalheResponse),
        (status = 404, description = "Proposta não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_minha_proposta(
    State(app_state): State<AppState>,
    CorretorContext(corretor): CorretorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let proposta = app_state
        .proposta_repo
        .find_by_id(id)
        .await?
        // Proposta de outro corretor responde como inexistente
        .filter(|p| p.corretor_id == corretor.id)
        .ok_or_else(|| AppError::NotFound("Proposta não encontrada.".to_string()))?;

    let documentos = app_state.proposta_repo.list_documentos(proposta.id).await?;

    Ok((
        StatusCode::OK,
        Json(PropostaDetalheResponse {
            proposta,
            documentos,
        }),
    ))
}

// GET /api/corretor/propostas/{id}/ficha — PDF da própria proposta
pub async fn ficha_minha_proposta(
    State(app_state): State<AppState>,
    CorretorContext(corretor): CorretorContext,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let proposta = app_state
        .proposta_repo
        .find_by_id(id)
        .await?
        .filter(|p| p.corretor_id == corretor.id)
        .ok_or_else(|| AppError::NotFound("Proposta não encontrada.".to_string()))?;

    let documentos = app_state.proposta_repo.list_documentos(proposta.id).await?;

    let pdf_bytes = app_state
        .pdf_service
        .gerar_ficha_proposta(&proposta, &corretor, &documentos)?;

    responder_pdf(proposta.id, pdf_bytes)
}

// =============================================================================
//  PAINEL ADMINISTRATIVO (canal corretor)
// =============================================================================

// GET /api/admin/propostas
#[utoipa::path(
    get,
    path = "/api/admin/propostas",
    tag = "Propostas",
    params(
        ("status" = Option<String>, Query, description = "pendente | aprovada | rejeitada | todos"),
        ("busca" = Option<String>, Query, description = "Busca por cliente, produto ou corretor")
    ),
    responses(
        (status = 200, description = "Todas as propostas do canal corretor", body = Vec<PropostaCorretorComNome>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_propostas_admin(
    State(app_state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = parse_status_filtro(query.status.as_deref())?;

    let propostas = app_state
        .proposta_repo
        .list_admin(status, query.busca.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(propostas)))
}

// GET /api/admin/propostas/{id}
#[utoipa::path(
    get,
    path = "/api/admin/propostas/{id}",
    tag = "Propostas",
    responses(
        (status = 200, description = "Detalhe da proposta com documentos", body = PropostaDetalheResponse),
        (status = 404, description = "Proposta não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_proposta_admin(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let proposta = app_state
        .proposta_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Proposta não encontrada.".to_string()))?;

    let documentos = app_state.proposta_repo.list_documentos(proposta.id).await?;

    Ok((
        StatusCode::OK,
        Json(PropostaDetalheResponse {
            proposta,
            documentos,
        }),
    ))
}

// POST /api/admin/propostas/{id}/aprovar — gera a comissão na mesma transação
#[utoipa::path(
    post,
    path = "/api/admin/propostas/{id}/aprovar",
    tag = "Propostas",
    responses(
        (status = 200, description = "Proposta aprovada e comissão gerada", body = PropostaCorretor),
        (status = 409, description = "Proposta já saiu de pendente")
    ),
    security(("api_jwt" = []))
)]
pub async fn aprovar_proposta(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let proposta = app_state.proposta_service.aprovar(id).await?;

    Ok((StatusCode::OK, Json(proposta)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RejeitarPayload {
    #[validate(length(min = 1, message = "O motivo da rejeição é obrigatório."))]
    #[schema(example = "Documentação incompleta")]
    pub motivo: String,
}

// POST /api/admin/propostas/{id}/rejeitar
#[utoipa::path(
    post,
    path = "/api/admin/propostas/{id}/rejeitar",
    tag = "Propostas",
    request_body = RejeitarPayload,
    responses(
        (status = 200, description = "Proposta rejeitada com motivo", body = PropostaCorretor),
        (status = 400, description = "Motivo vazio"),
        (status = 409, description = "Proposta já saiu de pendente")
    ),
    security(("api_jwt" = []))
)]
pub async fn rejeitar_proposta(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejeitarPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let proposta = app_state
        .proposta_service
        .rejeitar(id, &payload.motivo)
        .await?;

    Ok((StatusCode::OK, Json(proposta)))
}

// GET /api/admin/propostas/{id}/ficha — PDF para impressão/arquivo
pub async fn ficha_proposta_admin(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let proposta = app_state
        .proposta_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Proposta não encontrada.".to_string()))?;

    let corretor = app_state
        .corretor_repo
        .find_by_id(proposta.corretor_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Corretor não encontrado.".to_string()))?;

    let documentos = app_state.proposta_repo.list_documentos(proposta.id).await?;

    let pdf_bytes = app_state
        .pdf_service
        .gerar_ficha_proposta(&proposta, &corretor, &documentos)?;

    responder_pdf(proposta.id, pdf_bytes)
}

// Configura os headers para o navegador baixar o PDF
fn responder_pdf(proposta_id: Uuid, pdf_bytes: Vec<u8>) -> Result<Response, AppError> {
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"proposta_{}.pdf\"", proposta_id),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}

// =============================================================================
//  PAINEL ADMINISTRATIVO (canal direto)
// =============================================================================

// GET /api/admin/propostas-diretas
#[utoipa::path(
    get,
    path = "/api/admin/propostas-diretas",
    tag = "Propostas",
    params(
        ("status" = Option<String>, Query, description = "pendente | aprovada | rejeitada | todos"),
        ("busca" = Option<String>, Query, description = "Busca por nome do cliente")
    ),
    responses(
        (status = 200, description = "Propostas do canal direto", body = Vec<PropostaDireta>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_propostas_diretas(
    State(app_state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = parse_status_filtro(query.status.as_deref())?;

    let propostas = app_state
        .proposta_repo
        .list_diretas(status, query.busca.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(propostas)))
}

// POST /api/admin/propostas-diretas/{id}/aprovar — sem corretor, sem comissão
#[utoipa::path(
    post,
    path = "/api/admin/propostas-diretas/{id}/aprovar",
    tag = "Propostas",
    responses(
        (status = 200, description = "Proposta direta aprovada", body = PropostaDireta),
        (status = 409, description = "Proposta já saiu de pendente")
    ),
    security(("api_jwt" = []))
)]
pub async fn aprovar_proposta_direta(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let proposta = app_state.proposta_service.aprovar_direta(id).await?;

    Ok((StatusCode::OK, Json(proposta)))
}

// POST /api/admin/propostas-diretas/{id}/rejeitar
#[utoipa::path(
    post,
    path = "/api/admin/propostas-diretas/{id}/rejeitar",
    tag = "Propostas",
    request_body = RejeitarPayload,
    responses(
        (status = 200, description = "Proposta direta rejeitada", body = PropostaDireta),
        (status = 409, description = "Proposta já saiu de pendente")
    ),
    security(("api_jwt" = []))
)]
pub async fn rejeitar_proposta_direta(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejeitarPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let proposta = app_state
        .proposta_service
        .rejeitar_direta(id, &payload.motivo)
        .await?;

    Ok((StatusCode::OK, Json(proposta)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filtro_todos_devolve_none_em_qualquer_caixa() {
        assert_eq!(parse_status_filtro(Some("todos")).unwrap(), None);
        assert_eq!(parse_status_filtro(Some("Todos")).unwrap(), None);
        assert_eq!(parse_status_filtro(Some("TODOS")).unwrap(), None);
        assert_eq!(parse_status_filtro(None).unwrap(), None);
    }

    #[test]
    fn filtro_mapeia_os_tres_status() {
        assert_eq!(
            parse_status_filtro(Some("pendente")).unwrap(),
            Some(PropostaStatus::Pendente)
        );
        assert_eq!(
            parse_status_filtro(Some("Aprovada")).unwrap(),
            Some(PropostaStatus::Aprovada)
        );
        assert_eq!(
            parse_status_filtro(Some("rejeitada")).unwrap(),
            Some(PropostaStatus::Rejeitada)
        );
    }

    #[test]
    fn filtro_recusa_valor_desconhecido() {
        assert!(parse_status_filtro(Some("cancelada")).is_err());
    }
}
