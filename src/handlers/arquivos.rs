// src/handlers/arquivos.rs

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::{common::error::AppError, config::AppState};

// Content-Type básico pela extensão; o resto desce como binário
fn content_type(chave: &str) -> &'static str {
    match chave.rsplit('.').next().map(|e| e.to_ascii_lowercase()) {
        Some(ext) if ext == "pdf" => "application/pdf",
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

// GET /api/arquivos/{bucket}/{*chave}
//
// Serve os objetos gravados pelo StorageService. As URLs emitidas no upload
// apontam para cá; chaves com path traversal são recusadas pelo serviço.
pub async fn download(
    State(app_state): State<AppState>,
    Path((bucket, chave)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let dados = app_state.storage.read(&bucket, &chave).await?;

    let headers = [(header::CONTENT_TYPE, content_type(&chave))];

    Ok((headers, dados).into_response())
}
