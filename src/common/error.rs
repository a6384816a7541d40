use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Acesso negado")]
    Forbidden,

    // Corretor autenticado mas ainda não aprovado pelo admin
    #[error("Cadastro de corretor aguardando aprovação")]
    CorretorNaoAprovado,

    #[error("Registro não encontrado: {0}")]
    NotFound(String),

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    // Regras do ciclo de vida (proposta/comissão)
    #[error("Transição de status inválida: {0}")]
    TransicaoInvalida(String),

    #[error("Documento obrigatório ausente: {0}")]
    DocumentoObrigatorioAusente(String),

    #[error("Produto indisponível para venda")]
    ProdutoIndisponivel,

    #[error("Registro em uso: {0}")]
    RegistroEmUso(String),

    #[error("Dados inválidos: {0}")]
    InvalidInput(String),

    #[error("Falha no upload: {0}")]
    UploadFailed(String),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::UserNotFound => {
                (StatusCode::NOT_FOUND, "Usuário não encontrado.".to_string())
            }
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Você não tem permissão para acessar este recurso.".to_string(),
            ),
            AppError::CorretorNaoAprovado => (
                StatusCode::FORBIDDEN,
                "Seu cadastro ainda não foi aprovado pela administração.".to_string(),
            ),
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::UniqueConstraintViolation(ref msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::TransicaoInvalida(ref msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::DocumentoObrigatorioAusente(ref msg) => (
                StatusCode::BAD_REQUEST,
                format!("Documento obrigatório ausente: {}.", msg),
            ),
            AppError::ProdutoIndisponivel => (
                StatusCode::BAD_REQUEST,
                "Este produto não está disponível para venda.".to_string(),
            ),
            AppError::RegistroEmUso(ref msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::InvalidInput(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UploadFailed(ref msg) => (
                StatusCode::BAD_REQUEST,
                format!("Falha no upload: {}.", msg),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
