pub mod auth;
pub mod comissao_service;
pub mod pdf_service;
pub mod proposta_service;
pub mod storage;
