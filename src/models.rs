pub mod auth;
pub mod comissao;
pub mod corretor;
pub mod cotacao;
pub mod lead;
pub mod modelo;
pub mod plano;
pub mod produto;
pub mod proposta;
