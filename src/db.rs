pub mod user_repo;
pub use user_repo::UserRepository;
pub mod corretor_repo;
pub use corretor_repo::CorretorRepository;
pub mod produto_repo;
pub use produto_repo::ProdutoRepository;
pub mod plano_repo;
pub use plano_repo::PlanoRepository;
pub mod lead_repo;
pub use lead_repo::LeadRepository;
pub mod cotacao_repo;
pub use cotacao_repo::CotacaoRepository;
pub mod proposta_repo;
pub use proposta_repo::PropostaRepository;
pub mod comissao_repo;
pub use comissao_repo::ComissaoRepository;
pub mod modelo_repo;
pub use modelo_repo::ModeloRepository;
