// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        ComissaoRepository, CorretorRepository, CotacaoRepository, LeadRepository,
        ModeloRepository, PlanoRepository, ProdutoRepository, PropostaRepository, UserRepository,
    },
    services::{
        auth::AuthService, comissao_service::ComissaoService, pdf_service::PdfService,
        proposta_service::PropostaService, storage::StorageService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,

    pub auth_service: AuthService,
    pub proposta_service: PropostaService,
    pub comissao_service: ComissaoService,
    pub pdf_service: PdfService,
    pub storage: StorageService,

    pub corretor_repo: CorretorRepository,
    pub produto_repo: ProdutoRepository,
    pub plano_repo: PlanoRepository,
    pub lead_repo: LeadRepository,
    pub cotacao_repo: CotacaoRepository,
    pub proposta_repo: PropostaRepository,
    pub comissao_repo: ComissaoRepository,
    pub modelo_repo: ModeloRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let storage_dir = env::var("STORAGE_DIR").unwrap_or_else(|_| "./storage".to_string());
        let public_url =
            env::var("PUBLIC_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let fonts_dir = env::var("FONTS_DIR").unwrap_or_else(|_| "./fonts".to_string());

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let corretor_repo = CorretorRepository::new(db_pool.clone());
        let produto_repo = ProdutoRepository::new(db_pool.clone());
        let plano_repo = PlanoRepository::new(db_pool.clone());
        let lead_repo = LeadRepository::new(db_pool.clone());
        let cotacao_repo = CotacaoRepository::new(db_pool.clone());
        let proposta_repo = PropostaRepository::new(db_pool.clone());
        let comissao_repo = ComissaoRepository::new(db_pool.clone());
        let modelo_repo = ModeloRepository::new(db_pool.clone());

        let storage = StorageService::new(storage_dir, public_url);

        let auth_service = AuthService::new(
            user_repo,
            corretor_repo.clone(),
            jwt_secret,
            db_pool.clone(),
        );
        let proposta_service = PropostaService::new(
            proposta_repo.clone(),
            produto_repo.clone(),
            comissao_repo.clone(),
            storage.clone(),
            db_pool.clone(),
        );
        let comissao_service = ComissaoService::new(
            comissao_repo.clone(),
            corretor_repo.clone(),
            db_pool.clone(),
        );
        let pdf_service = PdfService::new(fonts_dir);

        Ok(Self {
            db_pool,
            auth_service,
            proposta_service,
            comissao_service,
            pdf_service,
            storage,
            corretor_repo,
            produto_repo,
            plano_repo,
            lead_repo,
            cotacao_repo,
            proposta_repo,
            comissao_repo,
            modelo_repo,
        })
    }
}
