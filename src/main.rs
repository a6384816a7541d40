// src/main.rs

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::{admin_guard, auth_guard, corretor_guard};

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário (qualquer conta autenticada)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Site público: vitrine, cotação, leads e canal direto
    let publico_routes = Router::new()
        .route("/planos", get(handlers::publico::list_planos))
        .route("/cotacoes", post(handlers::publico::create_cotacao))
        .route("/cotacoes/{token}", get(handlers::publico::get_cotacao))
        .route("/leads", post(handlers::publico::create_lead))
        .route("/propostas", post(handlers::publico::create_proposta_direta));

    // Back-office administrativo
    let admin_routes = Router::new()
        // Corretores
        .route("/corretores", get(handlers::corretores::list_corretores))
        .route(
            "/corretores/{id}",
            put(handlers::corretores::update_corretor)
                .delete(handlers::corretores::delete_corretor),
        )
        .route(
            "/corretores/{id}/status",
            patch(handlers::corretores::set_status_corretor),
        )
        // Produtos
        .route(
            "/produtos",
            post(handlers::produtos::create_produto).get(handlers::produtos::list_produtos),
        )
        .route(
            "/produtos/{id}",
            put(handlers::produtos::update_produto).delete(handlers::produtos::delete_produto),
        )
        .route(
            "/produtos/{id}/disponibilidade",
            patch(handlers::produtos::set_disponibilidade),
        )
        // Planos e preços
        .route(
            "/planos",
            post(handlers::planos::create_plano).get(handlers::planos::list_planos),
        )
        .route(
            "/planos/{id}",
            put(handlers::planos::update_plano).delete(handlers::planos::delete_plano),
        )
        .route("/planos/{id}/ativo", patch(handlers::planos::set_ativo_plano))
        .route(
            "/planos/{id}/precos",
            get(handlers::planos::get_plano_com_precos).put(handlers::planos::upsert_preco),
        )
        .route(
            "/planos/precos/{preco_id}",
            delete(handlers::planos::delete_preco),
        )
        .route(
            "/tabelas-precos",
            post(handlers::planos::create_tabela).get(handlers::planos::list_tabelas),
        )
        .route(
            "/tabelas-precos/{id}",
            put(handlers::planos::update_tabela).delete(handlers::planos::delete_tabela),
        )
        // Leads
        .route("/leads", get(handlers::leads::list_leads))
        .route("/leads/{id}", delete(handlers::leads::delete_lead))
        .route("/leads/{id}/status", patch(handlers::leads::set_status_lead))
        // Propostas (canal corretor)
        .route("/propostas", get(handlers::propostas::list_propostas_admin))
        .route("/propostas/{id}", get(handlers::propostas::get_proposta_admin))
        .route(
            "/propostas/{id}/aprovar",
            post(handlers::propostas::aprovar_proposta),
        )
        .route(
            "/propostas/{id}/rejeitar",
            post(handlers::propostas::rejeitar_proposta),
        )
        .route(
            "/propostas/{id}/ficha",
            get(handlers::propostas::ficha_proposta_admin),
        )
        // Propostas (canal direto)
        .route(
            "/propostas-diretas",
            get(handlers::propostas::list_propostas_diretas),
        )
        .route(
            "/propostas-diretas/{id}/aprovar",
            post(handlers::propostas::aprovar_proposta_direta),
        )
        .route(
            "/propostas-diretas/{id}/rejeitar",
            post(handlers::propostas::rejeitar_proposta_direta),
        )
        // Comissões
        .route(
            "/comissoes",
            post(handlers::comissoes::create_comissao).get(handlers::comissoes::list_comissoes),
        )
        .route("/comissoes/resumo", get(handlers::comissoes::resumo_comissoes))
        .route("/comissoes/{id}/pagar", post(handlers::comissoes::marcar_paga))
        // Modelos de proposta
        .route(
            "/modelos",
            post(handlers::modelos::create_modelo).get(handlers::modelos::list_modelos),
        )
        .route(
            "/modelos/{id}",
            put(handlers::modelos::update_modelo).delete(handlers::modelos::delete_modelo),
        )
        .route(
            "/modelos/{id}/ativo",
            patch(handlers::modelos::set_ativo_modelo),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            admin_guard,
        ));

    // Painel do corretor (exige ficha aprovada)
    let corretor_routes = Router::new()
        .route("/produtos", get(handlers::produtos::list_produtos_disponiveis))
        .route(
            "/propostas",
            post(handlers::propostas::submeter_proposta)
                .get(handlers::propostas::list_minhas_propostas),
        )
        .route(
            "/propostas/{id}",
            get(handlers::propostas::get_minha_proposta),
        )
        .route(
            "/propostas/{id}/ficha",
            get(handlers::propostas::ficha_minha_proposta),
        )
        .route(
            "/comissoes",
            get(handlers::comissoes::list_minhas_comissoes),
        )
        .route(
            "/comissoes/resumo",
            get(handlers::comissoes::resumo_minhas_comissoes),
        )
        .route("/modelos", get(handlers::modelos::list_modelos_ativos))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            corretor_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/publico", publico_routes)
        .route(
            "/api/arquivos/{bucket}/{*chave}",
            get(handlers::arquivos::download),
        )
        .nest("/api/admin", admin_routes)
        .nest("/api/corretor", corretor_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        // Os formulários multipart carregam até 4 documentos digitalizados
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
