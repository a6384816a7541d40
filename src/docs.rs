// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Público ---
        handlers::publico::list_planos,
        handlers::publico::create_cotacao,
        handlers::publico::get_cotacao,
        handlers::publico::create_lead,
        handlers::publico::create_proposta_direta,

        // --- Corretores (admin) ---
        handlers::corretores::list_corretores,
        handlers::corretores::update_corretor,
        handlers::corretores::set_status_corretor,
        handlers::corretores::delete_corretor,

        // --- Produtos ---
        handlers::produtos::create_produto,
        handlers::produtos::list_produtos,
        handlers::produtos::list_produtos_disponiveis,
        handlers::produtos::update_produto,
        handlers::produtos::set_disponibilidade,
        handlers::produtos::delete_produto,

        // --- Planos e preços ---
        handlers::planos::create_plano,
        handlers::planos::list_planos,
        handlers::planos::get_plano_com_precos,
        handlers::planos::update_plano,
        handlers::planos::set_ativo_plano,
        handlers::planos::delete_plano,
        handlers::planos::upsert_preco,
        handlers::planos::delete_preco,
        handlers::planos::create_tabela,
        handlers::planos::list_tabelas,
        handlers::planos::update_tabela,
        handlers::planos::delete_tabela,

        // --- Leads ---
        handlers::leads::list_leads,
        handlers::leads::set_status_lead,
        handlers::leads::delete_lead,

        // --- Propostas ---
        handlers::propostas::submeter_proposta,
        handlers::propostas::list_minhas_propostas,
        handlers::propostas::get_minha_proposta,
        handlers::propostas::list_propostas_admin,
        handlers::propostas::get_proposta_admin,
        handlers::propostas::aprovar_proposta,
        handlers::propostas::rejeitar_proposta,
        handlers::propostas::list_propostas_diretas,
        handlers::propostas::aprovar_proposta_direta,
        handlers::propostas::rejeitar_proposta_direta,

        // --- Comissões ---
        handlers::comissoes::list_comissoes,
        handlers::comissoes::create_comissao,
        handlers::comissoes::marcar_paga,
        handlers::comissoes::resumo_comissoes,
        handlers::comissoes::list_minhas_comissoes,
        handlers::comissoes::resumo_minhas_comissoes,

        // --- Modelos ---
        handlers::modelos::create_modelo,
        handlers::modelos::list_modelos,
        handlers::modelos::list_modelos_ativos,
        handlers::modelos::update_modelo,
        handlers::modelos::set_ativo_modelo,
        handlers::modelos::delete_modelo,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterCorretorPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::MeResponse,

            // --- Corretores ---
            models::corretor::CorretorStatus,
            models::corretor::Corretor,
            handlers::corretores::UpdateCorretorPayload,
            handlers::corretores::SetStatusPayload,

            // --- Produtos ---
            models::produto::Produto,
            handlers::produtos::CreateProdutoPayload,
            handlers::produtos::UpdateProdutoPayload,
            handlers::produtos::SetDisponibilidadePayload,

            // --- Planos ---
            models::plano::Plano,
            models::plano::PrecoPlano,
            models::plano::PlanoComPrecos,
            models::plano::TabelaPrecos,
            models::plano::FaixaPreco,
            handlers::planos::CreatePlanoPayload,
            handlers::planos::UpdatePlanoPayload,
            handlers::planos::SetAtivoPayload,
            handlers::planos::UpsertPrecoPayload,
            handlers::planos::CreateTabelaPayload,
            handlers::planos::UpdateTabelaPayload,

            // --- Leads ---
            models::lead::LeadStatus,
            models::lead::Lead,
            handlers::leads::SetStatusLeadPayload,

            // --- Público ---
            models::cotacao::Cotacao,
            handlers::publico::CreateCotacaoPayload,
            handlers::publico::CreateLeadPayload,
            handlers::publico::CreatePropostaDiretaPayload,

            // --- Propostas ---
            models::proposta::PropostaStatus,
            models::proposta::DocumentoTipo,
            models::proposta::PropostaCorretor,
            models::proposta::PropostaCorretorComNome,
            models::proposta::PropostaDireta,
            models::proposta::DocumentoProposta,
            handlers::propostas::PropostaDetalheResponse,
            handlers::propostas::RejeitarPayload,

            // --- Comissões ---
            models::comissao::ComissaoStatus,
            models::comissao::Comissao,
            models::comissao::ResumoComissoes,
            handlers::comissoes::CreateComissaoPayload,
            handlers::comissoes::MarcarPagaPayload,

            // --- Modelos ---
            models::modelo::ModeloProposta,
            handlers::modelos::UpdateModeloPayload,
            handlers::modelos::SetAtivoModeloPayload,
        )
    ),
    tags(
        (name = "Público", description = "Cotação, captação de leads e canal direto"),
        (name = "Corretores", description = "Gestão e aprovação de corretores"),
        (name = "Produtos", description = "Produtos ofertados aos corretores"),
        (name = "Planos", description = "Planos, faixas de preço e tabelas de referência"),
        (name = "Leads", description = "Leads capturados no site"),
        (name = "Propostas", description = "Ciclo de vida das propostas (corretor e direto)"),
        (name = "Comissões", description = "Acúmulo e pagamento de comissões"),
        (name = "Modelos", description = "Modelos de proposta para os corretores")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
