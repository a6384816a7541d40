// src/services/comissao_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ComissaoRepository, CorretorRepository},
    models::comissao::{Comissao, ComissaoStatus, ResumoComissoes},
};

#[derive(Clone)]
pub struct ComissaoService {
    repo: ComissaoRepository,
    corretor_repo: CorretorRepository,
    pool: sqlx::PgPool,
}

impl ComissaoService {
    pub fn new(
        repo: ComissaoRepository,
        corretor_repo: CorretorRepository,
        pool: sqlx::PgPool,
    ) -> Self {
        Self {
            repo,
            corretor_repo,
            pool,
        }
    }

    // Lançamento manual pelo admin (não vinculado a proposta)
    pub async fn criar_manual(
        &self,
        corretor_id: Uuid,
        descricao: &str,
        valor: Decimal,
        percentual: Option<Decimal>,
        data_prevista: NaiveDate,
    ) -> Result<Comissao, AppError> {
        if valor <= Decimal::ZERO {
            return Err(AppError::InvalidInput(
                "O valor da comissão deve ser positivo.".to_string(),
            ));
        }

        // O corretor precisa existir antes de qualquer gravação
        self.corretor_repo
            .find_by_id(corretor_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Corretor não encontrado.".to_string()))?;

        self.repo
            .create(
                &self.pool,
                corretor_id,
                None,
                descricao,
                valor,
                percentual,
                data_prevista,
            )
            .await
    }

    // pendente -> pago, com a data obrigatória. Sem operação de "despagar".
    pub async fn marcar_paga(
        &self,
        comissao_id: Uuid,
        data_pagamento: NaiveDate,
    ) -> Result<Comissao, AppError> {
        match self.repo.marcar_paga(comissao_id, data_pagamento).await? {
            Some(comissao) => {
                tracing::info!(
                    "💰 Comissão {} paga em {}",
                    comissao.id,
                    data_pagamento
                );
                Ok(comissao)
            }
            None => match self.repo.find_by_id(comissao_id).await? {
                Some(_) => Err(AppError::TransicaoInvalida(
                    "Comissão já foi paga e não pode mudar de status.".to_string(),
                )),
                None => Err(AppError::NotFound("Comissão não encontrada.".to_string())),
            },
        }
    }
}

// Agregação pura exibida nos painéis: totais por status e soma por mês da
// data prevista. Reagregar a mesma lista produz sempre o mesmo resultado.
pub fn resumir(comissoes: &[Comissao]) -> ResumoComissoes {
    let mut total_pendente = Decimal::ZERO;
    let mut total_pago = Decimal::ZERO;
    let mut por_mes: BTreeMap<String, Decimal> = BTreeMap::new();

    for comissao in comissoes {
        match comissao.status {
            ComissaoStatus::Pendente => total_pendente += comissao.valor,
            ComissaoStatus::Pago => total_pago += comissao.valor,
        }

        let entrada = por_mes.entry(chave_mes(comissao.data_prevista)).or_default();
        *entrada += comissao.valor;
    }

    ResumoComissoes {
        total_pendente,
        total_pago,
        por_mes,
    }
}

// "2024-06-01" -> "2024-06"
fn chave_mes(data: NaiveDate) -> String {
    data.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn comissao(valor: Decimal, status: ComissaoStatus, data_prevista: NaiveDate) -> Comissao {
        let agora = Utc::now();
        Comissao {
            id: Uuid::new_v4(),
            corretor_id: Uuid::new_v4(),
            proposta_id: None,
            descricao: "Lançamento manual".to_string(),
            valor,
            percentual: None,
            status,
            data_prevista,
            data_pagamento: None,
            created_at: agora,
            updated_at: agora,
        }
    }

    fn dia(ano: i32, mes: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(ano, mes, dia).unwrap()
    }

    #[test]
    fn totais_particionam_a_soma_geral() {
        let comissoes = vec![
            comissao(Decimal::new(45000, 2), ComissaoStatus::Pendente, dia(2024, 6, 1)),
            comissao(Decimal::new(30000, 2), ComissaoStatus::Pago, dia(2024, 6, 15)),
            comissao(Decimal::new(12550, 2), ComissaoStatus::Pendente, dia(2024, 7, 1)),
        ];

        let resumo = resumir(&comissoes);
        let soma_geral: Decimal = comissoes.iter().map(|c| c.valor).sum();

        assert_eq!(resumo.total_pendente, Decimal::new(57550, 2));
        assert_eq!(resumo.total_pago, Decimal::new(30000, 2));
        assert_eq!(resumo.total_pendente + resumo.total_pago, soma_geral);
    }

    #[test]
    fn reagregacao_e_idempotente() {
        let comissoes = vec![
            comissao(Decimal::new(45000, 2), ComissaoStatus::Pendente, dia(2024, 6, 1)),
            comissao(Decimal::new(30000, 2), ComissaoStatus::Pago, dia(2024, 6, 15)),
        ];

        let primeiro = resumir(&comissoes);
        let segundo = resumir(&comissoes);

        assert_eq!(primeiro.total_pendente, segundo.total_pendente);
        assert_eq!(primeiro.total_pago, segundo.total_pago);
        assert_eq!(primeiro.por_mes, segundo.por_mes);
    }

    #[test]
    fn por_mes_agrupa_pela_data_prevista() {
        let comissoes = vec![
            comissao(Decimal::new(10000, 2), ComissaoStatus::Pendente, dia(2024, 6, 1)),
            comissao(Decimal::new(20000, 2), ComissaoStatus::Pago, dia(2024, 6, 28)),
            comissao(Decimal::new(5000, 2), ComissaoStatus::Pendente, dia(2024, 7, 3)),
        ];

        let resumo = resumir(&comissoes);

        assert_eq!(resumo.por_mes.get("2024-06"), Some(&Decimal::new(30000, 2)));
        assert_eq!(resumo.por_mes.get("2024-07"), Some(&Decimal::new(5000, 2)));
        assert_eq!(resumo.por_mes.len(), 2);
    }

    #[test]
    fn lista_vazia_resulta_em_totais_zerados() {
        let resumo = resumir(&[]);
        assert_eq!(resumo.total_pendente, Decimal::ZERO);
        assert_eq!(resumo.total_pago, Decimal::ZERO);
        assert!(resumo.por_mes.is_empty());
    }

    #[test]
    fn chave_mes_tem_zero_a_esquerda() {
        assert_eq!(chave_mes(dia(2024, 6, 1)), "2024-06");
        assert_eq!(chave_mes(dia(2024, 11, 30)), "2024-11");
    }
}
