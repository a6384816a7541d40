// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CorretorRepository, UserRepository},
    models::auth::{Claims, User, UserRole},
    models::corretor::Corretor,
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    corretor_repo: CorretorRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        corretor_repo: CorretorRepository,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            corretor_repo,
            jwt_secret,
            pool,
        }
    }

    // Cadastro público de corretor: conta + ficha nascem juntas, na mesma
    // transação. A ficha começa 'pendente' e o painel fica bloqueado até o
    // admin aprovar. E-mail duplicado é barrado pela constraint do banco.
    pub async fn register_corretor(
        &self,
        nome: &str,
        email: &str,
        password: &str,
        whatsapp: &str,
        estado: &str,
    ) -> Result<(String, Corretor), AppError> {
        // 1. Hashing (fora da transação, não toca no banco)
        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        // 2. Cria a conta de acesso
        let new_user = self
            .user_repo
            .create_user(&mut *tx, email, &hashed_password, UserRole::Corretor)
            .await?;

        // 3. Cria a ficha do corretor. Se falhar, a conta criada acima é
        // desfeita no rollback.
        let corretor = self
            .corretor_repo
            .create(&mut *tx, new_user.id, nome, email, whatsapp, estado)
            .await?;

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!("🆕 Corretor cadastrado (pendente): {}", corretor.email);

        let token = self.create_token(new_user.id)?;
        Ok((token, corretor))
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(user.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
