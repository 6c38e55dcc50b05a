use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    confirmed: bool,
}

impl UserRow {
    fn into_user(self) -> Result<User, UserError> {
        Ok(User {
            id: self.id,
            email: EmailAddress::new(self.email)?,
            password_hash: self.password_hash,
            confirmed: self.confirmed,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, email: &EmailAddress, password_hash: &str) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, confirmed
            "#,
        )
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserError::EmailAlreadyRegistered(email.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        row.into_user()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, confirmed
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(r.into_user()?)),
            None => Ok(None),
        }
    }

    async fn set_confirmed(&self, email: &str) -> Result<(), UserError> {
        // Idempotent by construction; zero affected rows is not an error
        sqlx::query(
            r#"
            UPDATE users
            SET confirmed = TRUE
            WHERE email = $1
            "#,
        )
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
