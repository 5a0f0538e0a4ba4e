//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use sf_core::domain::entities::user::{NewUser, Role, User, UserPatch};
use sf_core::errors::{AuthError, DomainError};
use sf_core::repositories::UserRepository;

use super::{column, query_error};

const USER_COLUMNS: &str =
    "id, login, password, email, number, name, role, created_at, updated_at";

/// MySQL implementation of UserRepository
///
/// Login uniqueness is enforced by the `uq_users_login` index.
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let role: String = column(row, "role")?;
        Ok(User {
            id: column(row, "id")?,
            login: column(row, "login")?,
            password_hash: column(row, "password")?,
            email: column(row, "email")?,
            number: column(row, "number")?,
            name: column(row, "name")?,
            role: role.parse::<Role>().map_err(DomainError::internal)?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT id FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;
        Ok(row.is_some())
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE login = ?", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (login, password, email, number, name, role)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.login)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(&user.number)
        .bind(&user.name)
        .bind(Role::default().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                tracing::info!(login = %user.login, "Duplicate login rejected by unique index");
                DomainError::Auth(AuthError::UserAlreadyExists)
            }
            other => query_error(other),
        })?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::internal("Inserted user could not be read back"))
    }

    async fn update_fields(&self, id: i64, patch: &UserPatch) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                password = COALESCE(?, password),
                name = COALESCE(?, name),
                email = COALESCE(?, email),
                number = COALESCE(?, number)
            WHERE id = ?
            "#,
        )
        .bind(&patch.password_hash)
        .bind(&patch.name)
        .bind(&patch.email)
        .bind(&patch.number)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        // Zero affected rows also happens when nothing changed
        if result.rows_affected() == 0 && !self.exists(id).await? {
            return Err(DomainError::not_found("User"));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let query = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        rows.iter().map(Self::row_to_user).collect()
    }
}
