//! Postgres implementation of the user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::error::ErrorKind;
use sqlx::PgPool;
use uuid::Uuid;

use gf_core::domain::entities::user::{Role, User};
use gf_core::errors::DomainError;
use gf_core::repositories::UserRepository;

/// Persistence row for the `users` table
///
/// Kept separate from the domain entity so the port never leaks the storage
/// representation; the role travels as text and is parsed on the way out.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row.role.parse::<Role>().map_err(|e| DomainError::Internal {
            message: format!("corrupt role in users table: {}", e),
        })?;

        Ok(User {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            password_hash: row.password_hash,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Postgres-backed user repository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_by_column(
        &self,
        query: &'static str,
        bind: &str,
    ) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(query)
            .bind(bind)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(User::try_from).transpose()
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, first_name, last_name, email, phone, password_hash, role, \
             created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_by_column(
            "SELECT id, first_name, last_name, email, phone, password_hash, role, \
             created_at, updated_at FROM users WHERE email = $1",
            email,
        )
        .await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        self.find_by_column(
            "SELECT id, first_name, last_name, email, phone, password_hash, role, \
             created_at, updated_at FROM users WHERE phone = $1",
            phone,
        )
        .await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            "INSERT INTO users \
             (id, first_name, last_name, email, phone, password_hash, role, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let result = sqlx::query(
            "UPDATE users SET first_name = $2, last_name = $3, email = $4, phone = $5, \
             password_hash = $6, role = $7, updated_at = $8 WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        Ok(user)
    }
}

/// Map sqlx failures onto the domain taxonomy
///
/// Unique violations surface as conflicts on the offending column; everything
/// else is a transient infrastructure failure for the caller to retry.
fn map_sqlx_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.kind() == ErrorKind::UniqueViolation {
            let field = match db_err.constraint() {
                Some(name) if name.contains("email") => "email",
                Some(name) if name.contains("phone") => "phone",
                _ => "record",
            };
            return DomainError::conflict(field);
        }
    }

    DomainError::Infrastructure {
        message: format!("database error: {}", err),
    }
}
