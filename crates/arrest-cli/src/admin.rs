use arrest_auth::roles;
use arrest_core::hash_password;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("a user with that username or email already exists")]
    AlreadyExists,

    #[error("password must be at least 8 characters")]
    WeakPassword,

    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Creates a verified user holding the `ADMIN` role.
pub async fn create_admin(
    pool: &PgPool,
    username: &str,
    email: &str,
    password: &str,
) -> Result<Uuid, AdminError> {
    if password.len() < 8 {
        return Err(AdminError::WeakPassword);
    }

    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
    )
    .bind(username)
    .bind(email)
    .fetch_one(pool)
    .await?;

    if exists {
        return Err(AdminError::AlreadyExists);
    }

    let hashed = hash_password(password).map_err(|e| AdminError::Hash(e.error.to_string()))?;
    let id = Uuid::new_v4();

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO users (id, username, email, password, verified) VALUES ($1, $2, $3, $4, true)",
    )
    .bind(id)
    .bind(username)
    .bind(email)
    .bind(&hashed)
    .execute(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2)")
        .bind(id)
        .bind(roles::ADMIN)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires PostgreSQL"]
    async fn test_create_admin(pool: PgPool) {
        let id = create_admin(&pool, "root", "root@example.com", "password123")
            .await
            .unwrap();

        let roles: Vec<String> =
            sqlx::query_scalar("SELECT role FROM user_roles WHERE user_id = $1")
                .bind(id)
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(roles, vec!["ADMIN".to_string()]);

        let err = create_admin(&pool, "root", "other@example.com", "password123")
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::AlreadyExists));
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires PostgreSQL"]
    async fn test_short_password_rejected(pool: PgPool) {
        let err = create_admin(&pool, "root", "root@example.com", "short")
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::WeakPassword));
    }
}
