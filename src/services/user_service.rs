use crate::error::{Error, Result};
use crate::models::user::User;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_user_by_id(&self, user_id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(r#"SELECT * FROM users ORDER BY name"#)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    /// First-use device binding. Compare-and-set so two first-time devices
    /// racing to bind resolve at the store: exactly one write wins, the loser
    /// re-reads and is checked against the winning value.
    ///
    /// Returns the device id the user ends up bound to.
    pub async fn bind_device_if_unset(&self, user_id: Uuid, device_id: &str) -> Result<String> {
        let result = sqlx::query(
            r#"UPDATE users SET device_id = $1, updated_at = NOW()
               WHERE id = $2 AND device_id IS NULL"#,
        )
        .bind(device_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            tracing::info!(%user_id, device_id, "device bound to user");
            return Ok(device_id.to_string());
        }

        let user = self.get_user_by_id(user_id).await?;
        user.device_id
            .ok_or_else(|| Error::Internal("Device binding lost after compare-and-set".to_string()))
    }

    /// Admin-only escape hatch; the next accepted mark re-binds.
    pub async fn reset_device(&self, user_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"UPDATE users SET device_id = NULL, updated_at = NOW() WHERE id = $1"#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("User not found".to_string()));
        }
        tracing::info!(%user_id, "device binding reset by admin");
        Ok(())
    }
}
