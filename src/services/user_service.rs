use crate::entities::user_entity as users;
use crate::error::AppResult;
use crate::models::*;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Registered accounts, oldest first.
    pub async fn list_users(&self, actor: &AuthUser) -> AppResult<Vec<UserResponse>> {
        actor.require_admin()?;
        let rows = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(UserResponse::from).collect())
    }
}
