use crate::core::models::{Permission, Role, User};
use crate::core::traits::RbacRepository;
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use sea_orm::sea_query::{OnConflict, Query, SelectStatement};
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, permission, role, role_permission, user, user_role};
use super::types::SeaOrmDatabase;

/// `SELECT role_id FROM user_roles WHERE user_id = ?`
fn held_role_ids(user_id: i32) -> SelectStatement {
    Query::select()
        .column(user_role::Column::RoleId)
        .from(user_role::Entity)
        .and_where(user_role::Column::UserId.eq(user_id))
        .to_owned()
}

/// Ids of every permission granted by any role the user holds
fn effective_permission_ids(user_id: i32) -> SelectStatement {
    Query::select()
        .column(role_permission::Column::PermissionId)
        .from(role_permission::Entity)
        .and_where(role_permission::Column::RoleId.in_subquery(held_role_ids(user_id)))
        .to_owned()
}

#[async_trait]
impl RbacRepository for SeaOrmDatabase {
    async fn assign_role(&self, user_id: i32, role_id: i32) -> Result<()> {
        debug!("Assigning role {} to user {}", role_id, user_id);

        let edge = user_role::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role_id),
            assigned_at: Set(chrono::Utc::now().into()),
        };

        entities::UserRole::insert(edge)
            .on_conflict(
                OnConflict::columns([user_role::Column::UserId, user_role::Column::RoleId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(())
    }

    async fn revoke_role(&self, user_id: i32, role_id: i32) -> Result<bool> {
        debug!("Revoking role {} from user {}", role_id, user_id);

        let result = entities::UserRole::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .filter(user_role::Column::RoleId.eq(role_id))
            .exec(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(result.rows_affected > 0)
    }

    async fn assign_permission(&self, role_id: i32, permission_id: i32) -> Result<()> {
        debug!("Assigning permission {} to role {}", permission_id, role_id);

        let edge = role_permission::ActiveModel {
            role_id: Set(role_id),
            permission_id: Set(permission_id),
            assigned_at: Set(chrono::Utc::now().into()),
        };

        entities::RolePermission::insert(edge)
            .on_conflict(
                OnConflict::columns([
                    role_permission::Column::RoleId,
                    role_permission::Column::PermissionId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(())
    }

    async fn revoke_permission(&self, role_id: i32, permission_id: i32) -> Result<bool> {
        debug!("Revoking permission {} from role {}", permission_id, role_id);

        let result = entities::RolePermission::delete_many()
            .filter(role_permission::Column::RoleId.eq(role_id))
            .filter(role_permission::Column::PermissionId.eq(permission_id))
            .exec(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(result.rows_affected > 0)
    }

    async fn roles_of_user(&self, user_id: i32) -> Result<Vec<Role>> {
        debug!("Loading roles of user {}", user_id);

        let models = entities::Role::find()
            .inner_join(entities::UserRole)
            .filter(user_role::Column::UserId.eq(user_id))
            .order_by_asc(role::Column::RoleName)
            .all(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn permissions_of_role(&self, role_id: i32) -> Result<Vec<Permission>> {
        debug!("Loading permissions of role {}", role_id);

        let models = entities::Permission::find()
            .inner_join(entities::RolePermission)
            .filter(role_permission::Column::RoleId.eq(role_id))
            .order_by_asc(permission::Column::Resource)
            .order_by_asc(permission::Column::Action)
            .all(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn permissions_of_user(&self, user_id: i32) -> Result<Vec<Permission>> {
        debug!("Loading effective permissions of user {}", user_id);

        // The subquery keeps each permission row once, however many roles grant it
        let models = entities::Permission::find()
            .filter(permission::Column::Id.in_subquery(effective_permission_ids(user_id)))
            .order_by_asc(permission::Column::Resource)
            .order_by_asc(permission::Column::Action)
            .all(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn users_of_role(&self, role_id: i32) -> Result<Vec<User>> {
        debug!("Loading users of role {}", role_id);

        let models = entities::User::find()
            .inner_join(entities::UserRole)
            .filter(user_role::Column::RoleId.eq(role_id))
            .order_by_asc(user::Column::Name)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(models
            .into_iter()
            .map(|model| User::from(model).sanitized())
            .collect())
    }

    async fn roles_of_permission(&self, permission_id: i32) -> Result<Vec<Role>> {
        debug!("Loading roles granting permission {}", permission_id);

        let models = entities::Role::find()
            .inner_join(entities::RolePermission)
            .filter(role_permission::Column::PermissionId.eq(permission_id))
            .order_by_asc(role::Column::RoleName)
            .all(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn user_has_role(&self, user_id: i32, role_name: &str) -> Result<bool> {
        debug!("Checking role '{}' for user {}", role_name, user_id);

        let count = entities::Role::find()
            .inner_join(entities::UserRole)
            .filter(user_role::Column::UserId.eq(user_id))
            .filter(role::Column::RoleName.eq(role_name))
            .count(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(count > 0)
    }

    async fn user_has_permission(&self, user_id: i32, permission_name: &str) -> Result<bool> {
        debug!(
            "Checking permission '{}' for user {}",
            permission_name, user_id
        );

        let count = entities::Permission::find()
            .filter(permission::Column::PermissionName.eq(permission_name))
            .filter(permission::Column::Id.in_subquery(effective_permission_ids(user_id)))
            .count(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(count > 0)
    }
}
