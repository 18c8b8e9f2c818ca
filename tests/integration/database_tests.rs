//! Database integration tests
//!
//! Storage-level behavior of the sea-orm backend on in-memory SQLite.

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::TestDatabase;
    use crate::common::database::test_db_config;
    use rbac_api::core::models::{CreatePermissionRequest, CreateRoleRequest, NewUser};
    use rbac_api::core::traits::{
        PermissionRepository, RbacRepository, RoleRepository, UserRepository,
    };
    use rbac_api::storage::StorageLayer;
    use rbac_api::storage::database::Database;

    #[tokio::test]
    async fn test_database_health_check() {
        let db = TestDatabase::new().await;
        assert_ok!(db.db().health_check().await);
    }

    #[tokio::test]
    async fn test_migrations_are_rerunnable() {
        let db = assert_ok!(Database::new(&test_db_config()).await);
        assert_ok!(db.migrate().await);
        assert_ok!(db.migrate().await);
    }

    #[tokio::test]
    async fn test_storage_layer_reports_backend() {
        let db = TestDatabase::new().await;
        let storage = db.storage();
        assert_eq!(storage.backend_name(), "sqlite");
        assert_ok!(storage.health_check().await);

        assert_eq!(StorageLayer::memory().backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_unique_email_enforced_by_schema() {
        let db = TestDatabase::new().await;
        let store = db.db();

        let new_user = NewUser {
            email: "dup@example.com".to_string(),
            password_hash: "hash".to_string(),
            name: "Dup".to_string(),
        };
        assert_ok!(store.create_user(new_user.clone()).await);

        // Bypassing the directory pre-check hits the constraint
        let err = store.create_user(new_user).await.unwrap_err();
        assert!(err.is_infrastructure());
    }

    #[tokio::test]
    async fn test_duplicate_edge_insert_is_ignored() {
        let db = TestDatabase::new().await;
        let store = db.db();

        let user = assert_ok!(
            store
                .create_user(NewUser {
                    email: "edge@example.com".to_string(),
                    password_hash: "hash".to_string(),
                    name: "Edge".to_string(),
                })
                .await
        );
        let role = assert_ok!(
            store
                .create_role(CreateRoleRequest {
                    role_name: "editor".to_string(),
                    description: String::new(),
                })
                .await
        );

        assert_ok!(store.assign_role(user.id, role.id).await);
        assert_ok!(store.assign_role(user.id, role.id).await);

        assert_eq!(assert_ok!(store.roles_of_user(user.id).await).len(), 1);
        assert!(assert_ok!(store.revoke_role(user.id, role.id).await));
        assert!(!assert_ok!(store.revoke_role(user.id, role.id).await));
    }

    #[tokio::test]
    async fn test_delete_permission_removes_grants() {
        let db = TestDatabase::new().await;
        let store = db.db();

        let role = assert_ok!(
            store
                .create_role(CreateRoleRequest {
                    role_name: "editor".to_string(),
                    description: String::new(),
                })
                .await
        );
        let permission = assert_ok!(
            store
                .create_permission(CreatePermissionRequest {
                    permission_name: "articles.publish".to_string(),
                    resource: "articles".to_string(),
                    action: "publish".to_string(),
                    description: String::new(),
                })
                .await
        );
        assert_ok!(store.assign_permission(role.id, permission.id).await);

        assert!(assert_ok!(store.delete_permission(permission.id).await));
        assert!(!assert_ok!(store.delete_permission(permission.id).await));
        assert!(assert_ok!(store.permissions_of_role(role.id).await).is_empty());
        assert!(assert_ok!(store.find_role(role.id).await).is_some());
    }
}
