//! RBAC properties, checked against the in-memory store and SQLite

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use crate::common::fixtures::{permission, rbac_system, role, user};
    use crate::{assert_api_err, assert_ok};
    use rbac_api::RbacSystem;
    use rbac_api::core::models::CreateRoleRequest;
    use rbac_api::storage::Repositories;

    async fn backends() -> Vec<(&'static str, RbacSystem)> {
        let db = TestDatabase::new().await;
        vec![
            ("memory", rbac_system(&Repositories::in_memory())),
            ("sqlite", rbac_system(&db.repositories())),
        ]
    }

    #[tokio::test]
    async fn test_assign_role_grants_membership_once() {
        for (backend, rbac) in backends().await {
            let alice = user(&rbac, "alice@example.com").await;
            let editor = role(&rbac, "editor").await;

            assert_ok!(rbac.assignments.assign_role(alice.id, editor.id).await);
            assert_ok!(rbac.assignments.assign_role(alice.id, editor.id).await);

            assert!(
                assert_ok!(rbac.evaluator.has_role(alice.id, "editor").await),
                "{backend}"
            );
            let roles = assert_ok!(rbac.assignments.roles_of(alice.id).await);
            assert_eq!(roles.len(), 1, "{backend}");
        }
    }

    #[tokio::test]
    async fn test_revoke_role() {
        for (backend, rbac) in backends().await {
            let alice = user(&rbac, "alice@example.com").await;
            let editor = role(&rbac, "editor").await;

            assert_api_err!(rbac.assignments.revoke_role(alice.id, editor.id).await, NotFound);

            assert_ok!(rbac.assignments.assign_role(alice.id, editor.id).await);
            assert_ok!(rbac.assignments.revoke_role(alice.id, editor.id).await);
            assert!(
                !assert_ok!(rbac.evaluator.has_role(alice.id, "editor").await),
                "{backend}"
            );
        }
    }

    #[tokio::test]
    async fn test_effective_permissions_deduplicated() {
        for (backend, rbac) in backends().await {
            let alice = user(&rbac, "alice@example.com").await;
            let writer = role(&rbac, "writer").await;
            let reviewer = role(&rbac, "reviewer").await;
            let shared = permission(&rbac, "articles", "read").await;
            let write = permission(&rbac, "articles", "write").await;
            let approve = permission(&rbac, "articles", "approve").await;

            for (r, p) in [
                (writer.id, shared.id),
                (writer.id, write.id),
                (reviewer.id, shared.id),
                (reviewer.id, approve.id),
            ] {
                assert_ok!(rbac.assignments.assign_permission(r, p).await);
            }
            assert_ok!(rbac.assignments.assign_role(alice.id, writer.id).await);
            assert_ok!(rbac.assignments.assign_role(alice.id, reviewer.id).await);

            let effective = assert_ok!(rbac.assignments.permissions_of_user(alice.id).await);
            let names: Vec<&str> = effective
                .iter()
                .map(|p| p.permission_name.as_str())
                .collect();
            assert_eq!(
                names,
                vec!["articles.approve", "articles.read", "articles.write"],
                "{backend}"
            );
        }
    }

    #[tokio::test]
    async fn test_delete_role_cascades() {
        for (backend, rbac) in backends().await {
            let alice = user(&rbac, "alice@example.com").await;
            let editor = role(&rbac, "editor").await;
            let publish = permission(&rbac, "articles", "publish").await;
            assert_ok!(rbac.assignments.assign_role(alice.id, editor.id).await);
            assert_ok!(rbac.assignments.assign_permission(editor.id, publish.id).await);

            assert_ok!(rbac.roles.delete(editor.id).await);

            assert_api_err!(rbac.assignments.permissions_of_role(editor.id).await, NotFound);
            let remaining = assert_ok!(rbac.assignments.roles_of(alice.id).await);
            assert!(remaining.is_empty(), "{backend}");
            let holders = assert_ok!(rbac.permissions.roles_of(publish.id).await);
            assert!(holders.is_empty(), "{backend}");
        }
    }

    #[tokio::test]
    async fn test_role_name_conflict_after_normalization() {
        for (backend, rbac) in backends().await {
            let admin = role(&rbac, " Admin ").await;
            assert_eq!(admin.role_name, "admin", "{backend}");

            let duplicate = rbac
                .roles
                .create(CreateRoleRequest {
                    role_name: "admin".to_string(),
                    description: String::new(),
                })
                .await;
            assert_api_err!(duplicate, Conflict);
        }
    }

    #[tokio::test]
    async fn test_editor_can_publish_until_revoked() {
        for (backend, rbac) in backends().await {
            let alice = user(&rbac, "alice@example.com").await;
            let editor = role(&rbac, "editor").await;
            let publish = permission(&rbac, "articles", "publish").await;

            assert_ok!(rbac.assignments.assign_permission(editor.id, publish.id).await);
            assert_ok!(rbac.assignments.assign_role(alice.id, editor.id).await);

            assert!(
                assert_ok!(rbac.evaluator.has_permission(alice.id, "articles.publish").await),
                "{backend}"
            );

            assert_ok!(rbac.assignments.revoke_permission(editor.id, publish.id).await);
            assert!(
                !assert_ok!(rbac.evaluator.has_permission(alice.id, "articles.publish").await),
                "{backend}"
            );
            assert!(
                assert_ok!(rbac.evaluator.has_role(alice.id, "editor").await),
                "{backend}"
            );
        }
    }

    #[tokio::test]
    async fn test_assign_missing_role_leaves_no_edge() {
        for (backend, rbac) in backends().await {
            let alice = user(&rbac, "alice@example.com").await;

            assert_api_err!(rbac.assignments.assign_role(alice.id, 999).await, NotFound);

            let roles = assert_ok!(rbac.assignments.roles_of(alice.id).await);
            assert!(roles.is_empty(), "{backend}");
        }
    }

    #[tokio::test]
    async fn test_delete_user_cascades() {
        for (backend, rbac) in backends().await {
            let alice = user(&rbac, "alice@example.com").await;
            let editor = role(&rbac, "editor").await;
            assert_ok!(rbac.assignments.assign_role(alice.id, editor.id).await);

            assert_ok!(rbac.directory.delete(alice.id).await);

            let members = assert_ok!(rbac.assignments.users_of_role(editor.id).await);
            assert!(members.is_empty(), "{backend}");
            assert!(
                !assert_ok!(rbac.evaluator.has_role(alice.id, "editor").await),
                "{backend}"
            );
        }
    }

    #[tokio::test]
    async fn test_bootstrap_twice() {
        for (backend, rbac) in backends().await {
            let first = assert_ok!(rbac.bootstrap().await);
            let second = assert_ok!(rbac.bootstrap().await);
            assert_eq!(first.id, second.id, "{backend}");

            let granted = assert_ok!(rbac.assignments.permissions_of_role(first.id).await);
            assert_eq!(granted.len(), 3, "{backend}");
        }
    }
}
