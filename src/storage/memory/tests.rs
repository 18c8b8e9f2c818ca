use super::*;

fn new_user(email: &str, name: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: "hash".to_string(),
        name: name.to_string(),
    }
}

fn new_role(name: &str) -> CreateRoleRequest {
    CreateRoleRequest {
        role_name: name.to_string(),
        description: String::new(),
    }
}

fn new_permission(resource: &str, action: &str) -> CreatePermissionRequest {
    CreatePermissionRequest {
        permission_name: format!("{}.{}", resource, action),
        resource: resource.to_string(),
        action: action.to_string(),
        description: String::new(),
    }
}

#[tokio::test]
async fn test_ids_are_sequential() {
    let store = MemoryStore::new();
    let a = store.create_user(new_user("a@example.com", "A")).await.unwrap();
    let b = store.create_user(new_user("b@example.com", "B")).await.unwrap();
    assert_eq!(a.id, 1);
    assert_eq!(b.id, 2);
}

#[tokio::test]
async fn test_duplicate_email_is_constraint_violation() {
    let store = MemoryStore::new();
    store.create_user(new_user("a@example.com", "A")).await.unwrap();
    let err = store
        .create_user(new_user("a@example.com", "Other"))
        .await
        .unwrap_err();
    assert!(err.is_infrastructure());
}

#[tokio::test]
async fn test_assign_is_idempotent() {
    let store = MemoryStore::new();
    let user = store.create_user(new_user("a@example.com", "A")).await.unwrap();
    let role = store.create_role(new_role("editor")).await.unwrap();

    store.assign_role(user.id, role.id).await.unwrap();
    store.assign_role(user.id, role.id).await.unwrap();

    assert_eq!(store.roles_of_user(user.id).await.unwrap().len(), 1);
    assert!(store.revoke_role(user.id, role.id).await.unwrap());
    assert!(!store.revoke_role(user.id, role.id).await.unwrap());
}

#[tokio::test]
async fn test_assign_to_missing_role_writes_nothing() {
    let store = MemoryStore::new();
    let user = store.create_user(new_user("a@example.com", "A")).await.unwrap();

    assert!(store.assign_role(user.id, 999).await.is_err());
    assert!(store.roles_of_user(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_role_cascades_both_edge_sets() {
    let store = MemoryStore::new();
    let user = store.create_user(new_user("a@example.com", "A")).await.unwrap();
    let role = store.create_role(new_role("editor")).await.unwrap();
    let permission = store
        .create_permission(new_permission("articles", "publish"))
        .await
        .unwrap();
    store.assign_role(user.id, role.id).await.unwrap();
    store.assign_permission(role.id, permission.id).await.unwrap();

    assert!(store.delete_role(role.id).await.unwrap());

    assert!(store.roles_of_user(user.id).await.unwrap().is_empty());
    assert!(store.roles_of_permission(permission.id).await.unwrap().is_empty());
    assert!(!store.delete_role(role.id).await.unwrap());
}

#[tokio::test]
async fn test_effective_permissions_are_deduplicated_and_ordered() {
    let store = MemoryStore::new();
    let user = store.create_user(new_user("a@example.com", "A")).await.unwrap();
    let writer = store.create_role(new_role("writer")).await.unwrap();
    let reviewer = store.create_role(new_role("reviewer")).await.unwrap();
    let read = store
        .create_permission(new_permission("articles", "read"))
        .await
        .unwrap();
    let edit = store
        .create_permission(new_permission("articles", "edit"))
        .await
        .unwrap();
    let comment = store
        .create_permission(new_permission("comments", "approve"))
        .await
        .unwrap();

    store.assign_permission(writer.id, read.id).await.unwrap();
    store.assign_permission(writer.id, edit.id).await.unwrap();
    store.assign_permission(reviewer.id, read.id).await.unwrap();
    store.assign_permission(reviewer.id, comment.id).await.unwrap();
    store.assign_role(user.id, writer.id).await.unwrap();
    store.assign_role(user.id, reviewer.id).await.unwrap();

    let names: Vec<String> = store
        .permissions_of_user(user.id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.permission_name)
        .collect();
    assert_eq!(names, vec!["articles.edit", "articles.read", "comments.approve"]);
}

#[tokio::test]
async fn test_users_of_role_strips_hash() {
    let store = MemoryStore::new();
    let user = store.create_user(new_user("a@example.com", "A")).await.unwrap();
    let role = store.create_role(new_role("editor")).await.unwrap();
    store.assign_role(user.id, role.id).await.unwrap();

    let users = store.users_of_role(role.id).await.unwrap();
    assert_eq!(users.len(), 1);
    assert!(users[0].password_hash.is_empty());
}

#[tokio::test]
async fn test_update_permission_checks_pair_uniqueness() {
    let store = MemoryStore::new();
    store
        .create_permission(new_permission("articles", "read"))
        .await
        .unwrap();
    let edit = store
        .create_permission(new_permission("articles", "edit"))
        .await
        .unwrap();

    let clash = UpdatePermissionRequest {
        action: Some("read".to_string()),
        ..Default::default()
    };
    assert!(store.update_permission(edit.id, clash).await.is_err());
    assert!(store.update_permission(404, Default::default()).await.unwrap().is_none());
}
