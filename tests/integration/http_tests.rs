//! HTTP flows through the full actix application

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use crate::common::fixtures::{ADMIN_EMAIL, PASSWORD, register_request, test_config};
    use actix_web::body::MessageBody;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use rbac_api::server::{AppState, HttpServer};
    use rbac_api::storage::StorageLayer;
    use serde_json::{Value, json};

    /// Status and JSON body, whether the app answered or a middleware rejected
    async fn into_parts<B: MessageBody>(
        result: Result<ServiceResponse<B>, actix_web::Error>,
    ) -> (StatusCode, Value) {
        match result {
            Ok(resp) => {
                let status = resp.status();
                let body = test::read_body(resp).await;
                (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
            }
            Err(err) => {
                let resp = err.error_response();
                let status = resp.status();
                let body = actix_web::body::to_bytes(resp.into_body())
                    .await
                    .unwrap_or_default();
                (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
            }
        }
    }

    macro_rules! send {
        ($app:expr, $req:expr) => {
            into_parts(test::try_call_service(&$app, $req.to_request()).await).await
        };
    }

    fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", token))
    }

    async fn memory_state() -> AppState {
        let state = AppState::new(test_config(), StorageLayer::memory());
        state.rbac.bootstrap().await.unwrap();
        state
    }

    /// Register then log in; evaluates to `(user_id, token)`
    macro_rules! register_and_login {
        ($app:expr, $email:expr, $name:expr) => {{
            let (status, body) = send!(
                $app,
                test::TestRequest::post()
                    .uri("/api/v1/register")
                    .set_json(register_request($email, $name))
            );
            assert_eq!(status, StatusCode::CREATED, "{body}");
            let id = body["data"]["id"].as_i64().unwrap();

            let (status, body) = send!(
                $app,
                test::TestRequest::post()
                    .uri("/api/v1/login")
                    .set_json(json!({"email": $email, "password": PASSWORD}))
            );
            assert_eq!(status, StatusCode::OK, "{body}");
            (id, body["data"]["token"].as_str().unwrap().to_string())
        }};
    }

    #[actix_web::test]
    async fn test_health_reports_backend() {
        let app = test::init_service(HttpServer::create_app(web::Data::new(memory_state().await)))
            .await;

        let (status, body) = send!(app, test::TestRequest::get().uri("/health"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "healthy");
        assert_eq!(body["data"]["storage"]["backend"], "memory");
    }

    #[actix_web::test]
    async fn test_register_login_and_me() {
        let app = test::init_service(HttpServer::create_app(web::Data::new(memory_state().await)))
            .await;

        let (id, token) = register_and_login!(app, "Alice@Example.com", "Alice");

        let (status, body) = send!(
            app,
            test::TestRequest::get()
                .uri("/api/v1/me")
                .insert_header(bearer(&token))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], id);
        assert_eq!(body["data"]["email"], "alice@example.com");
        assert!(body["data"].get("password_hash").is_none());

        let (status, body) = send!(
            app,
            test::TestRequest::put()
                .uri("/api/v1/me")
                .insert_header(bearer(&token))
                .set_json(json!({"name": "Alice Smith"}))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Alice Smith");
    }

    #[actix_web::test]
    async fn test_error_envelopes() {
        let app = test::init_service(HttpServer::create_app(web::Data::new(memory_state().await)))
            .await;
        let (_, token) = register_and_login!(app, "alice@example.com", "Alice");

        // Duplicate registration
        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri("/api/v1/register")
                .set_json(register_request("ALICE@example.com", "Again"))
        );
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
        assert!(body["error"]["request_id"].is_string());

        // Invalid registration body
        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri("/api/v1/register")
                .set_json(json!({"email": "not-an-email", "password": "x", "name": "A"}))
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        // Wrong password
        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({"email": "alice@example.com", "password": "wrong-one"}))
        );
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "AUTH_ERROR");

        // No token
        let (status, body) = send!(app, test::TestRequest::get().uri("/api/v1/me"));
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");

        // Lacking the permission
        let (status, body) = send!(
            app,
            test::TestRequest::get()
                .uri("/api/v1/users")
                .insert_header(bearer(&token))
        );
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "FORBIDDEN");

        // Lacking the admin role
        let (status, _) = send!(
            app,
            test::TestRequest::get()
                .uri("/api/v1/roles")
                .insert_header(bearer(&token))
        );
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_admin_grants_editor_permission() {
        let app = test::init_service(HttpServer::create_app(web::Data::new(memory_state().await)))
            .await;
        let (_, admin) = register_and_login!(app, ADMIN_EMAIL, "Root");
        let (alice_id, alice) = register_and_login!(app, "alice@example.com", "Alice");

        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri("/api/v1/roles")
                .insert_header(bearer(&admin))
                .set_json(json!({"role_name": " Editor ", "description": "Edits articles"}))
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["data"]["role_name"], "editor");
        let editor_id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri("/api/v1/permissions")
                .insert_header(bearer(&admin))
                .set_json(json!({
                    "permission_name": "articles.publish",
                    "resource": "articles",
                    "action": "publish"
                }))
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let publish_id = body["data"]["id"].as_i64().unwrap();

        let (status, _) = send!(
            app,
            test::TestRequest::post()
                .uri("/api/v1/rbac/role-permissions")
                .insert_header(bearer(&admin))
                .set_json(json!({"role_id": editor_id, "permission_id": publish_id}))
        );
        assert_eq!(status, StatusCode::OK);

        // Assigning twice is still success
        for _ in 0..2 {
            let (status, _) = send!(
                app,
                test::TestRequest::post()
                    .uri("/api/v1/rbac/user-roles")
                    .insert_header(bearer(&admin))
                    .set_json(json!({"user_id": alice_id, "role_id": editor_id}))
            );
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = send!(
            app,
            test::TestRequest::get()
                .uri("/api/v1/me/permissions")
                .insert_header(bearer(&alice))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["permissions"][0]["permission_name"], "articles.publish");
        assert_eq!(body["data"]["permissions"].as_array().unwrap().len(), 1);

        let (status, body) = send!(
            app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/roles/{}/users", editor_id))
                .insert_header(bearer(&admin))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["users"].as_array().unwrap().len(), 1);

        let revoke = format!("/api/v1/rbac/users/{}/roles/{}", alice_id, editor_id);
        let (status, _) = send!(
            app,
            test::TestRequest::delete()
                .uri(&revoke)
                .insert_header(bearer(&admin))
        );
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send!(
            app,
            test::TestRequest::delete()
                .uri(&revoke)
                .insert_header(bearer(&admin))
        );
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[actix_web::test]
    async fn test_user_administration_on_sqlite() {
        let db = TestDatabase::new().await;
        let state = AppState::new(test_config(), db.storage());
        state.rbac.bootstrap().await.unwrap();
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let (_, admin) = register_and_login!(app, ADMIN_EMAIL, "Root");
        let (bob_id, _) = register_and_login!(app, "bob@example.com", "Bob");

        let (status, body) = send!(
            app,
            test::TestRequest::get()
                .uri("/api/v1/users")
                .insert_header(bearer(&admin))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let (status, body) = send!(
            app,
            test::TestRequest::get()
                .uri("/api/v1/roles/999")
                .insert_header(bearer(&admin))
        );
        assert_eq!(status, StatusCode::NOT_FOUND, "{body}");

        let (status, body) = send!(
            app,
            test::TestRequest::get()
                .uri("/api/v1/users/abc")
                .insert_header(bearer(&admin))
        );
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(body["error"]["code"], "BAD_REQUEST");

        let (status, _) = send!(
            app,
            test::TestRequest::delete()
                .uri(&format!("/api/v1/users/{}", bob_id))
                .insert_header(bearer(&admin))
        );
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send!(
            app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/users/{}", bob_id))
                .insert_header(bearer(&admin))
        );
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
