//! HTTP-level behavior of the Graylog client against a mock server.

use std::collections::HashMap;

use graylog_configurer::GraylogError;
use graylog_configurer::clients::{GraylogClient, NO_BODY};
use graylog_configurer::models::User;
use serde::{Deserialize, Serialize};
use serde_json::json;
use wiremock::matchers::{basic_auth, body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Serialize, Deserialize)]
struct Testable {
    test: String,
}

#[derive(Debug, Serialize)]
struct Tagged {
    #[serde(rename = "test_tag")]
    test: String,
}

fn client_for(server: &MockServer, password: &str) -> GraylogClient {
    GraylogClient::with_url(server.uri(), password).expect("failed to build client")
}

#[tokio::test]
async fn uses_client_url_method_and_path() {
    let server = MockServer::start().await;

    Mock::given(method("METHOD"))
        .and(path("/path"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    client.call_api("METHOD", "/path", NO_BODY).await.unwrap();
}

#[tokio::test]
async fn sends_fixed_headers_and_basic_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .and(header("X-Requested-By", "graylog-configurer"))
        .and(basic_auth("admin", "password"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "password");
    client.call_api("GET", "/users", NO_BODY).await.unwrap();
}

#[tokio::test]
async fn detects_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server, "wrong");
    let err = client.call_api("GET", "/users", NO_BODY).await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("401 Unauthorized"), "{message}");
    assert!(message.contains("GET"), "{message}");
    assert!(message.contains(&format!("{}/users", server.uri())), "{message}");
}

#[tokio::test]
async fn classifies_by_status_code() {
    for code in [400u16, 403, 404, 409, 500, 503] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(code).set_body_json(json!({"message": "ignored"})))
            .mount(&server)
            .await;

        let client = client_for(&server, "");
        let err = client.call_api("GET", "/users", NO_BODY).await.unwrap_err();

        assert_eq!(err.status().map(|s| s.as_u16()), Some(code));
        assert!(err.to_string().contains(&code.to_string()));
    }

    for code in [200u16, 201, 202, 204] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(code))
            .mount(&server)
            .await;

        let client = client_for(&server, "");
        assert!(client.call_api("GET", "/users", NO_BODY).await.is_ok(), "{code}");
    }
}

#[tokio::test]
async fn ignores_body_when_no_output_requested() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("notJson"))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    assert!(client.call_api("GET", "/users", NO_BODY).await.is_ok());
}

#[tokio::test]
async fn detects_invalid_json_reply() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("notJson"))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let err = client
        .call_api_json::<(), serde_json::Value>("GET", "/users", NO_BODY)
        .await
        .unwrap_err();

    assert!(matches!(err, GraylogError::Decode(_)), "{err:?}");
    assert!(err.to_string().contains("decoding body"));
}

#[tokio::test]
async fn returns_output() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"test":"text"}"#))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let out: Testable = client.call_api_json("GET", "/thing", NO_BODY).await.unwrap();

    assert_eq!(out.test, "text");
}

#[tokio::test]
async fn detects_unencodable_input() {
    let client = GraylogClient::with_url("http://127.0.0.1:1", "").unwrap();

    let mut payload = HashMap::new();
    payload.insert((1u8, 2u8), 3u8);

    let err = client.call_api("POST", "/users", Some(&payload)).await.unwrap_err();
    assert!(matches!(err, GraylogError::Encode(_)), "{err:?}");
}

#[tokio::test]
async fn posts_json_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/things"))
        .and(body_json(json!({"test": "testable"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let payload = Testable {
        test: "testable".to_string(),
    };
    client.call_api("POST", "/things", Some(&payload)).await.unwrap();
}

#[tokio::test]
async fn posting_json_respects_wire_names() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("test_tag"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let payload = Tagged {
        test: "testable".to_string(),
    };
    client.call_api("POST", "/things", Some(&payload)).await.unwrap();
}

#[tokio::test]
async fn reports_transport_failure() {
    // Nothing listens on port 1.
    let client = GraylogClient::with_url("http://127.0.0.1:1", "").unwrap();

    let err = client.api_reachable().await.unwrap_err();
    assert!(matches!(err, GraylogError::Transport(_)), "{err:?}");
    assert!(err.to_string().contains("executing the request"));
}

#[tokio::test]
async fn api_reachable_reads_users_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(basic_auth("admin", "pw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"users": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "pw");
    client.api_reachable().await.unwrap();
}

#[tokio::test]
async fn get_user_decodes_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/jdoe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "5f1b",
            "username": "jdoe",
            "email": "jdoe@example.com",
            "full_name": "John Doe",
            "permissions": [],
            "roles": ["Reader"],
            "external": false
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let user = client.get_user("jdoe").await.unwrap();

    assert_eq!(user.username, "jdoe");
    assert_eq!(user.roles, vec!["Reader"]);
    assert!(!user.is_admin());
}

#[tokio::test]
async fn get_missing_user_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let err = client.get_user("ghost").await.unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn create_user_posts_admin_record() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(|req: &wiremock::Request| {
            let Ok(user) = req.body_json::<User>() else {
                return false;
            };
            user.username == "newbie"
                && user.full_name == "newbie"
                && user.email == "newbie@utilitywarehouse.co.uk"
                && user.roles == vec!["Admin".to_string()]
                && user.permissions.is_empty()
                && user.password.len() == 40
        })
        .respond_with(ResponseTemplate::new(201).set_body_string("not the record"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let user = client.create_user("newbie").await.unwrap();

    assert_eq!(user.username, "newbie");
    assert!(user.is_admin());
}

#[tokio::test]
async fn edit_user_replaces_full_record() {
    let server = MockServer::start().await;

    let user = User {
        email: "changed".to_string(),
        full_name: "Edit Me".to_string(),
        password: String::new(),
        permissions: vec![],
        roles: vec!["Reader".to_string()],
        username: "edit".to_string(),
    };

    Mock::given(method("PUT"))
        .and(path("/users/edit"))
        .and(body_json(json!({
            "email": "changed",
            "full_name": "Edit Me",
            "password": "",
            "permissions": [],
            "roles": ["Reader"],
            "username": "edit"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    client.edit_user(&user).await.unwrap();
}

#[tokio::test]
async fn delete_user_issues_delete() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/users/gone"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    client.delete_user("gone").await.unwrap();
}
