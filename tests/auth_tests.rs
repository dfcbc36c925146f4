use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use clarke_client::auth::Role;
use clarke_client::config::ClientOptions;
use clarke_client::error::Error;
use clarke_client::Clarke;

fn user_login_body() -> serde_json::Value {
    json!({
        "data": {
            "loginUser": {
                "user": {
                    "id": "u1",
                    "name": "Maria Silva",
                    "email": "maria@example.com",
                    "cpf": "52998224725"
                },
                "token": "user-token"
            }
        }
    })
}

fn supplier_login_body() -> serde_json::Value {
    json!({
        "data": {
            "loginSupplier": {
                "supplier": {
                    "id": 7,
                    "name": "Acme Energia",
                    "email": "contact@acme.com.br",
                    "logo": "https://acme.com.br/logo.png",
                    "state_origin": "SP",
                    "cost_per_kWh": 0.75,
                    "min_kWh_limit": 100.0,
                    "total_clients": 12,
                    "avg_rating": 4.2
                },
                "token": "supplier-token"
            }
        }
    })
}

fn client_for(server: &MockServer, dir: &tempfile::TempDir) -> Clarke {
    let options = ClientOptions::default().with_session_path(dir.path().join("session.json"));
    Clarke::new_with_options(&server.uri(), options)
}

#[tokio::test]
async fn login_user_persists_a_full_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("loginUser"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_login_body()))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let clarke = client_for(&mock_server, &dir);

    let session = clarke
        .auth()
        .login_user("maria@example.com", "hunter22")
        .await
        .unwrap();

    assert_eq!(session.token, "user-token");
    assert_eq!(session.id, "u1");
    assert_eq!(session.email.as_deref(), Some("maria@example.com"));
    assert_eq!(session.name.as_deref(), Some("Maria Silva"));
    assert_eq!(session.role, Role::User);

    // The record is overwritten wholesale on disk and visible to a fresh client.
    let reopened = client_for(&mock_server, &dir);
    assert_eq!(reopened.auth().restore(), Some(session));
}

#[tokio::test]
async fn login_supplier_uses_the_supplier_mutation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("loginSupplier"))
        .respond_with(ResponseTemplate::new(200).set_body_json(supplier_login_body()))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let clarke = client_for(&mock_server, &dir);

    let session = clarke
        .auth()
        .login_supplier("contact@acme.com.br", "hunter22")
        .await
        .unwrap();

    assert_eq!(session.id, "7");
    assert_eq!(session.role, Role::Supplier);
    assert_eq!(session.name.as_deref(), Some("Acme Energia"));
}

#[tokio::test]
async fn login_failure_surfaces_an_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Invalid email or password" }]
        })))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let clarke = client_for(&mock_server, &dir);

    let result = clarke.auth().login_user("maria@example.com", "wrong").await;

    match result {
        Err(Error::Auth(msg)) => assert!(msg.contains("Invalid email or password")),
        other => panic!("expected an auth error, got {:?}", other.map(|_| ())),
    }
    assert!(clarke.auth().current_session().is_none());
}

#[tokio::test]
async fn register_user_persists_the_partial_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("createUser"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "createUser": {
                    "user": {
                        "id": "u9",
                        "name": "Jo\u{e3}o",
                        "email": "joao@example.com",
                        "cpf": "52998224725"
                    },
                    "token": "fresh-token"
                }
            }
        })))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let clarke = client_for(&mock_server, &dir);

    let session = clarke
        .auth()
        .register_user("Jo\u{e3}o", "joao@example.com", "hunter22", "529.982.247-25")
        .await
        .unwrap();

    assert_eq!(session.token, "fresh-token");
    assert_eq!(session.id, "u9");
    assert_eq!(session.role, Role::User);
    // Registration stores token + id + role only.
    assert_eq!(session.email, None);
    assert_eq!(session.name, None);

    // The CPF crosses the wire as bare digits.
    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["variables"]["input"]["cpf"], "52998224725");
}

#[tokio::test]
async fn register_supplier_collects_no_cpf() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("createSupplier"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "createSupplier": {
                    "supplier": supplier_login_body()["data"]["loginSupplier"]["supplier"].clone(),
                    "token": "supplier-token"
                }
            }
        })))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let clarke = client_for(&mock_server, &dir);

    let session = clarke
        .auth()
        .register_supplier("Acme Energia", "contact@acme.com.br", "hunter22")
        .await
        .unwrap();

    assert_eq!(session.role, Role::Supplier);

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body["variables"]["input"].get("cpf").is_none());
}

#[tokio::test]
async fn invalid_registration_never_contacts_the_network() {
    let mock_server = MockServer::start().await;

    let dir = tempfile::tempdir().unwrap();
    let clarke = client_for(&mock_server, &dir);

    let result = clarke
        .auth()
        .register_user("", "not-an-email", "abc", "123")
        .await;

    match result {
        Err(Error::Validation(report)) => {
            assert!(!report.is_valid());
            assert!(!report.name.valid);
            assert!(!report.email.valid);
            assert!(!report.password.valid);
            assert!(!report.cpf.valid);
        }
        other => panic!("expected a validation error, got {:?}", other.map(|_| ())),
    }

    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_user_requires_a_session_and_sends_the_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("updateUser"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "updateUser": {
                "id": "u1",
                "name": "Maria S.",
                "email": "maria@example.com",
                "cpf": "52998224725"
            } }
        })))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let clarke = client_for(&mock_server, &dir);

    let input = clarke_client::auth::UpdateUserInput {
        id: "u1".to_string(),
        name: Some("Maria S.".to_string()),
        email: None,
        cpf: None,
    };

    // Without a session the mutation is refused locally.
    assert!(matches!(
        clarke.auth().update_user(&input).await,
        Err(Error::NotAuthenticated(_))
    ));
    assert!(mock_server.received_requests().await.unwrap().is_empty());

    clarke
        .auth()
        .set_session(clarke_client::auth::Session::partial(
            "user-token".into(),
            "u1".into(),
            Role::User,
        ))
        .unwrap();

    let account = clarke.auth().update_user(&input).await.unwrap();
    assert_eq!(account.name, "Maria S.");

    let requests = mock_server.received_requests().await.unwrap();
    let auth_header = requests[0]
        .headers
        .iter()
        .find(|(name, _)| name.as_str().eq_ignore_ascii_case("authorization"))
        .map(|(_, values)| values.last().to_string());
    assert_eq!(auth_header.as_deref(), Some("Bearer user-token"));
}

#[tokio::test]
async fn sign_out_clears_memory_and_disk() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("loginUser"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_login_body()))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let clarke = client_for(&mock_server, &dir);

    clarke
        .auth()
        .login_user("maria@example.com", "hunter22")
        .await
        .unwrap();
    assert!(clarke.auth().current_session().is_some());

    clarke.auth().sign_out().unwrap();
    assert!(clarke.auth().current_session().is_none());

    // A fresh client must not see the previous principal.
    let reopened = client_for(&mock_server, &dir);
    assert!(reopened.auth().restore().is_none());
}
