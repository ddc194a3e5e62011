//! End-to-end tests exercising the full router against in-memory and
//! on-disk fakes: no database or mail server required.

use crate::config::Config;
use crate::db::handlers::{DocumentStorage, LocalDocumentStorage, RegistrationStore};
use crate::email::EmailService;
use crate::payment_providers::PaymentProvider;
use crate::test_utils::{create_test_config, FakePaymentProvider, InMemoryRegistrationStore};
use crate::{build_router, AppState};
use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Payload for the standard test attachment; the content itself is opaque to
/// the acceptance policy.
const SMALL_PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot-actually-pixels";

fn create_state(config: Config) -> AppState {
    AppState::builder()
        .store(Arc::new(InMemoryRegistrationStore::new()) as Arc<dyn RegistrationStore>)
        .documents(Arc::new(LocalDocumentStorage::new(config.upload.dir.clone())) as Arc<dyn DocumentStorage>)
        .email(Arc::new(EmailService::new(&config).expect("email service should build")))
        .payments(Arc::new(FakePaymentProvider) as Arc<dyn PaymentProvider>)
        .config(config)
        .build()
}

fn create_test_server(base: &Path) -> TestServer {
    TestServer::new(build_router(&create_state(create_test_config(base)))).expect("test server should build")
}

fn registration_form_with_file(email: &str, file: Part) -> MultipartForm {
    MultipartForm::new()
        .add_text("firstName", "Ada")
        .add_text("lastName", "Lovelace")
        .add_text("email", email)
        .add_text("gender", "female")
        .add_text("phone", "+2348012345678")
        .add_text("country", "Nigeria")
        .add_text("state", "Lagos")
        .add_text("city", "Ikeja")
        .add_text("address", "1 Analytical Engine Way")
        .add_text("idType", "passport")
        .add_part("idFile", file)
}

fn registration_form(email: &str) -> MultipartForm {
    registration_form_with_file(email, Part::bytes(SMALL_PNG.to_vec()).file_name("id.png").mime_type("image/png"))
}

fn read_emails(base: &Path) -> Vec<String> {
    let dir = base.join("emails");
    let Ok(entries) = std::fs::read_dir(&dir) else {
        return vec![];
    };
    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| std::fs::read_to_string(entry.path()).ok())
        .collect()
}

#[tokio::test]
async fn root_probe_responds() {
    let base = tempfile::tempdir().unwrap();
    let server = create_test_server(base.path());

    let response = server.get("/").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "API is running....");
}

#[test_log::test(tokio::test)]
async fn register_with_valid_submission_creates_pending_record() {
    let base = tempfile::tempdir().unwrap();
    let server = create_test_server(base.path());

    let response = server.post("/register").multipart(registration_form("ada@example.com")).await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["message"], "Registration successful. Await approval.");
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["email"], "ada@example.com");

    let id_file_url = body["data"]["idFileUrl"].as_str().unwrap();
    assert!(id_file_url.starts_with("/uploads/idFile-"));
    assert!(id_file_url.ends_with(".png"));

    // The document landed on disk under the generated name
    let file_name = id_file_url.trim_start_matches("/uploads/");
    let stored = std::fs::read(base.path().join("uploads").join(file_name)).unwrap();
    assert_eq!(stored, SMALL_PNG);

    // Confirmation to the registrant plus alert to the administrator
    let emails = read_emails(base.path());
    assert_eq!(emails.len(), 2);
    assert!(emails.iter().any(|e| e.contains("Your registration has been received!")));
    assert!(emails.iter().any(|e| e.contains("New User Registration")));
}

#[test_log::test(tokio::test)]
async fn registering_the_same_email_twice_is_rejected() {
    let base = tempfile::tempdir().unwrap();
    let server = create_test_server(base.path());

    let first = server.post("/register").multipart(registration_form("ada@example.com")).await;
    first.assert_status(StatusCode::CREATED);

    let second = server.post("/register").multipart(registration_form("ada@example.com")).await;
    second.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = second.json();
    assert_eq!(body["error"], "User already registered");

    let users: Value = server.get("/users").await.json();
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn oversized_file_is_rejected_before_any_record_exists() {
    let base = tempfile::tempdir().unwrap();
    let server = create_test_server(base.path());

    let six_mib = vec![0u8; 6 * 1024 * 1024];
    let form = registration_form_with_file(
        "ada@example.com",
        Part::bytes(six_mib).file_name("id.png").mime_type("image/png"),
    );

    let response = server.post("/register").multipart(form).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "File too large");

    let users: Value = server.get("/users").await.json();
    assert!(users.as_array().unwrap().is_empty());
    assert!(read_emails(base.path()).is_empty());
}

#[tokio::test]
async fn txt_attachment_is_rejected_despite_declared_image_type() {
    let base = tempfile::tempdir().unwrap();
    let server = create_test_server(base.path());

    let form = registration_form_with_file(
        "ada@example.com",
        Part::bytes(b"plain text".to_vec()).file_name("notes.txt").mime_type("image/png"),
    );

    let response = server.post("/register").multipart(form).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Only images (JPEG, JPG, PNG) and PDFs are allowed!");

    let users: Value = server.get("/users").await.json();
    assert!(users.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn missing_field_is_rejected_without_side_effects() {
    let base = tempfile::tempdir().unwrap();
    let server = create_test_server(base.path());

    let form = MultipartForm::new()
        .add_text("firstName", "Ada")
        .add_text("email", "ada@example.com")
        .add_part("idFile", Part::bytes(SMALL_PNG.to_vec()).file_name("id.png").mime_type("image/png"));

    let response = server.post("/register").multipart(form).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "All fields and file upload are required!");

    let users: Value = server.get("/users").await.json();
    assert!(users.as_array().unwrap().is_empty());
    assert!(read_emails(base.path()).is_empty());
}

#[tokio::test]
async fn listing_an_empty_store_returns_an_empty_array() {
    let base = tempfile::tempdir().unwrap();
    let server = create_test_server(base.path());

    let response = server.get("/users").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn uploaded_document_is_served_back() {
    let base = tempfile::tempdir().unwrap();
    let server = create_test_server(base.path());

    let response = server.post("/register").multipart(registration_form("ada@example.com")).await;
    let body: Value = response.json();
    let id_file_url = body["data"]["idFileUrl"].as_str().unwrap().to_string();

    let file_response = server.get(&id_file_url).await;
    file_response.assert_status_ok();
    assert_eq!(file_response.as_bytes().as_ref(), SMALL_PNG);

    let missing = server.get("/uploads/idFile-0-dead.png").await;
    missing.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_status_on_unknown_id_is_404_and_sends_nothing() {
    let base = tempfile::tempdir().unwrap();
    let server = create_test_server(base.path());

    let response = server
        .post("/users/update-status")
        .json(&serde_json::json!({ "userId": uuid::Uuid::new_v4(), "status": "approved" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "User not found");

    assert!(read_emails(base.path()).is_empty());
}

#[tokio::test]
async fn approving_a_registration_congratulates_the_registrant() {
    let base = tempfile::tempdir().unwrap();
    let server = create_test_server(base.path());

    let created: Value = server.post("/register").multipart(registration_form("ada@example.com")).await.json();
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let response = server
        .post("/users/update-status")
        .json(&serde_json::json!({ "userId": id, "status": "approved" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "User status updated to approved");

    let emails = read_emails(base.path());
    assert_eq!(emails.len(), 3);
    assert!(emails.iter().any(|e| e.contains("Congratulations Ada")));
}

#[tokio::test]
async fn rejecting_a_registration_says_not_approved() {
    let base = tempfile::tempdir().unwrap();
    let server = create_test_server(base.path());

    let created: Value = server.post("/register").multipart(registration_form("ada@example.com")).await.json();
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let response = server
        .post("/users/update-status")
        .json(&serde_json::json!({ "userId": id, "status": "rejected" }))
        .await;
    response.assert_status_ok();

    let emails = read_emails(base.path());
    assert!(emails.iter().any(|e| e.contains("not approved")));

    // Transitions are unrestricted: a rejected registration can still be approved
    let response = server
        .post("/users/update-status")
        .json(&serde_json::json!({ "userId": id, "status": "approved" }))
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn deleting_a_registration_removes_record_and_document() {
    let base = tempfile::tempdir().unwrap();
    let server = create_test_server(base.path());

    let created: Value = server.post("/register").multipart(registration_form("ada@example.com")).await.json();
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let file_name = created["data"]["idFileUrl"]
        .as_str()
        .unwrap()
        .trim_start_matches("/uploads/")
        .to_string();

    let response = server.delete(&format!("/users/{id}")).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "User deleted successfully");

    assert!(!base.path().join("uploads").join(&file_name).exists());
    let users: Value = server.get("/users").await.json();
    assert!(users.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_registration_whose_file_is_gone_still_succeeds() {
    let base = tempfile::tempdir().unwrap();
    let server = create_test_server(base.path());

    let created: Value = server.post("/register").multipart(registration_form("ada@example.com")).await.json();
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let file_name = created["data"]["idFileUrl"]
        .as_str()
        .unwrap()
        .trim_start_matches("/uploads/")
        .to_string();

    // Simulate an operator removing the document out of band
    std::fs::remove_file(base.path().join("uploads").join(&file_name)).unwrap();

    let response = server.delete(&format!("/users/{id}")).await;
    response.assert_status_ok();

    let users: Value = server.get("/users").await.json();
    assert!(users.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn deleting_an_unknown_registration_is_404() {
    let base = tempfile::tempdir().unwrap();
    let server = create_test_server(base.path());

    let response = server.delete(&format!("/users/{}", uuid::Uuid::new_v4())).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn contact_form_sends_notification_and_ack() {
    let base = tempfile::tempdir().unwrap();
    let server = create_test_server(base.path());

    let response = server
        .post("/send-email")
        .json(&serde_json::json!({
            "name": "Grace",
            "email": "grace@example.com",
            "message": "Is the next cohort open?"
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Emails sent successfully!");

    let emails = read_emails(base.path());
    assert_eq!(emails.len(), 2);
    assert!(emails.iter().any(|e| e.contains("Is the next cohort open?")));
    assert!(emails.iter().any(|e| e.contains("Thank you for contacting us")));
}

#[tokio::test]
async fn contact_form_failure_reports_500_envelope() {
    let base = tempfile::tempdir().unwrap();
    let mut config = create_test_config(base.path());
    // An unparseable receiver address makes dispatch fail fast
    config.receiver_emails = vec!["not an address".to_string()];
    let server = TestServer::new(build_router(&create_state(config))).unwrap();

    let response = server
        .post("/send-email")
        .json(&serde_json::json!({
            "name": "Grace",
            "email": "grace@example.com",
            "message": "hello"
        }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to send email");
}

#[tokio::test]
async fn checkout_session_returns_provider_session_id() {
    let base = tempfile::tempdir().unwrap();
    let server = create_test_server(base.path());

    let response = server.post("/create-checkout-session").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], "cs_test_a1b2c3");
}

#[tokio::test]
async fn checkout_session_without_provider_is_a_server_error() {
    let base = tempfile::tempdir().unwrap();
    let config = create_test_config(base.path());
    let state = AppState::builder()
        .store(Arc::new(InMemoryRegistrationStore::new()) as Arc<dyn RegistrationStore>)
        .documents(Arc::new(LocalDocumentStorage::new(config.upload.dir.clone())) as Arc<dyn DocumentStorage>)
        .email(Arc::new(EmailService::new(&config).unwrap()))
        .config(config)
        .build();
    let server = TestServer::new(build_router(&state)).unwrap();

    let response = server.post("/create-checkout-session").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn paypal_config_exposes_client_id() {
    let base = tempfile::tempdir().unwrap();
    let server = create_test_server(base.path());

    let response = server.get("/api/config/paypal").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["clientId"], "test-paypal-client");
}
