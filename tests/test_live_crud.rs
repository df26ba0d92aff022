//! End-to-end tests against a live Dolibarr instance.
//!
//! Every test creates its own records and removes them through `RecordGuard`.

use dolibarr_mcp_server::{CreationResult, DolibarrApiError, Method};
use serde_json::json;
use serial_test::serial;

mod e2e;
use e2e::*;

/// Create, read, update and delete one contact.
#[test]
#[serial]
#[ignore = "requires a live Dolibarr instance"]
fn test_contact_crud_lifecycle() {
    let client = setup_test_client();
    let mut guard = RecordGuard::new(&client);

    let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S");
    let lastname = format!("E2ETest{}", timestamp);

    println!("\n1. Testing CREATE contact...");
    let response = client
        .request(
            Method::Post,
            "contacts",
            Some(&json!({"lastname": lastname, "firstname": "Crud"})),
        )
        .unwrap_or_else(|e| panic!("✗ Failed to create contact: {}", e));
    let created = CreationResult::from(response);
    let id = created.id().expect("created contact has an id");
    guard.track("contacts", &id);
    println!("  ✓ Contact created with ID {}", id);

    println!("\n2. Testing READ contact...");
    let contact = client
        .request(Method::Get, &format!("contacts/{}", id), None)
        .unwrap_or_else(|e| panic!("✗ Failed to read contact: {}", e));
    assert_eq!(contact["lastname"], json!(lastname));
    assert_eq!(id_of(&contact["id"]), id);

    println!("\n3. Testing UPDATE contact...");
    client
        .request(
            Method::Put,
            &format!("contacts/{}", id),
            Some(&json!({"firstname": "Updated"})),
        )
        .unwrap_or_else(|e| panic!("✗ Failed to update contact: {}", e));
    let contact = client
        .request(Method::Get, &format!("contacts/{}", id), None)
        .unwrap();
    assert_eq!(contact["firstname"], json!("Updated"));

    println!("\n4. Testing DELETE contact...");
    client
        .request(Method::Delete, &format!("contacts/{}", id), None)
        .unwrap_or_else(|e| panic!("✗ Failed to delete contact: {}", e));
    guard.release();

    let gone = client.request(Method::Get, &format!("contacts/{}", id), None);
    assert!(matches!(gone, Err(DolibarrApiError::NotFound(_))));
    println!("  ✓ Contact lifecycle complete");
}

/// A missing ticket reference surfaces as NotFound with Dolibarr's message.
#[test]
#[serial]
#[ignore = "requires a live Dolibarr instance"]
fn test_missing_ticket_is_not_found() {
    let client = setup_test_client();

    let result = client.request(Method::Get, "tickets/ref/E2E-DOES-NOT-EXIST", None);

    match result {
        Err(DolibarrApiError::NotFound(message)) => assert!(!message.is_empty()),
        other => panic!("expected NotFound, got {:?}", other),
    }
}
