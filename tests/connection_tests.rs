//! Tests for the connection state machine.
//!
//! Covers the connect/disconnect lifecycle and the guarantee that
//! operations refused in the disconnected state never contact the store.

mod common;

use serde_json::json;

use common::{RecordingClient, connected_bank, user};
use databank::{Databank, DatabankConfig, DatabankError, DocumentBank};

// ============================================================================
// Lifecycle
// ============================================================================

/// Connecting with the default configuration succeeds and flips the
/// adapter into the connected state.
#[tokio::test]
async fn test_connect_succeeds() {
    let bank = DocumentBank::memory();
    assert!(!bank.is_connected().await);

    bank.connect(&DatabankConfig::default())
        .await
        .expect("connect should succeed");
    assert!(bank.is_connected().await);
}

/// A second connect without an intervening disconnect fails with
/// `AlreadyConnected`, and the session opened by the first call keeps
/// working.
#[tokio::test]
async fn test_double_connect_fails_and_keeps_first_session() {
    let bank = connected_bank().await;
    bank.create("user", "alice", user("Alice"))
        .await
        .expect("create should succeed");

    let err = bank
        .connect(&DatabankConfig::default())
        .await
        .expect_err("second connect should fail");
    assert!(matches!(err, DatabankError::AlreadyConnected));

    // The first session is unaffected.
    let alice = bank.read("user", "alice").await.expect("read should succeed");
    assert_eq!(alice["name"], "Alice");
}

/// Disconnecting while disconnected fails with `NotConnected`.
#[tokio::test]
async fn test_disconnect_while_disconnected_fails() {
    let bank = DocumentBank::memory();
    let err = bank.disconnect().await.expect_err("disconnect should fail");
    assert!(matches!(err, DatabankError::NotConnected));
}

/// Disconnect returns the adapter to the disconnected state; a fresh
/// connect is accepted afterwards.
#[tokio::test]
async fn test_disconnect_then_reconnect() {
    let bank = connected_bank().await;
    bank.disconnect().await.expect("disconnect should succeed");
    assert!(!bank.is_connected().await);

    bank.connect(&DatabankConfig::default())
        .await
        .expect("reconnect should succeed");
    assert!(bank.is_connected().await);
}

/// Operations issued after a disconnect are refused again.
#[tokio::test]
async fn test_operations_after_disconnect_fail() {
    let bank = connected_bank().await;
    bank.create("user", "alice", user("Alice"))
        .await
        .expect("create should succeed");
    bank.disconnect().await.expect("disconnect should succeed");

    let err = bank.read("user", "alice").await.expect_err("read should fail");
    assert!(matches!(err, DatabankError::NotConnected));
}

// ============================================================================
// Disconnected operations never reach the store
// ============================================================================

/// Every operation except connect fails with `NotConnected` while
/// disconnected, and not a single capability call reaches the store.
#[tokio::test]
async fn test_disconnected_operations_perform_no_store_calls() {
    let client = RecordingClient::new();
    let calls = client.calls();
    let bank = DocumentBank::new(client);

    let err = bank
        .create("user", "alice", user("Alice"))
        .await
        .expect_err("create should fail");
    assert!(matches!(err, DatabankError::NotConnected));

    let err = bank.read("user", "alice").await.expect_err("read should fail");
    assert!(matches!(err, DatabankError::NotConnected));

    let err = bank
        .update("user", "alice", user("Alice"))
        .await
        .expect_err("update should fail");
    assert!(matches!(err, DatabankError::NotConnected));

    let err = bank.delete("user", "alice").await.expect_err("delete should fail");
    assert!(matches!(err, DatabankError::NotConnected));

    let err = bank
        .search("user", json!({}))
        .await
        .expect_err("search should fail");
    assert!(matches!(err, DatabankError::NotConnected));

    let err = bank.disconnect().await.expect_err("disconnect should fail");
    assert!(matches!(err, DatabankError::NotConnected));

    assert_eq!(calls.get(), 0, "no capability call may reach the store");
}

/// A failed second connect performs no store calls beyond the first
/// session's open.
#[tokio::test]
async fn test_rejected_connect_performs_no_store_calls() {
    let client = RecordingClient::new();
    let calls = client.calls();
    let bank = DocumentBank::new(client);

    bank.connect(&DatabankConfig::default())
        .await
        .expect("connect should succeed");
    let after_first = calls.get();

    let err = bank
        .connect(&DatabankConfig::default())
        .await
        .expect_err("second connect should fail");
    assert!(matches!(err, DatabankError::AlreadyConnected));
    assert_eq!(calls.get(), after_first, "rejected connect must not open a session");
}
