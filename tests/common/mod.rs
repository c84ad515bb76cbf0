// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use tubesync::auth::{AuthSession, SessionUser};
use tubesync::db::MetadataStore;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// A session identity for tests.
#[allow(dead_code)]
pub fn test_session_user(user_id: &str) -> SessionUser {
    SessionUser {
        user_id: user_id.to_string(),
        email: "test@example.com".to_string(),
        display_name: "Test User".to_string(),
        avatar_url: None,
    }
}

/// Create a test store connected to the emulator.
#[allow(dead_code)]
pub async fn test_store(session: AuthSession) -> MetadataStore {
    MetadataStore::new("test-project", session)
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create an offline store (operations that reach the client fail).
#[allow(dead_code)]
pub fn test_store_offline(session: AuthSession) -> MetadataStore {
    MetadataStore::new_mock(session)
}
