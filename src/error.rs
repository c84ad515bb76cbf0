// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for the metadata store, the catalog gateway and the flows
//! that combine them.

/// Errors from the metadata sync client (Firestore-backed).
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("No authenticated session")]
    Unauthenticated,

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Store transport error: {0}")]
    Transport(String),
}

/// Errors from the channel content gateway (YouTube Data API).
///
/// Transport and decode failures are distinct so callers can message them
/// differently ("try again" vs "service changed").
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Resource not found")]
    NotFound,

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response shape: {0}")]
    Decode(String),
}

/// Top-level error for flows that combine the store and the gateway.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unrecognized input: {0}")]
    Unrecognized(String),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
