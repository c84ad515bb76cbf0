// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides the metadata sync operations:
//! - user profiles (one document per user, full overwrite)
//! - channel summaries (append-only, bounded recent listing)
//! - real-time change subscriptions for both

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use firestore::{
    FirestoreDb, FirestoreListenEvent, FirestoreListener, FirestoreListenerTarget,
    FirestoreQueryDirection, FirestoreTempFilesListenStateStorage,
};

use crate::auth::AuthSession;
use crate::db::collections;
use crate::error::SyncError;
use crate::models::{ChannelSummary, UserProfile};
use crate::time_utils;

/// Listen target ids; each subscription owns its own listener, so these only
/// need to be distinct per handle.
const USER_PROFILE_TARGET: u32 = 0x10;
const RECENT_CHANNELS_TARGET: u32 = 0x20;

/// Metadata sync client over Firestore.
///
/// Holds the pre-built store client (safe for concurrent reuse) and the auth
/// session; profile operations fail fast with [`SyncError::Unauthenticated`]
/// before any I/O when the session carries no identity.
#[derive(Clone)]
pub struct MetadataStore {
    client: Option<FirestoreDb>,
    session: AuthSession,
}

impl MetadataStore {
    /// Create a new store client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str, session: AuthSession) -> Result<Self, SyncError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id, session).await;
        }

        let client = FirestoreDb::new(project_id)
            .await
            .map_err(|e| SyncError::Transport(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
            session,
        })
    }

    /// Create a store client for the emulator with unauthenticated access.
    async fn create_emulator_client(
        project_id: &str,
        session: AuthSession,
    ) -> Result<Self, SyncError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // ExternalJwtFunctionSource provides a dummy token without needing a
        // custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            SyncError::Transport(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
            session,
        })
    }

    /// Create a mock store for testing (offline mode).
    ///
    /// Any operation that reaches the client returns an error; session
    /// preconditions are still checked first.
    pub fn new_mock(session: AuthSession) -> Self {
        Self {
            client: None,
            session,
        }
    }

    /// The auth session this store was built with.
    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&FirestoreDb, SyncError> {
        self.client
            .as_ref()
            .ok_or_else(|| SyncError::Transport("Store not connected (offline mode)".to_string()))
    }

    // ─── User Profile Operations ─────────────────────────────────

    /// Overwrite the profile document keyed by `profile.user_id`.
    pub async fn write_user_profile(&self, profile: &UserProfile) -> Result<(), SyncError> {
        self.session.require_user()?;
        let started = Instant::now();

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&profile.user_id)
            .object(profile)
            .execute()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        tracing::debug!(
            user_id = %profile.user_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "User profile write completed"
        );
        Ok(())
    }

    /// Read a profile document, or `NotFound` when none exists.
    pub async fn read_user_profile(&self, user_id: &str) -> Result<UserProfile, SyncError> {
        self.session.require_user()?;
        let started = Instant::now();

        let found: Option<UserProfile> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        tracing::debug!(
            user_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "User profile read completed"
        );
        found.ok_or_else(|| SyncError::NotFound(format!("user profile {}", user_id)))
    }

    /// Snapshot the current session identity into the user document.
    pub async fn sync_session_profile(&self) -> Result<UserProfile, SyncError> {
        let user = self.session.require_user()?;
        let profile = user.profile(time_utils::epoch_millis());
        self.write_user_profile(&profile).await?;
        Ok(profile)
    }

    // ─── Channel Summary Operations ──────────────────────────────

    /// Append a channel summary; the store assigns the document id.
    pub async fn write_channel_summary(&self, summary: &ChannelSummary) -> Result<(), SyncError> {
        let started = Instant::now();

        let _: () = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::CHANNELS)
            .generate_document_id()
            .object(summary)
            .execute()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        tracing::debug!(
            channel_id = %summary.channel_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Channel summary write completed"
        );
        Ok(())
    }

    /// The most recently added channels, newest first, at most `limit`.
    pub async fn list_recent_channels(&self, limit: u32) -> Result<Vec<ChannelSummary>, SyncError> {
        let started = Instant::now();

        let channels: Vec<ChannelSummary> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::CHANNELS)
            .order_by([(
                "created_at_millis",
                FirestoreQueryDirection::Descending,
            )])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        tracing::debug!(
            count = channels.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Recent channels read completed"
        );
        Ok(channels)
    }

    // ─── Change Subscriptions ────────────────────────────────────

    /// Follow the current user's profile document.
    ///
    /// `on_change` receives the current document (when one exists) and every
    /// subsequent remote mutation; `on_error` fires at most once and ends
    /// delivery for this subscription. The returned handle must be cancelled
    /// to release the listener.
    pub async fn subscribe_user_profile<C, E>(
        &self,
        on_change: C,
        on_error: E,
    ) -> Result<SubscriptionHandle, SyncError>
    where
        C: Fn(UserProfile) + Send + Sync + 'static,
        E: Fn(SyncError) + Send + Sync + 'static,
    {
        let user_id = self.session.require_user()?.user_id.clone();
        let client = self.get_client()?.clone();

        let mut listener = client
            .create_listener(FirestoreTempFilesListenStateStorage::new())
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        client
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .batch_listen([user_id.clone()])
            .add_target(
                FirestoreListenerTarget::new(USER_PROFILE_TARGET),
                &mut listener,
            )
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        let on_change = Arc::new(on_change);
        let on_error = Arc::new(on_error);
        let failed = Arc::new(AtomicBool::new(false));

        listener
            .start(move |event| {
                let on_change = on_change.clone();
                let on_error = on_error.clone();
                let failed = failed.clone();
                async move {
                    if failed.load(Ordering::Acquire) {
                        return Ok(());
                    }
                    if let FirestoreListenEvent::DocumentChange(ref change) = event {
                        if let Some(doc) = &change.document {
                            match FirestoreDb::deserialize_doc_to::<UserProfile>(doc) {
                                Ok(profile) => on_change(profile),
                                Err(e) => {
                                    if !failed.swap(true, Ordering::AcqRel) {
                                        on_error(SyncError::Transport(e.to_string()));
                                    }
                                }
                            }
                        }
                    }
                    Ok(())
                }
            })
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        tracing::debug!(user_id = %user_id, "User profile listener registered");
        Ok(SubscriptionHandle { listener })
    }

    /// Follow the bounded recent-channels listing.
    ///
    /// Each matching document change re-runs the bounded query so `on_change`
    /// always sees the full ordered page, like the snapshot listener it
    /// mirrors. Same delivery and cancellation contract as
    /// [`Self::subscribe_user_profile`].
    pub async fn subscribe_recent_channels<C, E>(
        &self,
        limit: u32,
        on_change: C,
        on_error: E,
    ) -> Result<SubscriptionHandle, SyncError>
    where
        C: Fn(Vec<ChannelSummary>) + Send + Sync + 'static,
        E: Fn(SyncError) + Send + Sync + 'static,
    {
        let client = self.get_client()?.clone();

        let mut listener = client
            .create_listener(FirestoreTempFilesListenStateStorage::new())
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        client
            .fluent()
            .select()
            .from(collections::CHANNELS)
            .order_by([(
                "created_at_millis",
                FirestoreQueryDirection::Descending,
            )])
            .limit(limit)
            .listen()
            .add_target(
                FirestoreListenerTarget::new(RECENT_CHANNELS_TARGET),
                &mut listener,
            )
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        let on_change = Arc::new(on_change);
        let on_error = Arc::new(on_error);
        let failed = Arc::new(AtomicBool::new(false));

        listener
            .start(move |event| {
                let client = client.clone();
                let on_change = on_change.clone();
                let on_error = on_error.clone();
                let failed = failed.clone();
                async move {
                    if failed.load(Ordering::Acquire) {
                        return Ok(());
                    }
                    match event {
                        FirestoreListenEvent::DocumentChange(_)
                        | FirestoreListenEvent::DocumentDelete(_)
                        | FirestoreListenEvent::DocumentRemove(_) => {
                            let listing: firestore::FirestoreResult<Vec<ChannelSummary>> = client
                                .fluent()
                                .select()
                                .from(collections::CHANNELS)
                                .order_by([(
                                    "created_at_millis",
                                    FirestoreQueryDirection::Descending,
                                )])
                                .limit(limit)
                                .obj()
                                .query()
                                .await;
                            match listing {
                                Ok(channels) => on_change(channels),
                                Err(e) => {
                                    if !failed.swap(true, Ordering::AcqRel) {
                                        on_error(SyncError::Transport(e.to_string()));
                                    }
                                }
                            }
                        }
                        _ => {}
                    }
                    Ok(())
                }
            })
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        tracing::debug!(limit, "Recent channels listener registered");
        Ok(SubscriptionHandle { listener })
    }
}

/// A cancellable live-update registration.
pub struct SubscriptionHandle {
    listener: FirestoreListener<FirestoreDb, FirestoreTempFilesListenStateStorage>,
}

impl SubscriptionHandle {
    /// Release the listener.
    ///
    /// Dropping the handle without calling this leaks the registration for
    /// the remainder of the process lifetime.
    pub async fn cancel(mut self) -> Result<(), SyncError> {
        self.listener
            .shutdown()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))
    }
}
