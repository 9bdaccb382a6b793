//! # Tradepost Sync
//!
//! Two-way reconciliation between store replicas.
//!
//! Every replica is a full copy of the catalog, partner book and
//! transaction history. Syncing is two sequential one-way calls over the
//! peer's ordinary HTTP API, not a streaming protocol:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Two-Way Sync Protocol                            │
//! │                                                                         │
//! │   INITIATOR                                    REMOTE PEER              │
//! │                                                                         │
//! │   snapshot local state                                                  │
//! │   {products, partners, transactions}                                    │
//! │        │                                                                │
//! │        │  LEG 1: POST /api/sync/process  ──────►  Reconciler applies    │
//! │        │                                          the snapshot, then    │
//! │        │  ◄──────  {success, receivedCount,       snapshots itself      │
//! │        │            currentState}                                       │
//! │        ▼                                                                │
//! │   LEG 2: feed currentState into the                                     │
//! │   local Reconciler                                                      │
//! │                                                                         │
//! │   Row rules: products/partners upsert by name (local id kept);          │
//! │   transactions insert by origin-assigned UUID, replay is a no-op.       │
//! │   A failed leg keeps already-applied rows; retrying is safe because     │
//! │   every row operation is idempotent.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//! - [`protocol`] - Snapshot and response bodies shared by both sides
//! - [`reconcile`] - Applies an incoming snapshot through the repositories
//! - [`client`] - reqwest client running both legs against a peer URL
//! - [`status`] - Shared idle/syncing/success/error tracker
//! - [`error`] - [`SyncError`]

pub mod client;
pub mod error;
pub mod protocol;
pub mod reconcile;
pub mod status;

pub use client::{SyncClient, SyncOutcome};
pub use error::{SyncError, SyncResult};
pub use protocol::{ReceivedCount, SyncProcessResponse, SyncSnapshot};
pub use reconcile::Reconciler;
pub use status::{SyncPhase, SyncState, SyncStatus};
