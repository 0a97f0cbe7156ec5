//! # Downwatch Core
//!
//! Failed-download reconciliation for the downwatch service.
//!
//! The core answers one question on every pass: which downloads that we
//! handed to a download client have failed since we last looked, and which
//! of those failures have we not yet told anyone about? It does this by
//! cross-referencing the client's own task history against the internal
//! grab ledger and publishing exactly one [`DownloadFailedEvent`] per newly
//! detected failure.
//!
//! ## Architecture
//!
//! - [`clients`]: the [`DownloadClientGateway`] trait, a capped paginated
//!   read of a download client's recent task history
//! - [`ledger`]: the [`HistoryLedger`] trait, windowed read access to the
//!   internal grab/failure ledger
//! - [`events`]: the [`EventSink`] trait plus a broadcast-channel sink
//! - [`reconcile`]: the [`FailedDownloadService`] orchestrator and the pure
//!   correlation function it drives
//! - [`config`]: [`ReconcileConfig`] with env/file loading
//!
//! Collaborators are trait objects supplied at construction; the service
//! holds no cross-pass state, so repeated passes are safe and idempotent.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod clients;
pub mod config;
pub mod error;
pub mod events;
pub mod ledger;
pub mod reconcile;

pub use clients::DownloadClientGateway;
pub use config::{ReconcileConfig, ReconcileConfigSource};
pub use error::{ReconcileError, Result};
pub use events::{BroadcastSink, EventSink};
pub use ledger::HistoryLedger;
pub use reconcile::FailedDownloadService;
pub use reconcile::correlator::{FailedMatch, correlate};

pub use downwatch_model::DownloadFailedEvent;
