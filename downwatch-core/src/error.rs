use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("download client '{client}' unavailable: {source}")]
    ClientUnavailable {
        client: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("history ledger unavailable: {0}")]
    LedgerUnavailable(#[source] anyhow::Error),
}

impl ReconcileError {
    /// Wrap a transport or decode failure from the named download client.
    pub fn client_unavailable(
        client: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::ClientUnavailable {
            client: client.into(),
            source: source.into(),
        }
    }

    pub fn ledger_unavailable(source: impl Into<anyhow::Error>) -> Self {
        Self::LedgerUnavailable(source.into())
    }
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
