//! Error type shared by the node-CLI client and the chain seam.

/// Everything that can go wrong while driving the node CLI.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The node binary could not be started at all.
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        /// The binary that failed to start.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The node CLI ran but exited non-zero. Carries the subprocess's exit
    /// code so callers can propagate it as their own.
    #[error("`{program}` exited with status {}: {stderr}", .code.map_or_else(|| "signal".to_owned(), |c| c.to_string()))]
    CommandFailed {
        /// The binary that failed.
        program: String,
        /// Exit code, or `None` when killed by a signal.
        code: Option<i32>,
        /// Captured stderr, trimmed.
        stderr: String,
    },

    /// The node CLI produced output that is not valid JSON, or JSON of an
    /// unexpected shape.
    #[error("invalid JSON from node CLI: {0}")]
    Json(#[from] serde_json::Error),

    /// The node CLI produced non-UTF-8 output.
    #[error("non-UTF-8 output from node CLI")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// `list-contract-by-code` returned an empty contract list.
    #[error("no contracts instantiated under code ID {code_id}")]
    NoContracts {
        /// The code ID that was queried.
        code_id: u64,
    },
}

impl Error {
    /// The exit code to propagate for this error, if it wraps a subprocess
    /// failure. The harness exits with the first failing subprocess's code.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { code, .. } => *code,
            _ => None,
        }
    }
}
