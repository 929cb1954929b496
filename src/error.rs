use std::io;
use thiserror::Error;

/// Prefix for every diagnostic the shell writes to stderr.
pub const PROGRAM_NAME: &str = "lsh";

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("expected file name after `{0}`")]
    MalformedRedirection(String),
    #[error("{path}: {source}")]
    RedirectionTargetUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    BuiltinUsage(String),
    #[error("{name}: {source}")]
    BuiltinOperation {
        name: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("fork: {0}")]
    LaunchFailure(#[source] nix::Error),
    #[error("{program}: {source}")]
    ExecFailure {
        program: String,
        #[source]
        source: nix::Error,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Writes a diagnostic to stderr. Never touches stdout, so a redirected
/// command cannot capture its own errors.
pub fn report(err: &dyn std::fmt::Display) {
    eprintln!("{}: {}", PROGRAM_NAME, err);
}
