use std::{
    fmt::{Display, Formatter},
    path::PathBuf,
};

/// Failures at the edges of an exploration.
///
/// The exploration itself never fails: missing symbols, unresolvable chain
/// steps and unplaceable outline matches shrink the result instead. These
/// variants cover what happens around it (arguments, I/O, serialization).
#[derive(Debug)]
pub enum ExplorerError {
    DocumentUnavailable(PathBuf),
    NoSymbolAtCaret,
    InvalidArguments(String),
    Serialization(serde_json::Error),
    Io(std::io::Error),
}

impl Display for ExplorerError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::DocumentUnavailable(path) => write!(f, "cannot open {}", path.display()),
            Self::NoSymbolAtCaret => write!(f, "no symbol under the caret"),
            Self::InvalidArguments(reason) => write!(f, "invalid arguments: {reason}"),
            Self::Serialization(err) => write!(f, "serialization failed: {err}"),
            Self::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for ExplorerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialization(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ExplorerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

impl From<std::io::Error> for ExplorerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
