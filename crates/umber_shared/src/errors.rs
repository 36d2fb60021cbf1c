//! Error results that can be returned from the front end

use crate::byte_stream::Location;
use thiserror::Error;

/// Hard failures. Everything the CSS syntax specification classifies as a
/// parse error is recovered during tokenization and never surfaces here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("unterminated comment at {0:?}")]
    UnterminatedComment(Location),
}

/// Result that can be returned which holds either T or an Error
pub type Result<T> = std::result::Result<T, anyhow::Error>;
