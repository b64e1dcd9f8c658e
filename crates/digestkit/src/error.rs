use traits::ParamError;

/// Errors returned by the kind-generic API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
  /// Failure inside the resolved engine (parameters, ranges, hex, lengths).
  #[error(transparent)]
  Engine(#[from] engine::Error),
  /// Kind name that [`Kind::from_str`](core::str::FromStr::from_str) does not recognize.
  #[error("unknown digest kind {0:?}")]
  UnknownKind(String),
  /// The output writer passed to [`pretty_print`](crate::pretty_print) failed.
  #[error("formatter error")]
  Format(#[from] core::fmt::Error),
}

impl From<ParamError> for Error {
  #[inline]
  fn from(err: ParamError) -> Self {
    Self::Engine(err.into())
  }
}

impl Error {
  /// The parameter error behind this failure, if any.
  #[must_use]
  pub fn as_param(&self) -> Option<ParamError> {
    match self {
      Self::Engine(engine::Error::Param(err)) => Some(*err),
      _ => None,
    }
  }
}
