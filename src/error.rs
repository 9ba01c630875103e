//! Failure values produced by the engine itself.
//!
//! Stream errors are whatever `Err` type a source is declared with; the types
//! here only cover states the engine reports on its own behalf.

use thiserror::Error;

/// Errors reading state out of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubjectError {
  /// The subject holds no value to hand out, because it was disposed.
  #[error("the subject holds no value")]
  ValueUnavailable,
}

/// Errors that can prevent a trait future from resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IntoFutureError {
  /// The subscription was released before any result was produced.
  #[error("the subscription was disposed before a result arrived")]
  Disposed,
}
