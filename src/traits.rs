//! Traits: observables whose cardinality is fixed by their type.
//!
//! | Trait | Producer may send | Subscriber hears |
//! |-------|-------------------|------------------|
//! | [`Single`] | one `success` or one `failure` | `on_success` / `on_failure` |
//! | [`Maybe`] | one `success`, `completed` or `error` | `on_success` / `on_completed` / `on_error` |
//! | [`Completable`] | one `completed` or `error` | `on_completed` / `on_error` |
//!
//! Each trait wraps a plain [`Observable`](crate::observable::Observable) and
//! reuses its subscriber, so the terminal latch drops anything a producer
//! sends after its first terminal event (with a `warn!`). All three also
//! accept `on_disposed`, fired once the subscription is released.

mod completable;
mod maybe;
mod single;

pub use completable::*;
pub use maybe::*;
pub use single::*;
