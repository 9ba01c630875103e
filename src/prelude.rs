//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Errors
pub use crate::error::{IntoFutureError, SubjectError};
// Future interop
pub use crate::future::ResultFuture;
// Notifications
pub use crate::notification::{Notification, Terminal};
// Observable core
pub use crate::observable::{Observable, ObservableType};
// Observer trait and adapters
pub use crate::observer::{BoxedObserver, Callbacks, DisposeHook, FnMutObserver, Observer};
// Subject
pub use crate::subject::*;
pub use crate::subscriber::Subscriber;
// Subscription
pub use crate::subscription::*;
// Single, Maybe, Completable
pub use crate::traits::*;
