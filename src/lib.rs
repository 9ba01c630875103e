//! # rxlite: a small reactive core
//!
//! Observables, observers, subjects and the Single / Maybe / Completable
//! traits, with deterministic resource release through dispose bags.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use rxlite::prelude::*;
//!
//! let bag = DisposeBag::new();
//! let seen = Rc::new(RefCell::new(vec![]));
//! let s = seen.clone();
//!
//! Observable::<_, ()>::create(|mut subscriber| {
//!   subscriber.next(1);
//!   subscriber.next(2);
//!   subscriber.complete();
//! })
//! .subscribe_next(move |v| s.borrow_mut().push(v))
//! .disposed_by(&bag);
//!
//! assert_eq!(*seen.borrow(), vec![1, 2]);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | A lazy source; every subscribe runs its producer again |
//! | [`Observer`] | Consumes `Next`, `Error` and `Completed` notifications |
//! | [`Single`] / [`Maybe`] / [`Completable`] | Observables with a fixed number of outcomes |
//! | [`PublishSubject`] / [`BehaviorSubject`] / [`ReplaySubject`] | Multicast sources that are observers too |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`DisposeBag`] | Releases everything it holds when its owner goes away |
//!
//! Everything is single-threaded and synchronous: `subscribe` and every
//! notification run to completion on the caller's thread. Diagnostics go
//! through [`tracing`](https://docs.rs/tracing); the library installs no
//! subscriber of its own.
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Single`]: traits::Single
//! [`Maybe`]: traits::Maybe
//! [`Completable`]: traits::Completable
//! [`PublishSubject`]: subject::PublishSubject
//! [`BehaviorSubject`]: subject::BehaviorSubject
//! [`ReplaySubject`]: subject::ReplaySubject
//! [`Subscription`]: subscription::Subscription
//! [`DisposeBag`]: subscription::DisposeBag

pub mod error;
pub mod future;
pub mod notification;
pub mod observable;
pub mod observer;
pub mod prelude;
pub mod rc;
pub mod subject;
pub mod subscriber;
pub mod subscription;
pub mod traits;

// Re-export the prelude module
pub use prelude::*;

// Run the README examples as doctests.
#[cfg(doctest)]
mod __markdown_doctests {
  mod readme {
    #![doc = include_str!("../README.md")]
  }
}
