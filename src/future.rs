//! Await the outcome of a [`Single`](crate::traits::Single),
//! [`Maybe`](crate::traits::Maybe) or
//! [`Completable`](crate::traits::Completable).
//!
//! The trait is subscribed as soon as `into_future` is called; the returned
//! [`ResultFuture`] resolves with whatever its callbacks recorded. Dropping
//! the future disposes the subscription.
//!
//! ```rust
//! use futures::executor::block_on;
//! use rxlite::prelude::*;
//!
//! let answer = block_on(Single::<_, String>::just(42).into_future());
//! assert_eq!(answer, Ok(Ok(42)));
//! ```

use std::{
  cell::Cell,
  future::Future,
  pin::Pin,
  rc::Rc,
  task::{Context, Poll},
};

use futures::channel::oneshot;

use crate::{
  error::IntoFutureError,
  subscription::{Disposable, Subscription},
};

/// The sending half shared by the callbacks of one subscription. Whichever
/// callback runs first resolves it; the rest find it empty.
pub(crate) struct Resolver<T>(Rc<Cell<Option<oneshot::Sender<T>>>>);

impl<T> Clone for Resolver<T> {
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> Resolver<T> {
  pub(crate) fn resolve(&self, value: T) {
    if let Some(sender) = self.0.take() {
      // The receiver only goes away together with the future.
      let _ = sender.send(value);
    }
  }

  /// Drop the sender without a value, so the future reports
  /// [`IntoFutureError::Disposed`].
  pub(crate) fn abandon(&self) { drop(self.0.take()); }
}

/// Create a linked resolver and receiver.
pub(crate) fn resolver<T>() -> (Resolver<T>, oneshot::Receiver<T>) {
  let (sender, receiver) = oneshot::channel();
  (Resolver(Rc::new(Cell::new(Some(sender)))), receiver)
}

/// A future holding the subscription it waits on.
#[must_use = "futures do nothing unless polled, and dropping this one disposes its subscription"]
pub struct ResultFuture<T> {
  receiver: oneshot::Receiver<T>,
  subscription: Subscription,
}

impl<T> ResultFuture<T> {
  pub(crate) fn new(receiver: oneshot::Receiver<T>, subscription: Subscription) -> Self {
    Self { receiver, subscription }
  }
}

impl<T> Future for ResultFuture<T> {
  type Output = Result<T, IntoFutureError>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    let this = self.get_mut();
    match Pin::new(&mut this.receiver).poll(cx) {
      Poll::Ready(Ok(value)) => Poll::Ready(Ok(value)),
      Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(IntoFutureError::Disposed)),
      Poll::Pending => Poll::Pending,
    }
  }
}

impl<T> Drop for ResultFuture<T> {
  fn drop(&mut self) { self.subscription.dispose(); }
}
