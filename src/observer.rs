//! Observer trait and implementations
//!
//! An observer consumes the notifications of one subscription. Every
//! notification goes through a single method, [`Observer::on_notification`],
//! so wrappers only have one place to enforce ordering rules; `next`,
//! `error` and `complete` are shorthands on top of it.

use crate::notification::Notification;

// ============================================================================
// Observer Trait
// ============================================================================

/// Observer trait: The consumer of data in reactive programming
///
/// An observer is never told anything after an `Error` or `Completed`. Plain
/// implementations do not have to guard against that themselves: the
/// [`Subscriber`](crate::subscriber::Subscriber) every subscription wraps them
/// in latches on the first terminal notification.
pub trait Observer<Item, Err> {
  /// Handle one notification.
  fn on_notification(&mut self, notification: Notification<Item, Err>);

  /// Returns `true` once this observer will ignore whatever it is sent.
  fn is_closed(&self) -> bool { false }

  #[inline]
  fn next(&mut self, value: Item) { self.on_notification(Notification::Next(value)) }

  #[inline]
  fn error(&mut self, err: Err) { self.on_notification(Notification::Error(err)) }

  #[inline]
  fn complete(&mut self) { self.on_notification(Notification::Completed) }
}

impl<Item, Err, O> Observer<Item, Err> for Box<O>
where
  O: Observer<Item, Err> + ?Sized,
{
  #[inline]
  fn on_notification(&mut self, notification: Notification<Item, Err>) {
    (**self).on_notification(notification)
  }

  #[inline]
  fn is_closed(&self) -> bool { (**self).is_closed() }
}

/// Boxed observer, the form subscriptions store.
pub type BoxedObserver<Item, Err> = Box<dyn Observer<Item, Err>>;

/// Hook run once a subscription is released.
pub type DisposeHook = Box<dyn FnOnce()>;

// ============================================================================
// FnMutObserver - Closure adapter
// ============================================================================

/// Closure adapter for the common "values only" subscription.
///
/// The closure becomes the `next` handler; errors and completion are ignored.
#[derive(Clone)]
pub struct FnMutObserver<F>(pub F);

impl<F, Item, Err> Observer<Item, Err> for FnMutObserver<F>
where
  F: FnMut(Item),
{
  #[inline]
  fn on_notification(&mut self, notification: Notification<Item, Err>) {
    if let Notification::Next(v) = notification {
      (self.0)(v);
    }
  }
}

// ============================================================================
// Callbacks - optional slots per notification kind
// ============================================================================

/// Up to four optional callbacks: one per notification kind plus
/// `on_disposed`, which fires once the subscription is released (after the
/// terminal callback, or on explicit disposal, whichever comes first).
///
/// Slots that are not filled in are skipped.
///
/// ```rust
/// use rxlite::prelude::*;
///
/// Observable::<i32, String>::of(1).subscribe_with(
///   Callbacks::new()
///     .on_next(|v| println!("value {v}"))
///     .on_error(|e| println!("failed: {e}"))
///     .on_completed(|| println!("done"))
///     .on_disposed(|| println!("released")),
/// );
/// ```
pub struct Callbacks<Item, Err> {
  on_next: Option<Box<dyn FnMut(Item)>>,
  on_error: Option<Box<dyn FnOnce(Err)>>,
  on_completed: Option<Box<dyn FnOnce()>>,
  on_disposed: Option<DisposeHook>,
}

impl<Item, Err> Default for Callbacks<Item, Err> {
  fn default() -> Self { Self { on_next: None, on_error: None, on_completed: None, on_disposed: None } }
}

impl<Item, Err> Callbacks<Item, Err> {
  pub fn new() -> Self { Self::default() }

  pub fn on_next(mut self, f: impl FnMut(Item) + 'static) -> Self {
    self.on_next = Some(Box::new(f));
    self
  }

  pub fn on_error(mut self, f: impl FnOnce(Err) + 'static) -> Self {
    self.on_error = Some(Box::new(f));
    self
  }

  pub fn on_completed(mut self, f: impl FnOnce() + 'static) -> Self {
    self.on_completed = Some(Box::new(f));
    self
  }

  pub fn on_disposed(mut self, f: impl FnOnce() + 'static) -> Self {
    self.on_disposed = Some(Box::new(f));
    self
  }
}

impl<Item: 'static, Err: 'static> Callbacks<Item, Err> {
  /// Separate the notification handlers from the disposal hook.
  pub fn into_parts(mut self) -> (BoxedObserver<Item, Err>, Option<DisposeHook>) {
    let disposed = self.on_disposed.take();
    (Box::new(self), disposed)
  }
}

impl<Item, Err> Observer<Item, Err> for Callbacks<Item, Err> {
  fn on_notification(&mut self, notification: Notification<Item, Err>) {
    match notification {
      Notification::Next(v) => {
        if let Some(f) = self.on_next.as_mut() {
          f(v);
        }
      }
      Notification::Error(e) => {
        self.on_next = None;
        self.on_completed = None;
        if let Some(f) = self.on_error.take() {
          f(e);
        }
      }
      Notification::Completed => {
        self.on_next = None;
        self.on_error = None;
        if let Some(f) = self.on_completed.take() {
          f();
        }
      }
    }
  }
}

// ============================================================================
// Tests
// ============================================================================
