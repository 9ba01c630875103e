//! Disposables: handles that release a subscription or any other resource.

use std::{
  cell::Cell,
  fmt::{Debug, Formatter},
  rc::Rc,
};

mod boxed;
mod dispose_bag;
mod dynamic;

pub use boxed::*;
pub use dispose_bag::*;
pub use dynamic::*;

/// A cancellation handle.
///
/// `dispose` is idempotent: the first call releases the resource, every later
/// call does nothing. It never panics.
pub trait Disposable {
  fn dispose(&self);

  fn is_disposed(&self) -> bool;

  /// Hand this disposable to `bag`, which releases it together with
  /// everything else it holds.
  fn disposed_by(self, bag: &DisposeBag)
  where
    Self: Sized + 'static,
  {
    bag.insert(self)
  }

  /// Activates "RAII" behavior for this disposable: it is disposed as soon as
  /// the returned guard goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `dispose()` is called immediately, which is probably not what you want!
  fn dispose_on_drop(self) -> DisposeGuard<Self>
  where
    Self: Sized,
  {
    DisposeGuard::new(self)
  }
}

/// Nothing to release. Producers return `()` when they hold no resources.
impl Disposable for () {
  #[inline]
  fn dispose(&self) {}

  #[inline]
  fn is_disposed(&self) -> bool { true }
}

impl<T: Disposable + ?Sized> Disposable for Box<T> {
  #[inline]
  fn dispose(&self) { (**self).dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { (**self).is_disposed() }
}

impl<T: Disposable + ?Sized> Disposable for Rc<T> {
  #[inline]
  fn dispose(&self) { (**self).dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { (**self).is_disposed() }
}

// ==================== ClosureDisposable ====================

/// Runs a closure the first time it is disposed.
///
/// ```rust
/// use std::{cell::Cell, rc::Rc};
///
/// use rxlite::prelude::*;
///
/// let released = Rc::new(Cell::new(0));
/// let r = released.clone();
/// let d = ClosureDisposable::new(move || r.set(r.get() + 1));
/// d.dispose();
/// d.dispose();
/// assert_eq!(released.get(), 1);
/// ```
pub struct ClosureDisposable<F>(Cell<Option<F>>);

impl<F: FnOnce()> ClosureDisposable<F> {
  pub fn new(f: F) -> Self { Self(Cell::new(Some(f))) }
}

impl<F: FnOnce()> Disposable for ClosureDisposable<F> {
  fn dispose(&self) {
    if let Some(f) = self.0.take() {
      f();
    }
  }

  fn is_disposed(&self) -> bool {
    let f = self.0.take();
    let disposed = f.is_none();
    self.0.set(f);
    disposed
  }
}

// ==================== Subscription ====================

/// The handle `subscribe` returns.
///
/// Disposing it stops delivery to the observer, runs the producer's teardown
/// and fires `on_disposed`, unless the stream already terminated, in which
/// case all of that has happened already and disposing is a no-op. Clones
/// refer to the same subscription.
#[derive(Clone)]
pub struct Subscription(Rc<dyn Disposable>);

impl Subscription {
  pub fn new(disposable: impl Disposable + 'static) -> Self { Self(Rc::new(disposable)) }
}

impl Disposable for Subscription {
  #[inline]
  fn dispose(&self) { self.0.dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.is_disposed() }
}

impl Debug for Subscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscription").field("is_disposed", &self.is_disposed()).finish()
  }
}

// ==================== DisposeGuard ====================

/// An RAII implementation of a "scoped subscribed" of a disposable. When this
/// structure is dropped (falls out of scope), the disposable is disposed.
///
/// If you want to drop it immediately, wrap it in its own scope
#[must_use]
pub struct DisposeGuard<T: Disposable>(Option<T>);

impl<T: Disposable> DisposeGuard<T> {
  pub fn new(disposable: T) -> Self { Self(Some(disposable)) }

  /// Give up the guard without disposing.
  pub fn into_inner(mut self) -> Option<T> { self.0.take() }
}

impl<T: Disposable + Debug> Debug for DisposeGuard<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("DisposeGuard").field(&self.0).finish()
  }
}

impl<T: Disposable> Drop for DisposeGuard<T> {
  #[inline]
  fn drop(&mut self) {
    if let Some(d) = self.0.take() {
      d.dispose();
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::Cell, rc::Rc};

  use super::*;

  fn counter() -> (Rc<Cell<u32>>, impl FnOnce()) {
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    (count, move || c.set(c.get() + 1))
  }

  #[test]
  fn closure_disposable_runs_once() {
    let (count, f) = counter();
    let d = ClosureDisposable::new(f);
    assert!(!d.is_disposed());
    d.dispose();
    d.dispose();
    d.dispose();
    assert_eq!(count.get(), 1);
    assert!(d.is_disposed());
  }

  #[test]
  fn unit_is_already_disposed() {
    ().dispose();
    assert!(().is_disposed());
  }

  #[test]
  fn subscription_clones_share_state() {
    let (count, f) = counter();
    let a = Subscription::new(ClosureDisposable::new(f));
    let b = a.clone();
    a.dispose();
    assert!(b.is_disposed());
    b.dispose();
    assert_eq!(count.get(), 1);
  }

  #[test]
  fn guard_disposes_on_drop() {
    let (count, f) = counter();
    {
      let _guard = ClosureDisposable::new(f).dispose_on_drop();
      assert_eq!(count.get(), 0);
    }
    assert_eq!(count.get(), 1);
  }

  #[test]
  fn guard_into_inner_keeps_resource() {
    let (count, f) = counter();
    let inner = DisposeGuard::new(ClosureDisposable::new(f)).into_inner();
    assert_eq!(count.get(), 0);
    inner.expect("guard held a disposable").dispose();
    assert_eq!(count.get(), 1);
  }
}
