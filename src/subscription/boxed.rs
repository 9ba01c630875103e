use std::fmt::{Debug, Formatter};

use super::Disposable;

/// A boxed disposable, so heterogeneous disposables can share a collection.
///
/// Handles are `'static`: bags and subscribers keep them until some later
/// release.
///
/// # Examples
///
/// ```rust
/// use rxlite::prelude::*;
///
/// let handles: Vec<AnyDisposable> =
///   vec![AnyDisposable::new(()), AnyDisposable::new(ClosureDisposable::new(|| {}))];
///
/// for handle in &handles {
///   handle.dispose();
/// }
/// assert!(handles.iter().all(Disposable::is_disposed));
/// ```
pub struct AnyDisposable(Box<dyn Disposable>);

impl AnyDisposable {
  #[inline]
  pub fn new(disposable: impl Disposable + 'static) -> Self { Self(Box::new(disposable)) }
}

impl Disposable for AnyDisposable {
  #[inline]
  fn dispose(&self) { self.0.dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.is_disposed() }
}

impl Debug for AnyDisposable {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AnyDisposable").field("is_disposed", &self.is_disposed()).finish()
  }
}
