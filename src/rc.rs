use std::{
  cell::{Ref, RefCell, RefMut},
  rc::{Rc, Weak},
};

pub trait RcDeref {
  type Target;
  fn rc_deref(&self) -> Ref<'_, Self::Target>;
}

pub trait RcDerefMut: RcDeref {
  fn rc_deref_mut(&self) -> RefMut<'_, Self::Target>;
}

/// Shared, mutable, single-threaded ownership: `Rc<RefCell<T>>` with the
/// borrow helpers the engine uses everywhere.
#[derive(Default)]
pub struct MutRc<T>(Rc<RefCell<T>>);

/// Non-owning counterpart of [`MutRc`].
pub struct MutWeak<T>(Weak<RefCell<T>>);

impl<T> MutRc<T> {
  pub fn own(t: T) -> Self { Self(Rc::new(RefCell::new(t))) }

  pub fn downgrade(&self) -> MutWeak<T> { MutWeak(Rc::downgrade(&self.0)) }

  #[inline]
  pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.0, &other.0) }
}

impl<T> MutWeak<T> {
  pub fn upgrade(&self) -> Option<MutRc<T>> { self.0.upgrade().map(MutRc) }
}

impl<T> From<T> for MutRc<T> {
  fn from(t: T) -> Self { Self::own(t) }
}

impl<T> RcDeref for MutRc<T> {
  type Target = T;

  #[inline]
  fn rc_deref(&self) -> Ref<'_, T> { self.0.borrow() }
}

impl<T> RcDerefMut for MutRc<T> {
  #[inline]
  fn rc_deref_mut(&self) -> RefMut<'_, T> { self.0.borrow_mut() }
}

impl<T> Clone for MutRc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> Clone for MutWeak<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}
