use std::{
  cell::RefCell,
  fmt::{Debug, Formatter},
};

use smallvec::SmallVec;
use tracing::{debug, trace};

use super::{AnyDisposable, Disposable};

/// Collects the disposables of one owner so they can be released together.
///
/// The bag is an explicit owning scope: whoever creates it (a screen, a
/// component, a session) releases it at its own teardown, either by calling
/// [`dispose_all`](Self::dispose_all) or simply by dropping the bag.
///
/// Once released the bag stays released: anything inserted afterwards is
/// disposed on the spot.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxlite::prelude::*;
///
/// let received = Rc::new(RefCell::new(vec![]));
/// let subject = PublishSubject::<i32, ()>::new();
///
/// {
///   let bag = DisposeBag::new();
///   let r = received.clone();
///   subject.subscribe_next(move |v| r.borrow_mut().push(v)).disposed_by(&bag);
///   subject.clone().next(1);
/// } // the bag is dropped here, releasing the subscription
///
/// subject.clone().next(2);
/// assert_eq!(*received.borrow(), vec![1]);
/// ```
#[derive(Default)]
pub struct DisposeBag {
  state: RefCell<BagState>,
}

#[derive(Default)]
struct BagState {
  disposed: bool,
  members: SmallVec<[AnyDisposable; 4]>,
}

impl DisposeBag {
  pub fn new() -> Self { Self::default() }

  /// Add a disposable to the bag.
  pub fn insert(&self, disposable: impl Disposable + 'static) {
    let mut state = self.state.borrow_mut();
    if state.disposed {
      drop(state);
      trace!("dispose bag already released, disposing inserted member immediately");
      disposable.dispose();
    } else {
      state.members.retain(|m| !m.is_disposed());
      state.members.push(AnyDisposable::new(disposable));
    }
  }

  /// Dispose every member exactly once and empty the bag. Calling it again
  /// does nothing.
  pub fn dispose_all(&self) {
    let members = {
      let mut state = self.state.borrow_mut();
      if state.disposed {
        return;
      }
      state.disposed = true;
      std::mem::take(&mut state.members)
    };
    debug!(count = members.len(), "releasing dispose bag");
    for member in members {
      member.dispose();
    }
  }

  /// Number of members still held.
  pub fn len(&self) -> usize { self.state.borrow().members.len() }

  pub fn is_empty(&self) -> bool { self.state.borrow().members.is_empty() }
}

impl Disposable for DisposeBag {
  #[inline]
  fn dispose(&self) { self.dispose_all() }

  #[inline]
  fn is_disposed(&self) -> bool { self.state.borrow().disposed }
}

impl Drop for DisposeBag {
  fn drop(&mut self) { self.dispose_all() }
}

impl Debug for DisposeBag {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let state = self.state.borrow();
    f.debug_struct("DisposeBag")
      .field("disposed", &state.disposed)
      .field("members", &state.members.len())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::Cell, rc::Rc};

  use super::*;
  use crate::subscription::ClosureDisposable;

  fn counting(count: &Rc<Cell<u32>>) -> ClosureDisposable<impl FnOnce()> {
    let c = count.clone();
    ClosureDisposable::new(move || c.set(c.get() + 1))
  }

  #[test]
  fn dispose_all_releases_each_member_once() {
    let count = Rc::new(Cell::new(0));
    let bag = DisposeBag::new();
    bag.insert(counting(&count));
    bag.insert(counting(&count));
    bag.insert(counting(&count));
    assert_eq!(bag.len(), 3);

    bag.dispose_all();
    assert_eq!(count.get(), 3);
    assert!(bag.is_empty());
    assert!(bag.is_disposed());

    bag.dispose_all();
    assert_eq!(count.get(), 3);
  }

  #[test]
  fn drop_releases_members() {
    let count = Rc::new(Cell::new(0));
    {
      let bag = DisposeBag::new();
      counting(&count).disposed_by(&bag);
      counting(&count).disposed_by(&bag);
    }
    assert_eq!(count.get(), 2);
  }

  #[test]
  fn insert_after_release_disposes_immediately() {
    let count = Rc::new(Cell::new(0));
    let bag = DisposeBag::new();
    bag.dispose_all();
    bag.insert(counting(&count));
    assert_eq!(count.get(), 1);
    assert!(bag.is_empty());
  }

  #[test]
  fn insert_prunes_already_disposed_members() {
    let bag = DisposeBag::new();
    bag.insert(());
    bag.insert(());
    assert_eq!(bag.len(), 1);
  }

  #[test]
  fn member_may_insert_into_bag_while_releasing() {
    let count = Rc::new(Cell::new(0));
    let bag = Rc::new(DisposeBag::new());
    let (b, c) = (bag.clone(), count.clone());
    bag.insert(ClosureDisposable::new(move || {
      let c2 = c.clone();
      b.insert(ClosureDisposable::new(move || c2.set(c2.get() + 1)));
    }));
    bag.dispose_all();
    assert_eq!(count.get(), 1);
  }

  #[test]
  fn bags_nest() {
    let count = Rc::new(Cell::new(0));
    let outer = DisposeBag::new();
    let inner = DisposeBag::new();
    counting(&count).disposed_by(&inner);
    inner.disposed_by(&outer);
    outer.dispose_all();
    assert_eq!(count.get(), 1);
  }
}
