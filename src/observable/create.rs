use std::rc::Rc;

use super::Observable;
use crate::{
  subscriber::Subscriber,
  subscription::{AnyDisposable, Disposable},
};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Build an observable from a producer function.
  ///
  /// Each subscribe calls `producer` with a fresh [`Subscriber`] and returns
  /// a subscription wrapping whatever teardown the producer returns. The
  /// producer may emit before returning, or keep the subscriber (it is cheap
  /// to clone) and emit later; a long-running producer should check
  /// `is_closed()` before emitting, since disposal is cooperative.
  ///
  /// ```rust
  /// use std::{cell::RefCell, rc::Rc};
  ///
  /// use rxlite::prelude::*;
  ///
  /// let seen = Rc::new(RefCell::new(vec![]));
  /// let s = seen.clone();
  ///
  /// Observable::<_, ()>::create(|mut subscriber| {
  ///   subscriber.next(1);
  ///   subscriber.next(2);
  ///   subscriber.complete();
  ///   // nothing to release
  /// })
  /// .subscribe_next(move |v| s.borrow_mut().push(v));
  ///
  /// assert_eq!(*seen.borrow(), vec![1, 2]);
  /// ```
  pub fn create<F, D>(producer: F) -> Self
  where
    F: Fn(Subscriber<Item, Err>) -> D + 'static,
    D: Disposable + 'static,
  {
    Self { producer: Rc::new(move |subscriber| AnyDisposable::new(producer(subscriber))) }
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn next_complete() {
    let emitted = Rc::new(RefCell::new(vec![]));
    let emitted_clone = emitted.clone();

    Observable::<_, ()>::create(|mut emitter| {
      emitter.next(1);
      emitter.next(2);
      emitter.complete();
      emitter.next(3);
    })
    .subscribe_next(move |v| emitted_clone.borrow_mut().push(v));

    assert_eq!(*emitted.borrow(), vec![1, 2]);
  }

  #[test]
  fn error_is_delivered_once() {
    let error = Rc::new(RefCell::new(vec![]));
    let error_clone = error.clone();

    Observable::<(), _>::create(|mut emitter| {
      emitter.error("oops");
      emitter.error("again");
    })
    .subscribe_with(Callbacks::new().on_error(move |e| error_clone.borrow_mut().push(e)));

    assert_eq!(*error.borrow(), vec!["oops"]);
  }

  #[test]
  fn teardown_runs_on_dispose() {
    let unsubscribed = Rc::new(RefCell::new(0));
    let unsub_clone = unsubscribed.clone();

    let subscription = Observable::<i32, ()>::create(move |mut emitter| {
      emitter.next(1);
      let u = unsub_clone.clone();
      ClosureDisposable::new(move || *u.borrow_mut() += 1)
    })
    .subscribe_next(|_| {});

    assert_eq!(*unsubscribed.borrow(), 0);
    subscription.dispose();
    subscription.dispose();
    assert_eq!(*unsubscribed.borrow(), 1);
  }

  #[test]
  fn teardown_runs_when_terminal_precedes_return() {
    let released = Rc::new(RefCell::new(false));
    let r = released.clone();

    let subscription = Observable::<i32, ()>::create(move |mut emitter| {
      emitter.complete();
      let r = r.clone();
      ClosureDisposable::new(move || *r.borrow_mut() = true)
    })
    .subscribe_next(|_| {});

    assert!(*released.borrow());
    assert!(subscription.is_disposed());
  }

  #[test]
  fn deferred_emission_through_kept_subscriber() {
    let kept: Rc<RefCell<Vec<Subscriber<i32, ()>>>> = Rc::default();
    let k = kept.clone();
    let seen = Rc::new(RefCell::new(vec![]));
    let s = seen.clone();

    let subscription = Observable::create(move |subscriber| {
      k.borrow_mut().push(subscriber);
    })
    .subscribe_next(move |v| s.borrow_mut().push(v));

    assert!(seen.borrow().is_empty());
    let mut later = kept.borrow()[0].clone();
    later.next(7);
    subscription.dispose();
    assert!(later.is_closed());
    later.next(8);

    assert_eq!(*seen.borrow(), vec![7]);
  }
}
