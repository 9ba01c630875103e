use super::Observable;
use crate::observer::Observer;

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Creates an observable that produces no values and completes
  /// immediately.
  pub fn empty() -> Self { Self::create(|mut subscriber| subscriber.complete()) }

  /// Creates an observable that never emits anything, not even a terminal
  /// notification.
  pub fn never() -> Self { Self::create(|_| {}) }

  /// Creates an observable that emits no items, just terminates with an
  /// error.
  pub fn throw(err: Err) -> Self
  where
    Err: Clone,
  {
    Self::create(move |mut subscriber| subscriber.error(err.clone()))
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  fn record(source: &Observable<i32, &'static str>) -> (Vec<String>, Subscription) {
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2, l3) = (log.clone(), log.clone(), log.clone());
    let subscription = source.subscribe_with(
      Callbacks::new()
        .on_next(move |v| l1.borrow_mut().push(format!("next {v}")))
        .on_error(move |e| l2.borrow_mut().push(format!("error {e}")))
        .on_completed(move || l3.borrow_mut().push("completed".to_string())),
    );
    let entries = log.borrow().clone();
    (entries, subscription)
  }

  #[test]
  fn empty_only_completes() {
    let (log, subscription) = record(&Observable::empty());
    assert_eq!(log, vec!["completed"]);
    assert!(subscription.is_disposed());
  }

  #[test]
  fn never_stays_silent_until_disposed() {
    let (log, subscription) = record(&Observable::never());
    assert!(log.is_empty());
    assert!(!subscription.is_disposed());
    subscription.dispose();
    assert!(subscription.is_disposed());
  }

  #[test]
  fn throw_only_errors() {
    let (log, _) = record(&Observable::throw("bad"));
    assert_eq!(log, vec!["error bad"]);
  }
}
