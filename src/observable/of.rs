use super::Observable;
use crate::observer::Observer;

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Creates an observable producing a single value.
  ///
  /// Completes immediately after emitting the value given. Never emits an
  /// error.
  ///
  /// ```rust
  /// use rxlite::prelude::*;
  ///
  /// Observable::<_, ()>::of(123).subscribe_next(|v| println!("{v}"));
  /// ```
  pub fn of(value: Item) -> Self
  where
    Item: Clone,
  {
    Self::create(move |mut subscriber| {
      subscriber.next(value.clone());
      subscriber.complete();
    })
  }

  /// Creates an observable that emits every item of `iter`, then completes.
  ///
  /// Each subscription walks its own clone of the iterator and stops early
  /// once the subscription is closed.
  pub fn from_iter<I>(iter: I) -> Self
  where
    I: IntoIterator<Item = Item> + Clone + 'static,
  {
    Self::create(move |mut subscriber| {
      for v in iter.clone() {
        if subscriber.is_closed() {
          return;
        }
        subscriber.next(v);
      }
      subscriber.complete();
    })
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn of_emits_then_completes() {
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2) = (log.clone(), log.clone());
    Observable::<_, ()>::of("a").subscribe_with(
      Callbacks::new()
        .on_next(move |v: &str| l1.borrow_mut().push(v.to_string()))
        .on_completed(move || l2.borrow_mut().push("done".to_string())),
    );
    assert_eq!(*log.borrow(), vec!["a", "done"]);
  }

  #[test]
  fn from_iter_stops_when_disposed_midway() {
    let seen = Rc::new(RefCell::new(vec![]));
    let kept: Rc<RefCell<Option<Subscriber<i32, ()>>>> = Rc::default();
    let (s, k) = (seen.clone(), kept.clone());

    let source = Observable::<i32, ()>::from_iter(0..100);
    let probe = Observable::<i32, ()>::create(move |subscriber| {
      *k.borrow_mut() = Some(subscriber.clone());
      source.actual_subscribe(subscriber)
    });
    let subscription = probe.subscribe_next(move |v| {
      s.borrow_mut().push(v);
      if v == 2 {
        if let Some(sub) = kept.borrow().as_ref() {
          sub.dispose();
        }
      }
    });

    assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    assert!(subscription.is_disposed());
  }
}
