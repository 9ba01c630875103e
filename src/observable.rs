//! Observables: lazy, repeatable sources of notifications.

use std::rc::Rc;

use crate::{
  observer::{BoxedObserver, Callbacks, DisposeHook, FnMutObserver, Observer},
  subscriber::Subscriber,
  subscription::{AnyDisposable, Subscription},
};

mod create;
mod of;
mod trivial;

/// The subscribe side shared by every source: plain observables, subjects,
/// and the trait wrappers' underlying streams.
///
/// Implementors only provide [`actual_subscribe`](Self::actual_subscribe);
/// the other methods build a [`Subscriber`] around what the caller passed in.
pub trait ObservableType<Item, Err> {
  /// Attach a prepared subscriber and return the handle that releases it.
  fn actual_subscribe(&self, subscriber: Subscriber<Item, Err>) -> Subscription;

  /// Subscribe any observer.
  fn subscribe<O>(&self, observer: O) -> Subscription
  where
    O: Observer<Item, Err> + 'static,
    Item: 'static,
    Err: 'static,
  {
    self.actual_subscribe(Subscriber::new(Box::new(observer)))
  }

  /// Subscribe a closure for values only; errors and completion are ignored.
  fn subscribe_next<F>(&self, next: F) -> Subscription
  where
    F: FnMut(Item) + 'static,
    Item: 'static,
    Err: 'static,
  {
    self.subscribe(FnMutObserver(next))
  }

  /// Subscribe with optional per-kind callbacks, including `on_disposed`.
  fn subscribe_with(&self, callbacks: Callbacks<Item, Err>) -> Subscription
  where
    Item: 'static,
    Err: 'static,
  {
    let (observer, on_disposed) = callbacks.into_parts();
    self.subscribe_parts(observer, on_disposed)
  }

  /// Subscribe an already boxed observer together with an optional hook to
  /// run once the subscription is released.
  fn subscribe_parts(
    &self, observer: BoxedObserver<Item, Err>, on_disposed: Option<DisposeHook>,
  ) -> Subscription
  where
    Item: 'static,
    Err: 'static,
  {
    let subscriber = Subscriber::new(observer);
    if let Some(hook) = on_disposed {
      subscriber.add_hook(hook);
    }
    self.actual_subscribe(subscriber)
  }
}

type Producer<Item, Err> = dyn Fn(Subscriber<Item, Err>) -> AnyDisposable;

/// A representation of any set of values over any amount of time.
///
/// An `Observable` holds nothing but its producer function. Every subscribe
/// runs that function again, synchronously, on the caller's thread, for the
/// new subscriber alone. Clones share the producer.
pub struct Observable<Item, Err> {
  producer: Rc<Producer<Item, Err>>,
}

impl<Item, Err> Clone for Observable<Item, Err> {
  fn clone(&self) -> Self { Self { producer: self.producer.clone() } }
}

impl<Item: 'static, Err: 'static> ObservableType<Item, Err> for Observable<Item, Err> {
  fn actual_subscribe(&self, subscriber: Subscriber<Item, Err>) -> Subscription {
    let upstream = (self.producer)(subscriber.clone());
    subscriber.set_upstream(upstream);
    Subscription::new(subscriber)
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn each_subscribe_runs_the_producer_again() {
    let runs = Rc::new(RefCell::new(0));
    let r = runs.clone();
    let source = Observable::<i32, ()>::create(move |mut s| {
      *r.borrow_mut() += 1;
      s.next(*r.borrow());
      s.complete();
    });

    let seen = Rc::new(RefCell::new(vec![]));
    let (s1, s2) = (seen.clone(), seen.clone());
    source.subscribe_next(move |v| s1.borrow_mut().push(v));
    source.clone().subscribe_next(move |v| s2.borrow_mut().push(v));

    assert_eq!(*runs.borrow(), 2);
    assert_eq!(*seen.borrow(), vec![1, 2]);
  }

  #[test]
  fn subscribe_with_fires_disposed_after_terminal() {
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2, l3) = (log.clone(), log.clone(), log.clone());
    let subscription = Observable::<i32, ()>::from_iter([1, 2]).subscribe_with(
      Callbacks::new()
        .on_next(move |v| l1.borrow_mut().push(format!("{v}")))
        .on_completed(move || l2.borrow_mut().push("completed".into()))
        .on_disposed(move || l3.borrow_mut().push("disposed".into())),
    );

    assert_eq!(*log.borrow(), vec!["1", "2", "completed", "disposed"]);
    assert!(subscription.is_disposed());
    subscription.dispose();
    assert_eq!(log.borrow().len(), 4);
  }

  #[test]
  fn observer_struct_can_subscribe() {
    struct Sum(Rc<RefCell<i32>>);
    impl Observer<i32, ()> for Sum {
      fn on_notification(&mut self, n: Notification<i32, ()>) {
        if let Notification::Next(v) = n {
          *self.0.borrow_mut() += v;
        }
      }
    }

    let total = Rc::new(RefCell::new(0));
    Observable::<i32, ()>::from_iter(1..=4).subscribe(Sum(total.clone()));
    assert_eq!(*total.borrow(), 10);
  }
}
