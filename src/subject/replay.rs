use super::{ReplaySubject, RingBuffer, Subject};

impl<Item: Clone, Err> ReplaySubject<Item, Err> {
  /// A replay subject retaining the last `buffer_size` values.
  pub fn new(buffer_size: usize) -> Self { Subject::with_buffer(RingBuffer::with_capacity(buffer_size)) }

  /// A replay subject retaining every value it has seen.
  pub fn unbounded() -> Self { Subject::with_buffer(RingBuffer::unbounded()) }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  fn recording(log: &Rc<RefCell<Vec<String>>>) -> Callbacks<&'static str, String> {
    let (l1, l2, l3) = (log.clone(), log.clone(), log.clone());
    Callbacks::new()
      .on_next(move |v: &'static str| l1.borrow_mut().push(v.to_string()))
      .on_error(move |e| l2.borrow_mut().push(format!("error {e}")))
      .on_completed(move || l3.borrow_mut().push("completed".into()))
  }

  #[test]
  fn replays_the_last_two() {
    let log = Rc::new(RefCell::new(vec![]));
    let mut subject = ReplaySubject::new(2);
    for v in ["a", "b", "c", "d"] {
      subject.next(v);
    }
    subject.subscribe_with(recording(&log));
    subject.next("e");
    subject.complete();

    assert_eq!(*log.borrow(), vec!["c", "d", "e", "completed"]);
  }

  #[test]
  fn terminated_subject_replays_buffer_then_terminal() {
    let log = Rc::new(RefCell::new(vec![]));
    let mut subject = ReplaySubject::new(2);
    subject.next("a");
    subject.next("b");
    subject.error("boom".to_string());
    subject.subscribe_with(recording(&log));

    assert_eq!(*log.borrow(), vec!["a", "b", "error boom"]);
  }

  #[test]
  fn unbounded_replays_everything() {
    let log = Rc::new(RefCell::new(vec![]));
    let mut subject = ReplaySubject::unbounded();
    for v in ["a", "b", "c", "d"] {
      subject.next(v);
    }
    subject.subscribe_with(recording(&log));
    assert_eq!(*log.borrow(), vec!["a", "b", "c", "d"]);
  }

  #[test]
  fn zero_sized_replays_nothing() {
    let log = Rc::new(RefCell::new(vec![]));
    let mut subject = ReplaySubject::new(0);
    subject.next("a");
    subject.subscribe_with(recording(&log));
    assert!(log.borrow().is_empty());
  }

  #[test]
  fn emission_during_replay_lands_after_the_batch() {
    let log = Rc::new(RefCell::new(vec![]));
    let subject = ReplaySubject::<&'static str, ()>::new(2);
    subject.clone().next("a");
    subject.clone().next("b");

    let (mut feed, l) = (subject.clone(), log.clone());
    subject.subscribe_next(move |v: &'static str| {
      l.borrow_mut().push(v.to_string());
      if v == "a" {
        feed.next("c");
      }
    });

    assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
  }
}
