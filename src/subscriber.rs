//! The per-subscription sink every observer is wrapped in.
//!
//! A [`Subscriber`] owns one observer and enforces the delivery contract on
//! its behalf:
//!
//! - **Terminal latch**: after the first `Error` or `Completed` nothing else
//!   reaches the observer. Later notifications are dropped with a `warn!`
//!   since they mean the producer broke its protocol.
//! - **Serialization**: a notification that arrives while the observer is
//!   still running its previous callback is queued and delivered afterwards,
//!   so the observer never sees two notifications at once.
//! - **Release**: disposal (explicit, or implied by a terminal notification)
//!   happens once. It drops the observer, disposes the producer's teardown
//!   and runs the disposal hooks (`on_disposed`). Disposal requested from
//!   inside the observer's own callback stops delivery at once but releases
//!   only after that callback returns.
//!
//! No `RefCell` borrow is held while user code runs, so callbacks may emit,
//! subscribe or dispose freely.

use std::{collections::VecDeque, mem};

use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::{
  notification::Notification,
  observer::{BoxedObserver, DisposeHook, Observer},
  rc::{MutRc, RcDeref, RcDerefMut},
  subscription::{AnyDisposable, Disposable},
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Lifecycle {
  /// Accepting notifications.
  Active,
  /// A terminal notification was accepted; it may still be queued.
  Terminated,
  /// Disposed before, or instead of, a terminal notification.
  Disposed,
}

struct SubscriberState<Item, Err> {
  /// `None` while a callback is running, and for good once released.
  observer: Option<BoxedObserver<Item, Err>>,
  lifecycle: Lifecycle,
  dispatching: bool,
  pending: VecDeque<Notification<Item, Err>>,
  upstream: Option<AnyDisposable>,
  hooks: SmallVec<[DisposeHook; 1]>,
  released: bool,
}

/// The sink a producer emits into.
///
/// Cheap to clone; clones feed the same observer, so a producer may keep one
/// around to emit later.
pub struct Subscriber<Item, Err> {
  state: MutRc<SubscriberState<Item, Err>>,
}

impl<Item, Err> Clone for Subscriber<Item, Err> {
  fn clone(&self) -> Self { Self { state: self.state.clone() } }
}

impl<Item, Err> Subscriber<Item, Err> {
  pub fn new(observer: BoxedObserver<Item, Err>) -> Self {
    Self {
      state: MutRc::own(SubscriberState {
        observer: Some(observer),
        lifecycle: Lifecycle::Active,
        dispatching: false,
        pending: VecDeque::new(),
        upstream: None,
        hooks: SmallVec::new(),
        released: false,
      }),
    }
  }

  /// Register a hook to run when this subscription is released. A hook added
  /// after the release runs immediately.
  pub fn add_hook(&self, hook: DisposeHook) {
    let mut state = self.state.rc_deref_mut();
    if state.released {
      drop(state);
      hook();
    } else {
      state.hooks.push(hook);
    }
  }

  /// Attach the teardown returned by the producer. If the subscription has
  /// already been released (for instance because the producer completed
  /// before returning) the teardown is disposed right away.
  pub fn set_upstream(&self, upstream: AnyDisposable) {
    let mut state = self.state.rc_deref_mut();
    if state.released {
      drop(state);
      upstream.dispose();
    } else {
      state.upstream = Some(upstream);
    }
  }

  /// Accept a run of notifications as one batch: they are queued back to
  /// back before any of them is delivered, so anything emitted re-entrantly
  /// while delivering lands after the whole batch.
  pub fn emit_all(&self, notifications: impl IntoIterator<Item = Notification<Item, Err>>) {
    {
      let mut state = self.state.rc_deref_mut();
      for n in notifications {
        match state.lifecycle {
          Lifecycle::Active => {
            if n.is_terminal() {
              state.lifecycle = Lifecycle::Terminated;
            }
            state.pending.push_back(n);
          }
          Lifecycle::Terminated => {
            warn!(notification = ?n, "notification after a terminal notification ignored");
          }
          Lifecycle::Disposed => {
            trace!(notification = ?n, "notification to a disposed subscriber dropped");
          }
        }
      }
      if state.dispatching || state.pending.is_empty() {
        return;
      }
      state.dispatching = true;
    }
    self.drain();
  }

  /// Deliver queued notifications until the queue is empty or the
  /// subscription is released.
  fn drain(&self) {
    loop {
      let (mut observer, notification) = {
        let mut state = self.state.rc_deref_mut();
        let Some(notification) = state.pending.pop_front() else {
          state.dispatching = false;
          return;
        };
        let Some(observer) = state.observer.take() else {
          state.pending.clear();
          state.dispatching = false;
          return;
        };
        (observer, notification)
      };

      let terminal = notification.is_terminal();
      observer.on_notification(notification);

      if terminal {
        {
          let mut state = self.state.rc_deref_mut();
          state.pending.clear();
          state.dispatching = false;
        }
        drop(observer);
        self.release();
        return;
      }

      let mut state = self.state.rc_deref_mut();
      if state.lifecycle == Lifecycle::Disposed {
        state.dispatching = false;
        drop(state);
        drop(observer);
        self.release();
        return;
      }
      state.observer = Some(observer);
    }
  }

  /// Run the one-time cleanup: dispose the producer's teardown, then the
  /// hooks in registration order.
  fn release(&self) {
    let (upstream, hooks) = {
      let mut state = self.state.rc_deref_mut();
      if state.released {
        return;
      }
      state.released = true;
      (state.upstream.take(), mem::take(&mut state.hooks))
    };
    if let Some(upstream) = upstream {
      upstream.dispose();
    }
    for hook in hooks {
      hook();
    }
  }

  /// Whether a terminal notification has been accepted or the subscription
  /// was disposed.
  pub fn is_stopped(&self) -> bool { self.state.rc_deref().lifecycle != Lifecycle::Active }
}

impl<Item, Err> Observer<Item, Err> for Subscriber<Item, Err> {
  #[inline]
  fn on_notification(&mut self, notification: Notification<Item, Err>) {
    self.emit_all(std::iter::once(notification))
  }

  #[inline]
  fn is_closed(&self) -> bool { self.is_stopped() }
}

impl<Item, Err> Disposable for Subscriber<Item, Err> {
  fn dispose(&self) {
    let observer = {
      let mut state = self.state.rc_deref_mut();
      if state.released {
        return;
      }
      state.lifecycle = Lifecycle::Disposed;
      state.pending.clear();
      // The running callback holds the observer; `drain` releases once it
      // gets it back.
      if state.dispatching {
        return;
      }
      state.observer.take()
    };
    drop(observer);
    self.release();
  }

  fn is_disposed(&self) -> bool {
    let state = self.state.rc_deref();
    state.released || state.lifecycle == Lifecycle::Disposed
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use tracing_test::traced_test;

  use super::*;
  use crate::{observer::Callbacks, subscription::ClosureDisposable};

  type Log = Rc<RefCell<Vec<String>>>;

  fn recording(log: &Log) -> Subscriber<i32, &'static str> {
    let (l1, l2, l3, l4) = (log.clone(), log.clone(), log.clone(), log.clone());
    let (observer, hook) = Callbacks::new()
      .on_next(move |v| l1.borrow_mut().push(format!("next {v}")))
      .on_error(move |e| l2.borrow_mut().push(format!("error {e}")))
      .on_completed(move || l3.borrow_mut().push("completed".into()))
      .on_disposed(move || l4.borrow_mut().push("disposed".into()))
      .into_parts();
    let subscriber = Subscriber::new(observer);
    if let Some(hook) = hook {
      subscriber.add_hook(hook);
    }
    subscriber
  }

  #[traced_test]
  #[test]
  fn terminal_latch_drops_later_notifications() {
    let log = Log::default();
    let mut s = recording(&log);
    s.next(1);
    s.complete();
    s.next(2);
    s.error("late");
    s.complete();

    assert_eq!(*log.borrow(), vec!["next 1", "completed", "disposed"]);
    assert!(s.is_closed());
    assert!(s.is_disposed());
    assert!(logs_contain("notification after a terminal notification ignored"));
  }

  #[test]
  fn dispose_fires_hook_once_and_stops_delivery() {
    let log = Log::default();
    let mut s = recording(&log);
    s.next(1);
    s.dispose();
    s.dispose();
    s.next(2);
    s.complete();

    assert_eq!(*log.borrow(), vec!["next 1", "disposed"]);
  }

  #[test]
  fn dispose_after_terminal_is_noop() {
    let log = Log::default();
    let mut s = recording(&log);
    s.error("boom");
    s.dispose();
    assert_eq!(*log.borrow(), vec!["error boom", "disposed"]);
  }

  #[test]
  fn upstream_released_on_terminal() {
    let released = Rc::new(RefCell::new(0));
    let r = released.clone();
    let mut s = Subscriber::<i32, ()>::new(Box::new(Callbacks::new()));
    s.set_upstream(AnyDisposable::new(ClosureDisposable::new(move || *r.borrow_mut() += 1)));
    s.complete();
    s.dispose();
    assert_eq!(*released.borrow(), 1);
  }

  #[test]
  fn upstream_attached_after_release_is_disposed_immediately() {
    let released = Rc::new(RefCell::new(false));
    let r = released.clone();
    let mut s = Subscriber::<i32, ()>::new(Box::new(Callbacks::new()));
    s.complete();
    s.set_upstream(AnyDisposable::new(ClosureDisposable::new(move || *r.borrow_mut() = true)));
    assert!(*released.borrow());
  }

  #[test]
  fn reentrant_notifications_are_queued_in_order() {
    let log = Log::default();
    let slot: Rc<RefCell<Option<Subscriber<i32, ()>>>> = Rc::default();
    let (l, sl) = (log.clone(), slot.clone());
    let observer = Callbacks::new().on_next(move |v: i32| {
      l.borrow_mut().push(format!("start {v}"));
      if v == 1 {
        if let Some(mut s) = sl.borrow().clone() {
          s.next(2);
          s.next(3);
        }
      }
      l.borrow_mut().push(format!("end {v}"));
    });
    let mut s = Subscriber::new(Box::new(observer));
    *slot.borrow_mut() = Some(s.clone());
    s.next(1);

    assert_eq!(
      *log.borrow(),
      vec!["start 1", "end 1", "start 2", "end 2", "start 3", "end 3"]
    );
  }

  #[test]
  fn dispose_from_inside_callback() {
    let log = Log::default();
    let slot: Rc<RefCell<Option<Subscriber<i32, ()>>>> = Rc::default();
    let (l, sl) = (log.clone(), slot.clone());
    let l2 = log.clone();
    let observer = Callbacks::new().on_next(move |v: i32| {
      l.borrow_mut().push(format!("next {v}"));
      if let Some(s) = sl.borrow().as_ref() {
        s.dispose();
      }
    });
    let mut s = Subscriber::new(Box::new(observer));
    s.add_hook(Box::new(move || l2.borrow_mut().push("disposed".into())));
    *slot.borrow_mut() = Some(s.clone());
    s.next(1);
    s.next(2);

    assert_eq!(*log.borrow(), vec!["next 1", "disposed"]);
    assert!(s.is_disposed());
  }

  #[test]
  fn dispose_inside_callback_releases_after_it_returns() {
    let log = Log::default();
    let slot: Rc<RefCell<Option<Subscriber<i32, ()>>>> = Rc::default();
    let (l, sl) = (log.clone(), slot.clone());
    let (l2, l3) = (log.clone(), log.clone());
    let observer = Callbacks::new().on_next(move |v: i32| {
      l.borrow_mut().push(format!("start {v}"));
      if let Some(s) = sl.borrow().as_ref() {
        s.dispose();
        assert!(s.is_disposed());
        assert!(s.is_closed());
      }
      l.borrow_mut().push(format!("end {v}"));
    });
    let mut s = Subscriber::new(Box::new(observer));
    s.set_upstream(AnyDisposable::new(ClosureDisposable::new(move || {
      l2.borrow_mut().push("teardown".into())
    })));
    s.add_hook(Box::new(move || l3.borrow_mut().push("disposed".into())));
    *slot.borrow_mut() = Some(s.clone());
    s.next(1);

    assert_eq!(*log.borrow(), vec!["start 1", "end 1", "teardown", "disposed"]);
  }

  #[test]
  fn hook_added_after_release_runs_immediately() {
    let ran = Rc::new(RefCell::new(false));
    let r = ran.clone();
    let mut s = Subscriber::<i32, ()>::new(Box::new(Callbacks::new()));
    s.complete();
    s.add_hook(Box::new(move || *r.borrow_mut() = true));
    assert!(*ran.borrow());
  }
}
