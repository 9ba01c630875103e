//! Subjects: observables that are also observers, multicasting one feed to
//! every attached subscriber.
//!
//! All variants share one engine, [`Subject`], and differ only in the
//! [`ReplayBuffer`] that decides what a newcomer is told about the past:
//!
//! | Variant | Retains | New subscriber first receives |
//! |---------|---------|-------------------------------|
//! | [`PublishSubject`] | nothing | nothing |
//! | [`BehaviorSubject`] | the latest value, seeded at construction | that value |
//! | [`ReplaySubject`] | the last `n` values (or all of them) | those values, oldest first |
//!
//! Once the subject has terminated, a newcomer receives the stored terminal
//! notification, preceded by the replayed values for a replay subject.

use std::{collections::VecDeque, iter};

use smallvec::SmallVec;
use tracing::debug;

use crate::{
  notification::{Notification, Terminal},
  observable::{Observable, ObservableType},
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
  subscriber::Subscriber,
  subscription::{Disposable, DynamicSubscriptions, Subscription},
};

mod behavior;
mod replay;
mod replay_buffer;

pub use replay_buffer::*;

/// A subject that replays nothing.
pub type PublishSubject<Item, Err> = Subject<Item, Err, NoReplay>;

/// A subject that always holds a current value and hands it to every new
/// subscriber.
pub type BehaviorSubject<Item, Err> = Subject<Item, Err, LatestValue<Item>>;

/// A subject that replays the most recent values to every new subscriber.
pub type ReplaySubject<Item, Err> = Subject<Item, Err, RingBuffer<Item>>;

#[derive(Clone)]
enum SubjectState<Err> {
  Live,
  Terminated(Terminal<Err>),
  Disposed,
}

struct SubjectCore<Item, Err, B> {
  observers: DynamicSubscriptions<Subscriber<Item, Err>>,
  buffer: B,
  state: SubjectState<Err>,
  /// Set while a broadcast is running; emissions arriving meanwhile wait in
  /// `queued`.
  emitting: bool,
  queued: VecDeque<Notification<Item, Err>>,
}

/// The engine behind every subject variant.
///
/// Emitting (`next`, `error`, `complete` from [`Observer`]) broadcasts to the
/// subscribers attached at that moment, in attachment order, before
/// returning. The subscriber list is copied before any callback runs, so a
/// callback may subscribe, dispose or emit into the same subject. Emissions
/// made from inside a callback are queued and broadcast, in order, once the
/// current broadcast has reached every subscriber.
///
/// Clones share the same subject.
pub struct Subject<Item, Err, B> {
  core: MutRc<SubjectCore<Item, Err, B>>,
}

impl<Item, Err, B> Clone for Subject<Item, Err, B> {
  fn clone(&self) -> Self { Self { core: self.core.clone() } }
}

impl<Item, Err, B> Subject<Item, Err, B> {
  pub(crate) fn with_buffer(buffer: B) -> Self {
    Self {
      core: MutRc::own(SubjectCore {
        observers: DynamicSubscriptions::new(),
        buffer,
        state: SubjectState::Live,
        emitting: false,
        queued: VecDeque::new(),
      }),
    }
  }

  /// Number of subscribers currently attached.
  pub fn observer_count(&self) -> usize { self.core.rc_deref().observers.len() }

  pub fn has_observers(&self) -> bool { !self.core.rc_deref().observers.is_empty() }

  /// Whether `error` or `complete` has been received.
  pub fn is_terminated(&self) -> bool {
    matches!(self.core.rc_deref().state, SubjectState::Terminated(_))
  }
}

impl<Item, Err> PublishSubject<Item, Err> {
  pub fn new() -> Self { Self::with_buffer(NoReplay) }
}

impl<Item, Err> Default for PublishSubject<Item, Err> {
  fn default() -> Self { Self::new() }
}

impl<Item, Err, B> Subject<Item, Err, B>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
  B: ReplayBuffer<Item> + 'static,
{
  /// A plain observable view of this subject.
  pub fn as_observable(&self) -> Observable<Item, Err> {
    let subject = self.clone();
    Observable::create(move |subscriber| subject.actual_subscribe(subscriber))
  }
}

impl<Item, Err, B> ObservableType<Item, Err> for Subject<Item, Err, B>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
  B: ReplayBuffer<Item> + 'static,
{
  fn actual_subscribe(&self, subscriber: Subscriber<Item, Err>) -> Subscription {
    let mut core = self.core.rc_deref_mut();
    match core.state.clone() {
      SubjectState::Live => {
        let id = core.observers.add(subscriber.clone());
        let replay = core.buffer.snapshot();
        drop(core);

        let weak = self.core.downgrade();
        subscriber.add_hook(Box::new(move || {
          if let Some(core) = weak.upgrade() {
            core.rc_deref_mut().observers.remove(id);
          }
        }));
        subscriber.emit_all(replay.into_iter().map(Notification::Next));
      }
      SubjectState::Terminated(terminal) => {
        let replay = core.buffer.snapshot_after_terminal();
        drop(core);
        subscriber.emit_all(
          replay.into_iter().map(Notification::Next).chain(iter::once(terminal.into_notification())),
        );
      }
      SubjectState::Disposed => {
        drop(core);
        subscriber.dispose();
      }
    }
    Subscription::new(subscriber)
  }
}

impl<Item, Err, B> Observer<Item, Err> for Subject<Item, Err, B>
where
  Item: Clone,
  Err: Clone,
  B: ReplayBuffer<Item>,
{
  fn on_notification(&mut self, notification: Notification<Item, Err>) {
    {
      let mut core = self.core.rc_deref_mut();
      if core.emitting {
        core.queued.push_back(notification);
        return;
      }
      core.emitting = true;
    }

    let mut notification = notification;
    loop {
      self.dispatch(notification);
      let mut core = self.core.rc_deref_mut();
      match core.queued.pop_front() {
        Some(queued) => notification = queued,
        None => {
          core.emitting = false;
          return;
        }
      }
    }
  }

  fn is_closed(&self) -> bool { !matches!(self.core.rc_deref().state, SubjectState::Live) }
}

impl<Item, Err, B> Subject<Item, Err, B>
where
  Item: Clone,
  Err: Clone,
  B: ReplayBuffer<Item>,
{
  /// Broadcast one notification to the subscribers attached right now.
  fn dispatch(&self, notification: Notification<Item, Err>) {
    let mut core = self.core.rc_deref_mut();
    if !matches!(core.state, SubjectState::Live) {
      debug!(?notification, "subject is no longer live, emission ignored");
      return;
    }
    match notification.into_terminal() {
      Err(value) => {
        core.buffer.record(&value);
        let observers = core.observers.snapshot();
        drop(core);
        broadcast(observers, value);
      }
      Ok(terminal) => {
        core.state = SubjectState::Terminated(terminal.clone());
        let observers: SmallVec<[_; 2]> = core.observers.drain().collect();
        drop(core);
        for mut observer in observers {
          observer.on_notification(terminal.clone().into_notification());
        }
      }
    }
  }
}

/// Hand `value` to every subscriber, cloning it for all but the last.
fn broadcast<Item: Clone, Err>(observers: SmallVec<[Subscriber<Item, Err>; 2]>, value: Item) {
  let mut observers = observers.into_iter().peekable();
  while let Some(mut observer) = observers.next() {
    if observers.peek().is_none() {
      observer.next(value);
      return;
    }
    observer.next(value.clone());
  }
}

/// Disposing a subject detaches every subscriber without a terminal
/// notification (their `on_disposed` hooks run), forgets the replay state and
/// ignores anything emitted afterwards. Later subscribers are disposed at
/// once.
impl<Item, Err, B> Disposable for Subject<Item, Err, B>
where
  B: ReplayBuffer<Item>,
{
  fn dispose(&self) {
    let mut core = self.core.rc_deref_mut();
    if matches!(core.state, SubjectState::Disposed) {
      return;
    }
    core.state = SubjectState::Disposed;
    core.buffer.clear();
    core.queued.clear();
    let observers: SmallVec<[_; 2]> = core.observers.drain().collect();
    drop(core);
    debug!(observers = observers.len(), "subject disposed");
    for observer in observers {
      observer.dispose();
    }
  }

  fn is_disposed(&self) -> bool { matches!(self.core.rc_deref().state, SubjectState::Disposed) }
}
