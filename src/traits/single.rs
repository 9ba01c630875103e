use crate::{
  future::{resolver, ResultFuture},
  notification::Notification,
  observable::{Observable, ObservableType},
  observer::{BoxedObserver, DisposeHook, Observer},
  subscriber::Subscriber,
  subscription::{Disposable, Subscription},
};

/// What a [`Single`] producer may report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingleEvent<T, E> {
  Success(T),
  Failure(E),
}

/// The producer side of a [`Single`].
pub struct SingleObserver<T, E> {
  subscriber: Subscriber<T, E>,
}

impl<T, E> SingleObserver<T, E> {
  /// Deliver the value, which also ends the stream.
  pub fn success(&mut self, value: T) {
    self.subscriber.emit_all([Notification::Next(value), Notification::Completed]);
  }

  pub fn failure(&mut self, err: E) { self.subscriber.error(err) }

  pub fn on(&mut self, event: SingleEvent<T, E>) {
    match event {
      SingleEvent::Success(v) => self.success(v),
      SingleEvent::Failure(e) => self.failure(e),
    }
  }

  /// Whether anything sent from now on would be dropped.
  pub fn is_closed(&self) -> bool { self.subscriber.is_closed() }
}

/// An observable that produces exactly one value or one error.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxlite::prelude::*;
///
/// let got = Rc::new(RefCell::new(None));
/// let g = got.clone();
///
/// Single::<_, String>::create(|mut single| single.success("Deu bom"))
///   .subscribe(SingleCallbacks::new().on_success(move |v| *g.borrow_mut() = Some(v)));
///
/// assert_eq!(*got.borrow(), Some("Deu bom"));
/// ```
pub struct Single<T, E> {
  source: Observable<T, E>,
}

impl<T, E> Clone for Single<T, E> {
  fn clone(&self) -> Self { Self { source: self.source.clone() } }
}

impl<T: 'static, E: 'static> Single<T, E> {
  /// Build a single from a producer. The producer receives a
  /// [`SingleObserver`] and returns the teardown for its resources.
  pub fn create<F, D>(producer: F) -> Self
  where
    F: Fn(SingleObserver<T, E>) -> D + 'static,
    D: Disposable + 'static,
  {
    Self { source: Observable::create(move |subscriber| producer(SingleObserver { subscriber })) }
  }

  pub fn just(value: T) -> Self
  where
    T: Clone,
  {
    Self::create(move |mut single| single.success(value.clone()))
  }

  pub fn error(err: E) -> Self
  where
    E: Clone,
  {
    Self::create(move |mut single| single.failure(err.clone()))
  }

  pub fn subscribe(&self, callbacks: SingleCallbacks<T, E>) -> Subscription {
    let (observer, on_disposed) = callbacks.into_parts();
    self.source.subscribe_parts(observer, on_disposed)
  }

  /// The underlying stream: one `Next` followed by `Completed`, or one
  /// `Error`.
  pub fn as_observable(&self) -> Observable<T, E> { self.source.clone() }

  /// Subscribe now and resolve with the outcome.
  pub fn into_future(self) -> ResultFuture<Result<T, E>> {
    let (resolver, receiver) = resolver();
    let (on_ok, on_err, on_released) = (resolver.clone(), resolver.clone(), resolver);
    let subscription = self.subscribe(
      SingleCallbacks::new()
        .on_success(move |v| on_ok.resolve(Ok(v)))
        .on_failure(move |e| on_err.resolve(Err(e)))
        .on_disposed(move || on_released.abandon()),
    );
    ResultFuture::new(receiver, subscription)
  }
}

/// Callbacks for a [`Single`] subscription. Exactly one of `on_success` and
/// `on_failure` runs, unless the subscription is disposed first.
pub struct SingleCallbacks<T, E> {
  on_success: Option<Box<dyn FnOnce(T)>>,
  on_failure: Option<Box<dyn FnOnce(E)>>,
  on_disposed: Option<DisposeHook>,
}

impl<T, E> Default for SingleCallbacks<T, E> {
  fn default() -> Self { Self { on_success: None, on_failure: None, on_disposed: None } }
}

impl<T, E> SingleCallbacks<T, E> {
  pub fn new() -> Self { Self::default() }

  pub fn on_success(mut self, f: impl FnOnce(T) + 'static) -> Self {
    self.on_success = Some(Box::new(f));
    self
  }

  pub fn on_failure(mut self, f: impl FnOnce(E) + 'static) -> Self {
    self.on_failure = Some(Box::new(f));
    self
  }

  pub fn on_disposed(mut self, f: impl FnOnce() + 'static) -> Self {
    self.on_disposed = Some(Box::new(f));
    self
  }
}

impl<T: 'static, E: 'static> SingleCallbacks<T, E> {
  pub fn into_parts(mut self) -> (BoxedObserver<T, E>, Option<DisposeHook>) {
    let disposed = self.on_disposed.take();
    (Box::new(self), disposed)
  }
}

impl<T, E> Observer<T, E> for SingleCallbacks<T, E> {
  fn on_notification(&mut self, notification: Notification<T, E>) {
    match notification {
      Notification::Next(v) => {
        self.on_failure = None;
        if let Some(f) = self.on_success.take() {
          f(v);
        }
      }
      Notification::Error(e) => {
        self.on_success = None;
        if let Some(f) = self.on_failure.take() {
          f(e);
        }
      }
      Notification::Completed => {}
    }
  }
}
