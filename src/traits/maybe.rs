use crate::{
  future::{resolver, ResultFuture},
  notification::Notification,
  observable::{Observable, ObservableType},
  observer::{BoxedObserver, DisposeHook, Observer},
  subscriber::Subscriber,
  subscription::{Disposable, Subscription},
};

/// What a [`Maybe`] producer may report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaybeEvent<T, E> {
  Success(T),
  Completed,
  Error(E),
}

/// The producer side of a [`Maybe`].
pub struct MaybeObserver<T, E> {
  subscriber: Subscriber<T, E>,
}

impl<T, E> MaybeObserver<T, E> {
  /// Deliver the value, which also ends the stream.
  pub fn success(&mut self, value: T) {
    self.subscriber.emit_all([Notification::Next(value), Notification::Completed]);
  }

  /// End the stream without a value.
  pub fn completed(&mut self) { self.subscriber.complete() }

  pub fn error(&mut self, err: E) { self.subscriber.error(err) }

  pub fn on(&mut self, event: MaybeEvent<T, E>) {
    match event {
      MaybeEvent::Success(v) => self.success(v),
      MaybeEvent::Completed => self.completed(),
      MaybeEvent::Error(e) => self.error(e),
    }
  }

  pub fn is_closed(&self) -> bool { self.subscriber.is_closed() }
}

/// An observable that ends with at most one value: a value, plain
/// completion, or an error.
///
/// Only the first of those reaches the subscriber. A producer that goes on
/// to send more has broken the protocol; the extra events are dropped and
/// logged.
pub struct Maybe<T, E> {
  source: Observable<T, E>,
}

impl<T, E> Clone for Maybe<T, E> {
  fn clone(&self) -> Self { Self { source: self.source.clone() } }
}

impl<T: 'static, E: 'static> Maybe<T, E> {
  pub fn create<F, D>(producer: F) -> Self
  where
    F: Fn(MaybeObserver<T, E>) -> D + 'static,
    D: Disposable + 'static,
  {
    Self { source: Observable::create(move |subscriber| producer(MaybeObserver { subscriber })) }
  }

  pub fn just(value: T) -> Self
  where
    T: Clone,
  {
    Self::create(move |mut maybe| maybe.success(value.clone()))
  }

  pub fn empty() -> Self { Self::create(|mut maybe| maybe.completed()) }

  pub fn error(err: E) -> Self
  where
    E: Clone,
  {
    Self::create(move |mut maybe| maybe.error(err.clone()))
  }

  pub fn subscribe(&self, callbacks: MaybeCallbacks<T, E>) -> Subscription {
    let (observer, on_disposed) = callbacks.into_parts();
    self.source.subscribe_parts(observer, on_disposed)
  }

  pub fn as_observable(&self) -> Observable<T, E> { self.source.clone() }

  /// Subscribe now and resolve with `Some(value)`, `None` on plain
  /// completion, or the error.
  pub fn into_future(self) -> ResultFuture<Result<Option<T>, E>> {
    let (resolver, receiver) = resolver();
    let (on_some, on_none, on_err, on_released) =
      (resolver.clone(), resolver.clone(), resolver.clone(), resolver);
    let subscription = self.subscribe(
      MaybeCallbacks::new()
        .on_success(move |v| on_some.resolve(Ok(Some(v))))
        .on_completed(move || on_none.resolve(Ok(None)))
        .on_error(move |e| on_err.resolve(Err(e)))
        .on_disposed(move || on_released.abandon()),
    );
    ResultFuture::new(receiver, subscription)
  }
}

/// Callbacks for a [`Maybe`] subscription. At most one of `on_success`,
/// `on_completed` and `on_error` runs.
pub struct MaybeCallbacks<T, E> {
  on_success: Option<Box<dyn FnOnce(T)>>,
  on_completed: Option<Box<dyn FnOnce()>>,
  on_error: Option<Box<dyn FnOnce(E)>>,
  on_disposed: Option<DisposeHook>,
}

impl<T, E> Default for MaybeCallbacks<T, E> {
  fn default() -> Self {
    Self { on_success: None, on_completed: None, on_error: None, on_disposed: None }
  }
}

impl<T, E> MaybeCallbacks<T, E> {
  pub fn new() -> Self { Self::default() }

  pub fn on_success(mut self, f: impl FnOnce(T) + 'static) -> Self {
    self.on_success = Some(Box::new(f));
    self
  }

  pub fn on_completed(mut self, f: impl FnOnce() + 'static) -> Self {
    self.on_completed = Some(Box::new(f));
    self
  }

  pub fn on_error(mut self, f: impl FnOnce(E) + 'static) -> Self {
    self.on_error = Some(Box::new(f));
    self
  }

  pub fn on_disposed(mut self, f: impl FnOnce() + 'static) -> Self {
    self.on_disposed = Some(Box::new(f));
    self
  }

  fn resolve(&mut self) {
    self.on_success = None;
    self.on_completed = None;
    self.on_error = None;
  }
}

impl<T: 'static, E: 'static> MaybeCallbacks<T, E> {
  pub fn into_parts(mut self) -> (BoxedObserver<T, E>, Option<DisposeHook>) {
    let disposed = self.on_disposed.take();
    (Box::new(self), disposed)
  }
}

impl<T, E> Observer<T, E> for MaybeCallbacks<T, E> {
  fn on_notification(&mut self, notification: Notification<T, E>) {
    match notification {
      Notification::Next(v) => {
        let f = self.on_success.take();
        self.resolve();
        if let Some(f) = f {
          f(v);
        }
      }
      // Following a success this finds the slot already cleared.
      Notification::Completed => {
        let f = self.on_completed.take();
        self.resolve();
        if let Some(f) = f {
          f();
        }
      }
      Notification::Error(e) => {
        let f = self.on_error.take();
        self.resolve();
        if let Some(f) = f {
          f(e);
        }
      }
    }
  }
}
