use std::convert::Infallible;

use crate::{
  future::{resolver, ResultFuture},
  notification::Notification,
  observable::{Observable, ObservableType},
  observer::{BoxedObserver, DisposeHook, Observer},
  subscriber::Subscriber,
  subscription::{Disposable, Subscription},
};

/// What a [`Completable`] producer may report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletableEvent<E> {
  Completed,
  Error(E),
}

/// The producer side of a [`Completable`].
pub struct CompletableObserver<E> {
  subscriber: Subscriber<Infallible, E>,
}

impl<E> CompletableObserver<E> {
  pub fn completed(&mut self) { self.subscriber.complete() }

  pub fn error(&mut self, err: E) { self.subscriber.error(err) }

  pub fn on(&mut self, event: CompletableEvent<E>) {
    match event {
      CompletableEvent::Completed => self.completed(),
      CompletableEvent::Error(e) => self.error(e),
    }
  }

  pub fn is_closed(&self) -> bool { self.subscriber.is_closed() }
}

/// An observable that carries no value, only whether the work finished or
/// failed.
///
/// Its underlying stream has item type [`Infallible`], so a value
/// notification cannot even be constructed.
pub struct Completable<E> {
  source: Observable<Infallible, E>,
}

impl<E> Clone for Completable<E> {
  fn clone(&self) -> Self { Self { source: self.source.clone() } }
}

impl<E: 'static> Completable<E> {
  pub fn create<F, D>(producer: F) -> Self
  where
    F: Fn(CompletableObserver<E>) -> D + 'static,
    D: Disposable + 'static,
  {
    Self {
      source: Observable::create(move |subscriber| producer(CompletableObserver { subscriber })),
    }
  }

  pub fn empty() -> Self { Self::create(|mut completable| completable.completed()) }

  pub fn error(err: E) -> Self
  where
    E: Clone,
  {
    Self::create(move |mut completable| completable.error(err.clone()))
  }

  pub fn subscribe(&self, callbacks: CompletableCallbacks<E>) -> Subscription {
    let (observer, on_disposed) = callbacks.into_parts();
    self.source.subscribe_parts(observer, on_disposed)
  }

  pub fn as_observable(&self) -> Observable<Infallible, E> { self.source.clone() }

  pub fn into_future(self) -> ResultFuture<Result<(), E>> {
    let (resolver, receiver) = resolver();
    let (on_done, on_err, on_released) = (resolver.clone(), resolver.clone(), resolver);
    let subscription = self.subscribe(
      CompletableCallbacks::new()
        .on_completed(move || on_done.resolve(Ok(())))
        .on_error(move |e| on_err.resolve(Err(e)))
        .on_disposed(move || on_released.abandon()),
    );
    ResultFuture::new(receiver, subscription)
  }
}

/// Callbacks for a [`Completable`] subscription.
pub struct CompletableCallbacks<E> {
  on_completed: Option<Box<dyn FnOnce()>>,
  on_error: Option<Box<dyn FnOnce(E)>>,
  on_disposed: Option<DisposeHook>,
}

impl<E> Default for CompletableCallbacks<E> {
  fn default() -> Self { Self { on_completed: None, on_error: None, on_disposed: None } }
}

impl<E> CompletableCallbacks<E> {
  pub fn new() -> Self { Self::default() }

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
}

impl<E: 'static> CompletableCallbacks<E> {
  pub fn into_parts(mut self) -> (BoxedObserver<Infallible, E>, Option<DisposeHook>) {
    let disposed = self.on_disposed.take();
    (Box::new(self), disposed)
  }
}

impl<E> Observer<Infallible, E> for CompletableCallbacks<E> {
  fn on_notification(&mut self, notification: Notification<Infallible, E>) {
    match notification {
      Notification::Next(never) => match never {},
      Notification::Completed => {
        self.on_error = None;
        if let Some(f) = self.on_completed.take() {
          f();
        }
      }
      Notification::Error(e) => {
        self.on_completed = None;
        if let Some(f) = self.on_error.take() {
          f(e);
        }
      }
    }
  }
}
