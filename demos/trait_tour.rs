//! One screen, one dispose bag, and the three traits.
//!
//! Run with `cargo run --example trait_tour`. The default `info` level shows
//! the reports and the engine's warnings for the Maybe producer that keeps
//! talking after its first outcome; `RUST_LOG=debug` adds the engine's
//! debug diagnostics.

use std::rc::Rc;

use rxlite::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Where the screen reports what its subscriptions hear.
trait Reporter {
  fn report(&self, line: &str);
}

struct LogReporter;

impl Reporter for LogReporter {
  fn report(&self, line: &str) { info!("{line}") }
}

/// The owner of every subscription it creates. Dropping the screen drops
/// its bag, which releases them all.
struct Screen {
  reporter: Rc<dyn Reporter>,
  bag: DisposeBag,
}

impl Screen {
  fn new(reporter: Rc<dyn Reporter>) -> Self { Self { reporter, bag: DisposeBag::new() } }

  fn load(&self) {
    self.single_trait();
    self.completable_trait();
    self.maybe_trait();
  }

  fn fetch_single() -> Single<String, String> {
    Single::create(|mut single| {
      single.success("Deu bom".to_string());
    })
  }

  fn fetch_completable() -> Completable<String> {
    Completable::create(|mut completable| {
      completable.on(CompletableEvent::Completed);
    })
  }

  fn fetch_maybe() -> Maybe<String, String> {
    Maybe::create(|mut maybe| {
      maybe.success("Deu bom no Maybe".to_string());
      // Both are dropped: the first outcome already ended the stream.
      maybe.completed();
      maybe.error("Maybe trait".to_string());
    })
  }

  fn single_trait(&self) {
    let (r1, r2, r3) = (self.reporter.clone(), self.reporter.clone(), self.reporter.clone());
    Self::fetch_single()
      .subscribe(
        SingleCallbacks::new()
          .on_success(move |v| r1.report(&format!("Single: onSuccess: {v}")))
          .on_failure(move |e| r2.report(&format!("Single: onFailure: {e}")))
          .on_disposed(move || r3.report("Single: onDisposed")),
      )
      .disposed_by(&self.bag);
  }

  fn completable_trait(&self) {
    let (r1, r2, r3) = (self.reporter.clone(), self.reporter.clone(), self.reporter.clone());
    Self::fetch_completable()
      .subscribe(
        CompletableCallbacks::new()
          .on_completed(move || r1.report("Completable: onCompleted"))
          .on_error(move |e| r2.report(&format!("Completable: onError: {e}")))
          .on_disposed(move || r3.report("Completable: onDisposed")),
      )
      .disposed_by(&self.bag);
  }

  fn maybe_trait(&self) {
    let r = &self.reporter;
    let (r1, r2, r3, r4) = (r.clone(), r.clone(), r.clone(), r.clone());
    Self::fetch_maybe()
      .subscribe(
        MaybeCallbacks::new()
          .on_success(move |v| r1.report(&format!("Maybe: onSuccess: {v}")))
          .on_error(move |e| r2.report(&format!("Maybe: onError: {e}")))
          .on_completed(move || r3.report("Maybe: onCompleted"))
          .on_disposed(move || r4.report("Maybe: onDisposed")),
      )
      .disposed_by(&self.bag);
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let screen = Screen::new(Rc::new(LogReporter));
  screen.load();
  info!(bag = ?screen.bag, "screen loaded");
  drop(screen);
}
