//! The three subject variants side by side: each gets four values, then a
//! late subscriber, then one more value and completion.
//!
//! Run with `cargo run --example subject_tour`.

use rxlite::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn observe<B>(name: &'static str, subject: &Subject<String, String, B>, bag: &DisposeBag)
where
  B: ReplayBuffer<String> + 'static,
{
  subject
    .subscribe_with(
      Callbacks::new()
        .on_next(move |v| info!("{name}: onNext: {v}"))
        .on_error(move |e| info!("{name}: onError: {e}"))
        .on_completed(move || info!("{name}: onCompleted"))
        .on_disposed(move || info!("{name}: onDisposed")),
    )
    .disposed_by(bag);
}

fn feed<B>(name: &'static str, mut subject: Subject<String, String, B>, bag: &DisposeBag)
where
  B: ReplayBuffer<String> + 'static,
{
  for i in 1..=4 {
    subject.next(format!("ELEMENTO {i}"));
  }
  info!(observers = subject.observer_count(), "{name}: late subscriber attaching");
  observe(name, &subject, bag);
  subject.next("ELEMENTO 5".to_string());
  subject.complete();
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();
  let bag = DisposeBag::new();

  feed("PublishSubject", PublishSubject::new(), &bag);
  feed("BehaviorSubject", BehaviorSubject::new("ELEMENTO ZERO".to_string()), &bag);
  feed("ReplaySubject(2)", ReplaySubject::new(2), &bag);

  let behavior = BehaviorSubject::<_, String>::new("ELEMENTO ZERO".to_string());
  match behavior.current_value() {
    Ok(v) => info!("BehaviorSubject: current value {v}"),
    Err(e) => info!("BehaviorSubject: {e}"),
  }
  behavior.dispose();
  if let Err(e) = behavior.current_value() {
    info!("BehaviorSubject after dispose: {e}");
  }
}
