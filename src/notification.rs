//! The three kinds of event a stream can deliver.

use std::fmt::{Debug, Formatter};

/// A single event flowing from a producer to an observer.
///
/// `Error` and `Completed` are terminal: once either one has been delivered
/// the observer receives nothing else.
#[derive(Clone, PartialEq, Eq)]
pub enum Notification<Item, Err> {
  Next(Item),
  Error(Err),
  Completed,
}

impl<Item, Err> Notification<Item, Err> {
  #[inline]
  pub fn is_terminal(&self) -> bool { !matches!(self, Notification::Next(_)) }

  /// Split off the terminal part, handing back a value notification
  /// untouched.
  pub fn into_terminal(self) -> Result<Terminal<Err>, Item> {
    match self {
      Notification::Next(v) => Err(v),
      Notification::Error(e) => Ok(Terminal::Error(e)),
      Notification::Completed => Ok(Terminal::Completed),
    }
  }
}

impl<Item, Err> Debug for Notification<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Notification::Next(_) => f.write_str("Next(..)"),
      Notification::Error(_) => f.write_str("Error(..)"),
      Notification::Completed => f.write_str("Completed"),
    }
  }
}

/// The terminal half of [`Notification`], kept by subjects so late
/// subscribers can be told how the stream ended.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Terminal<Err> {
  Error(Err),
  Completed,
}

impl<Err> Terminal<Err> {
  pub fn into_notification<Item>(self) -> Notification<Item, Err> {
    match self {
      Terminal::Error(e) => Notification::Error(e),
      Terminal::Completed => Notification::Completed,
    }
  }
}

impl<Item, Err> From<Terminal<Err>> for Notification<Item, Err> {
  fn from(t: Terminal<Err>) -> Self { t.into_notification() }
}
