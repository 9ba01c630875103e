use std::collections::VecDeque;

/// What a subject remembers of the values it has broadcast, and so what it
/// replays to a new subscriber.
pub trait ReplayBuffer<Item> {
  /// Remember a value that is being broadcast.
  fn record(&mut self, value: &Item);

  /// The values a subscriber attaching to a live subject receives first,
  /// oldest first.
  fn snapshot(&self) -> Vec<Item>;

  /// The values a subscriber attaching after termination receives before the
  /// terminal notification.
  fn snapshot_after_terminal(&self) -> Vec<Item> { self.snapshot() }

  /// Forget everything.
  fn clear(&mut self);
}

/// Remembers nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReplay;

impl<Item> ReplayBuffer<Item> for NoReplay {
  #[inline]
  fn record(&mut self, _: &Item) {}

  #[inline]
  fn snapshot(&self) -> Vec<Item> { Vec::new() }

  #[inline]
  fn clear(&mut self) {}
}

/// Remembers the latest value only. It starts out with a seed value, and is
/// emptied when the subject is disposed.
#[derive(Debug, Clone)]
pub struct LatestValue<Item>(Option<Item>);

impl<Item> LatestValue<Item> {
  pub fn new(seed: Item) -> Self { Self(Some(seed)) }

  pub fn latest(&self) -> Option<&Item> { self.0.as_ref() }
}

impl<Item: Clone> ReplayBuffer<Item> for LatestValue<Item> {
  fn record(&mut self, value: &Item) { self.0 = Some(value.clone()) }

  fn snapshot(&self) -> Vec<Item> { self.0.iter().cloned().collect() }

  /// A terminated behavior subject has no current value to offer.
  fn snapshot_after_terminal(&self) -> Vec<Item> { Vec::new() }

  fn clear(&mut self) { self.0 = None }
}

/// Remembers the most recent values, up to a fixed capacity or without bound.
///
/// When full, recording a value evicts the oldest one; the retained values
/// keep their relative order.
#[derive(Debug, Clone)]
pub struct RingBuffer<Item> {
  capacity: Option<usize>,
  values: VecDeque<Item>,
}

impl<Item> RingBuffer<Item> {
  /// A buffer retaining at most `capacity` values. A capacity of 0 retains
  /// nothing.
  pub fn with_capacity(capacity: usize) -> Self {
    Self { capacity: Some(capacity), values: VecDeque::with_capacity(capacity) }
  }

  pub fn unbounded() -> Self { Self { capacity: None, values: VecDeque::new() } }

  pub fn capacity(&self) -> Option<usize> { self.capacity }

  pub fn len(&self) -> usize { self.values.len() }

  pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

impl<Item: Clone> ReplayBuffer<Item> for RingBuffer<Item> {
  fn record(&mut self, value: &Item) {
    match self.capacity {
      Some(0) => {}
      Some(capacity) => {
        if self.values.len() == capacity {
          self.values.pop_front();
        }
        self.values.push_back(value.clone());
      }
      None => self.values.push_back(value.clone()),
    }
  }

  fn snapshot(&self) -> Vec<Item> { self.values.iter().cloned().collect() }

  fn clear(&mut self) { self.values.clear() }
}
