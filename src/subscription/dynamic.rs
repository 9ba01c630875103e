use smallvec::SmallVec;

use super::Disposable;

/// An insertion-ordered container of handles, each addressable by the id it
/// was given on insertion.
///
/// Subjects keep their attached subscribers here: `add` hands back the id the
/// subscription later uses to detach itself, `remove` keeps the relative
/// order of whatever remains.
///
/// # Examples
///
/// ```rust
/// use rxlite::subscription::DynamicSubscriptions;
///
/// let mut subs = DynamicSubscriptions::default();
/// let a = subs.add("a");
/// let _b = subs.add("b");
/// let _c = subs.add("c");
///
/// assert_eq!(subs.remove(a), Some("a"));
/// assert_eq!(subs.iter().copied().collect::<Vec<_>>(), vec!["b", "c"]);
/// assert_eq!(subs.remove(a), None);
/// ```
pub struct DynamicSubscriptions<U> {
  next_id: usize,
  items: SmallVec<[(usize, U); 2]>,
}

impl<U> Default for DynamicSubscriptions<U> {
  fn default() -> Self { Self { next_id: 0, items: SmallVec::new() } }
}

impl<U> DynamicSubscriptions<U> {
  #[inline]
  pub fn new() -> Self { Self::default() }

  /// Add an item and return its unique ID.
  #[inline]
  pub fn add(&mut self, item: U) -> usize {
    let id = self.next_id;
    self.next_id += 1;
    self.items.push((id, item));
    id
  }

  /// Remove an item by ID.
  pub fn remove(&mut self, id: usize) -> Option<U> {
    self.items.iter().position(|(i, _)| *i == id).map(|pos| self.items.remove(pos).1)
  }

  #[inline]
  pub fn contains(&self, id: usize) -> bool { self.items.iter().any(|(i, _)| *i == id) }

  #[inline]
  pub fn len(&self) -> usize { self.items.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  /// Take every item out, oldest first.
  #[inline]
  pub fn drain(&mut self) -> impl Iterator<Item = U> + '_ { self.items.drain(..).map(|(_, item)| item) }

  #[inline]
  pub fn iter(&self) -> impl Iterator<Item = &U> { self.items.iter().map(|(_, item)| item) }
}

impl<U: Clone> DynamicSubscriptions<U> {
  /// Clone the current items so they can be visited without holding a
  /// borrow of the container.
  pub fn snapshot(&self) -> SmallVec<[U; 2]> { self.iter().cloned().collect() }
}

impl<U: Disposable> DynamicSubscriptions<U> {
  /// Dispose all items and clear the container.
  pub fn dispose_all(&mut self) {
    for item in self.drain() {
      item.dispose();
    }
  }
}
