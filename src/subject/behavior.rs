use super::{BehaviorSubject, LatestValue, Subject};
use crate::{error::SubjectError, rc::RcDeref};

impl<Item: Clone, Err> BehaviorSubject<Item, Err> {
  /// A behavior subject whose current value starts out as `initial`.
  pub fn new(initial: Item) -> Self { Subject::with_buffer(LatestValue::new(initial)) }

  /// The value a new subscriber would receive first.
  ///
  /// The value survives termination. It is only unavailable once the
  /// subject has been disposed.
  pub fn current_value(&self) -> Result<Item, SubjectError> {
    self.core.rc_deref().buffer.latest().cloned().ok_or(SubjectError::ValueUnavailable)
  }
}
