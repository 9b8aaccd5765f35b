//! Clock abstraction so admission-date validation and semester derivation
//! are testable with a fixed "today".

use chrono::{NaiveDate, Utc};

pub trait Clock: Send + Sync {
  fn today(&self) -> NaiveDate;
}

/// The production clock, reading the current UTC date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn today(&self) -> NaiveDate {
    Utc::now().date_naive()
  }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
  fn today(&self) -> NaiveDate {
    self.0
  }
}
