//! Academic semester derivation.
//!
//! The semester number is computed from the admission date and today, never
//! stored. The cutoff rule is deliberately a named function so the coarse
//! month-granular approximation can be revisited without touching callers.

use chrono::{Datelike, NaiveDate};

/// Whether `today` falls in the spring half of the academic year,
/// February through August inclusive.
pub fn spring_term_started(today: NaiveDate) -> bool {
  (2..=8).contains(&today.month())
}

/// Derive a student's current semester number.
///
/// Each elapsed calendar year contributes two semesters; one more is added
/// once the spring term of the current year has started. The result is
/// clamped to at least 1, so a student admitted today is always in their
/// first semester.
pub fn semester_number(admission: NaiveDate, today: NaiveDate) -> u8 {
  let years = i64::from(today.year() - admission.year()).max(0);
  let bump = i64::from(spring_term_started(today));
  (years * 2 + bump).clamp(1, i64::from(u8::MAX)) as u8
}

#[cfg(test)]
mod tests {
  use super::*;

  fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
  }

  #[test]
  fn admission_today_is_first_semester() {
    assert_eq!(semester_number(d(2024, 6, 15), d(2024, 6, 15)), 1);
    assert_eq!(semester_number(d(2024, 10, 1), d(2024, 10, 1)), 1);
  }

  #[test]
  fn first_autumn_is_first_semester() {
    assert_eq!(semester_number(d(2024, 9, 1), d(2024, 12, 20)), 1);
  }

  #[test]
  fn two_years_later_in_june_is_fifth_semester() {
    assert_eq!(semester_number(d(2024, 9, 1), d(2026, 6, 10)), 5);
  }

  #[test]
  fn spring_cutoff_boundaries() {
    assert!(!spring_term_started(d(2025, 1, 31)));
    assert!(spring_term_started(d(2025, 2, 1)));
    assert!(spring_term_started(d(2025, 8, 31)));
    assert!(!spring_term_started(d(2025, 9, 1)));
  }

  #[test]
  fn always_positive() {
    for (adm, now) in [
      (d(2020, 9, 1), d(2020, 9, 1)),
      (d(2020, 9, 1), d(2020, 10, 2)),
      (d(2020, 1, 1), d(2020, 1, 2)),
      (d(2010, 2, 28), d(2026, 8, 30)),
    ] {
      assert!(semester_number(adm, now) >= 1);
    }
  }
}
