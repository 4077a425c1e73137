//! Per-call inputs that are not part of the document data

use chrono::{DateTime, FixedOffset, NaiveDate};
use rand::RngCore;

/// Fixed part of a generated document number
pub const DOCUMENT_NUMBER_PREFIX: &str = "GD-B-214";

/// Randomness and clock for one generation call.
///
/// Both are injected so that callers (and tests) can pin the only
/// non-deterministic parts of a document: its number and its fallback date.
pub struct BuildContext<'a> {
    rng: &'a mut dyn RngCore,
    now: DateTime<FixedOffset>,
}

impl<'a> BuildContext<'a> {
    pub fn new(rng: &'a mut dyn RngCore, now: DateTime<FixedOffset>) -> Self {
        Self { rng, now }
    }

    /// Generation time
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }

    /// Calendar date of the generation time, in its own offset
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// `GD-B-214` followed by three random digits
    pub fn document_number(&mut self) -> String {
        format!("{}{:03}", DOCUMENT_NUMBER_PREFIX, self.rng.next_u32() % 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 4, 18, 23, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_document_number_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = BuildContext::new(&mut rng, fixed_now());
        let pattern = regex::Regex::new(r"^GD-B-214\d{3}$").unwrap();
        for _ in 0..50 {
            let number = ctx.document_number();
            assert!(pattern.is_match(&number), "unexpected number {}", number);
        }
    }

    #[test]
    fn test_same_seed_same_number() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let first = BuildContext::new(&mut a, fixed_now()).document_number();
        let second = BuildContext::new(&mut b, fixed_now()).document_number();
        assert_eq!(first, second);
    }

    #[test]
    fn test_today_uses_local_offset() {
        let mut rng = StdRng::seed_from_u64(0);
        let ctx = BuildContext::new(&mut rng, fixed_now());
        // 23:30 at +08:00 is still the 18th locally
        assert_eq!(ctx.today(), NaiveDate::from_ymd_opt(2025, 4, 18).unwrap());
    }
}
