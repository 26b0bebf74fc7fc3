//! Accrual math for allocations.
//!
//! Everything in this module is a pure function of an allocation, its product
//! and an evaluation instant. Elapsed time is counted in whole days of a fixed
//! 24 hours, floored and never negative, and the same rule drives both the
//! eligibility gate and the countdown so the two can never disagree.

use chrono::{DateTime, Duration, Utc};

use super::models::allocation::Allocation;
use super::models::product::Product;

/// Whole days elapsed since `allocation_date`, clamped to zero under clock skew
pub fn elapsed_days(allocation_date: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (now - allocation_date).num_days().max(0) as u64
}

pub fn is_withdrawal_eligible(
    allocation_date: DateTime<Utc>,
    withdrawal_period: u32,
    now: DateTime<Utc>,
) -> bool {
    elapsed_days(allocation_date, now) >= u64::from(withdrawal_period)
}

/// Instant at which the cooldown ends, saturating at the latest representable instant
pub fn withdrawal_unlocks_at(allocation_date: DateTime<Utc>, withdrawal_period: u32) -> DateTime<Utc> {
    Duration::try_days(i64::from(withdrawal_period))
        .and_then(|period| allocation_date.checked_add_signed(period))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Derived accrual fields of an allocation at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccrualSnapshot {
    pub elapsed_days: u64,
    pub total_revenue: f64,
    pub can_withdraw: bool,
    pub withdrawn: bool,
}

impl AccrualSnapshot {
    pub fn compute(allocation: &Allocation, product: &Product, now: DateTime<Utc>) -> Self {
        let elapsed_days = elapsed_days(allocation.allocation_date, now);

        if allocation.is_withdrawn() {
            return Self {
                elapsed_days,
                total_revenue: 0.0,
                can_withdraw: false,
                withdrawn: true,
            };
        }

        Self {
            elapsed_days,
            total_revenue: elapsed_days as f64 * allocation.daily_revenue,
            can_withdraw: is_withdrawal_eligible(allocation.allocation_date, product.withdrawal_period, now),
            withdrawn: false,
        }
    }

    /// Whether the stored record should be overwritten with this snapshot.
    /// Nothing is written before the first full day or after withdrawal.
    pub fn should_persist(&self) -> bool {
        !self.withdrawn && self.elapsed_days > 0
    }

    /// True when the snapshot already matches what is stored
    pub fn matches(&self, allocation: &Allocation) -> bool {
        allocation.total_revenue == self.total_revenue && allocation.can_withdraw == self.can_withdraw
    }
}

/// Countdown until the withdrawal gate opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawalCountdown {
    EligibleNow,
    Remaining { days: i64, hours: i64, minutes: i64 },
}

impl WithdrawalCountdown {
    pub fn is_eligible(&self) -> bool {
        matches!(self, WithdrawalCountdown::EligibleNow)
    }
}

/// Time left before `allocation_date + withdrawal_period` days
pub fn remaining_time(
    allocation_date: DateTime<Utc>,
    withdrawal_period: u32,
    now: DateTime<Utc>,
) -> WithdrawalCountdown {
    let remaining = withdrawal_unlocks_at(allocation_date, withdrawal_period) - now;
    if remaining <= Duration::zero() {
        return WithdrawalCountdown::EligibleNow;
    }

    WithdrawalCountdown::Remaining {
        days: remaining.num_days(),
        hours: remaining.num_hours() % 24,
        minutes: remaining.num_minutes() % 60,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::payment::PaymentDetails;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    fn iphone() -> Product {
        Product {
            id: "iphone-15-pro".to_string(),
            name: "iPhone 15 Pro".to_string(),
            category: "iPhone".to_string(),
            price: 999.0,
            image: String::new(),
            description: String::new(),
            daily_revenue: 15.5,
            withdrawal_period: 7,
        }
    }

    fn allocation() -> Allocation {
        Allocation {
            id: "allocation::test".to_string(),
            user_id: "user-1".to_string(),
            product_id: "iphone-15-pro".to_string(),
            allocation_date: start(),
            total_paid: 999.0,
            payment_method: PaymentDetails::PayPal { email: "a@b.co".to_string() },
            daily_revenue: 15.5,
            total_revenue: 0.0,
            can_withdraw: false,
            withdrawn_at: None,
        }
    }

    #[test]
    fn test_elapsed_days_floors_partial_days() {
        assert_eq!(elapsed_days(start(), start()), 0);
        assert_eq!(elapsed_days(start(), start() + Duration::hours(23)), 0);
        assert_eq!(elapsed_days(start(), start() + Duration::hours(24)), 1);
        assert_eq!(elapsed_days(start(), start() + Duration::days(3) + Duration::hours(23)), 3);
    }

    #[test]
    fn test_elapsed_days_clamps_clock_skew() {
        assert_eq!(elapsed_days(start(), start() - Duration::hours(1)), 0);
        assert_eq!(elapsed_days(start(), start() - Duration::days(5)), 0);
    }

    #[test]
    fn test_snapshot_before_period() {
        let snapshot = AccrualSnapshot::compute(&allocation(), &iphone(), start() + Duration::days(3));
        assert_eq!(snapshot.elapsed_days, 3);
        assert_eq!(snapshot.total_revenue, 46.5);
        assert!(!snapshot.can_withdraw);
        assert!(snapshot.should_persist());
    }

    #[test]
    fn test_snapshot_at_period() {
        let snapshot = AccrualSnapshot::compute(&allocation(), &iphone(), start() + Duration::days(7));
        assert_eq!(snapshot.total_revenue, 108.5);
        assert!(snapshot.can_withdraw);
    }

    #[test]
    fn test_snapshot_of_withdrawn_allocation_stays_zero() {
        let mut withdrawn = allocation();
        withdrawn.mark_withdrawn(start() + Duration::days(7));

        let snapshot = AccrualSnapshot::compute(&withdrawn, &iphone(), start() + Duration::days(20));
        assert_eq!(snapshot.total_revenue, 0.0);
        assert!(!snapshot.can_withdraw);
        assert!(!snapshot.should_persist());
    }

    #[test]
    fn test_snapshot_on_first_day_is_not_persisted() {
        let snapshot = AccrualSnapshot::compute(&allocation(), &iphone(), start() + Duration::hours(5));
        assert_eq!(snapshot.elapsed_days, 0);
        assert_eq!(snapshot.total_revenue, 0.0);
        assert!(!snapshot.should_persist());
    }

    #[test]
    fn test_revenue_is_monotonic_until_withdrawal() {
        let product = iphone();
        let allocation = allocation();
        let mut previous = 0.0;
        for hours in (0..24 * 30).step_by(7) {
            let snapshot = AccrualSnapshot::compute(&allocation, &product, start() + Duration::hours(hours));
            assert!(snapshot.total_revenue >= previous);
            previous = snapshot.total_revenue;
        }
    }

    #[test]
    fn test_eligibility_follows_withdrawal_period() {
        let product = iphone();
        let allocation = allocation();
        for day in 0..20 {
            let now = start() + Duration::days(day) + Duration::minutes(1);
            let snapshot = AccrualSnapshot::compute(&allocation, &product, now);
            assert_eq!(snapshot.can_withdraw, day >= 7, "day {}", day);
        }
    }

    #[test]
    fn test_remaining_time_breakdown() {
        let now = start() + Duration::days(4) + Duration::hours(2) + Duration::minutes(20);
        assert_eq!(
            remaining_time(start(), 7, now),
            WithdrawalCountdown::Remaining { days: 2, hours: 21, minutes: 40 }
        );
    }

    #[test]
    fn test_remaining_time_under_clock_skew_counts_full_period() {
        let now = start() - Duration::hours(1);
        assert_eq!(
            remaining_time(start(), 7, now),
            WithdrawalCountdown::Remaining { days: 7, hours: 1, minutes: 0 }
        );
    }

    #[test]
    fn test_unrepresentable_period_never_unlocks() {
        assert_eq!(withdrawal_unlocks_at(start(), u32::MAX), DateTime::<Utc>::MAX_UTC);

        let now = start() + Duration::days(2);
        let countdown = remaining_time(start(), u32::MAX, now);
        assert!(matches!(countdown, WithdrawalCountdown::Remaining { days, .. } if days > 0));
        assert!(!is_withdrawal_eligible(start(), u32::MAX, now));
    }

    #[test]
    fn test_countdown_agrees_with_gate_at_crossover() {
        let unlock = withdrawal_unlocks_at(start(), 7);
        for offset_ms in [-60_000, -1_000, -1, 0, 1, 1_000, 60_000] {
            let now = unlock + Duration::milliseconds(offset_ms);
            assert_eq!(
                remaining_time(start(), 7, now).is_eligible(),
                is_withdrawal_eligible(start(), 7, now),
                "offset {}ms",
                offset_ms
            );
        }
        assert!(!is_withdrawal_eligible(start(), 7, unlock - Duration::milliseconds(1)));
        assert!(is_withdrawal_eligible(start(), 7, unlock));
    }
}
