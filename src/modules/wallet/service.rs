use super::repository::{Earning, Withdrawal};
use bigdecimal::{BigDecimal, Zero};
use chrono::{Datelike, NaiveDateTime};
use itertools::Itertools;
use serde::Serialize;

pub const MINIMUM_WITHDRAWAL: i32 = 100;

#[derive(Debug, PartialEq, Eq)]
pub enum WithdrawalError {
    BelowMinimum,
    InsufficientFunds,
}

/// What the provider keeps once the platform fee is taken, to the cent.
pub fn net_of_commission(amount: &BigDecimal, rate: &BigDecimal) -> BigDecimal {
    (amount.clone() - amount * rate).round(2)
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub monthly_earnings: BigDecimal,
    pub completed_jobs: usize,
    pub average_per_job: BigDecimal,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub label: String,
    pub amount: BigDecimal,
    pub status: String,
    pub date: NaiveDateTime,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub balance: BigDecimal,
    pub total_earned: BigDecimal,
    pub total_withdrawn: BigDecimal,
    pub pending_withdrawals: BigDecimal,
    pub pending: BigDecimal,
    pub commission_rate: BigDecimal,
    pub stats: Stats,
    pub transactions: Vec<Transaction>,
}

fn sum<'a>(amounts: impl Iterator<Item = &'a BigDecimal>) -> BigDecimal {
    amounts.fold(BigDecimal::zero(), |total, amount| total + amount)
}

pub fn summarize(
    earnings: &[Earning],
    withdrawals: &[Withdrawal],
    rate: &BigDecimal,
    now: NaiveDateTime,
) -> Summary {
    let nets = earnings
        .iter()
        .map(|earning| net_of_commission(&earning.amount, rate))
        .collect::<Vec<_>>();

    let total_earned = sum(nets.iter());
    let total_withdrawn = sum(withdrawals.iter().map(|withdrawal| &withdrawal.amount));
    let pending_withdrawals = sum(
        withdrawals
            .iter()
            .filter(|withdrawal| withdrawal.is_pending())
            .map(|withdrawal| &withdrawal.amount),
    );

    let monthly_earnings = sum(
        earnings
            .iter()
            .zip(nets.iter())
            .filter(|(earning, _)| {
                earning.paid_at.year() == now.year() && earning.paid_at.month() == now.month()
            })
            .map(|(_, net)| net),
    );

    let average_per_job = match earnings.len() {
        0 => BigDecimal::zero(),
        count => (total_earned.clone() / BigDecimal::from(count as u64)).round(2),
    };

    let transactions = earnings
        .iter()
        .zip(nets.iter())
        .map(|(earning, net)| Transaction {
            id: earning.payment_id.clone(),
            kind: "earning",
            label: earning.service_name.clone(),
            amount: net.clone(),
            status: "completed".to_string(),
            date: earning.paid_at,
        })
        .chain(withdrawals.iter().map(|withdrawal| Transaction {
            id: withdrawal.id.clone(),
            kind: "withdrawal",
            label: "Retrait".to_string(),
            amount: withdrawal.amount.clone(),
            status: withdrawal.status.clone(),
            date: withdrawal.created_at,
        }))
        .sorted_by(|a, b| b.date.cmp(&a.date))
        .collect::<Vec<_>>();

    Summary {
        balance: total_earned.clone() - total_withdrawn.clone(),
        total_earned,
        total_withdrawn,
        pending: pending_withdrawals.clone(),
        pending_withdrawals,
        commission_rate: rate.clone(),
        stats: Stats {
            monthly_earnings,
            completed_jobs: earnings.len(),
            average_per_job,
        },
        transactions,
    }
}

pub fn check_withdrawal(amount: &BigDecimal, balance: &BigDecimal) -> Result<(), WithdrawalError> {
    if *amount < BigDecimal::from(MINIMUM_WITHDRAWAL) {
        return Err(WithdrawalError::BelowMinimum);
    }

    if amount > balance {
        return Err(WithdrawalError::InsufficientFunds);
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn earning(id: &str, amount: i32, paid_at: NaiveDateTime) -> Earning {
        Earning {
            payment_id: id.to_string(),
            job_id: format!("job-{}", id),
            service_name: "Débouchage".to_string(),
            amount: BigDecimal::from(amount),
            paid_at,
        }
    }

    fn withdrawal(id: &str, amount: i32, status: &str, created_at: NaiveDateTime) -> Withdrawal {
        Withdrawal {
            id: id.to_string(),
            provider_id: "provider-1".to_string(),
            amount: BigDecimal::from(amount),
            status: status.to_string(),
            created_at,
        }
    }

    fn rate() -> BigDecimal {
        BigDecimal::from_str("0.15").unwrap()
    }

    #[test]
    fn takes_the_commission_off_each_payment() {
        assert_eq!(
            net_of_commission(&BigDecimal::from(200), &rate()),
            BigDecimal::from_str("170.00").unwrap()
        );
        assert_eq!(
            net_of_commission(&BigDecimal::from_str("99.99").unwrap(), &rate()),
            BigDecimal::from_str("84.99").unwrap()
        );
    }

    #[test]
    fn balance_is_net_earnings_minus_every_withdrawal() {
        let summary = summarize(
            &[
                earning("p1", 200, at(2026, 10, 2)),
                earning("p2", 400, at(2026, 9, 20)),
            ],
            &[
                withdrawal("w1", 100, "pending", at(2026, 10, 3)),
                withdrawal("w2", 150, "paid", at(2026, 9, 25)),
            ],
            &rate(),
            at(2026, 10, 16),
        );

        assert_eq!(summary.total_earned, BigDecimal::from(510));
        assert_eq!(summary.total_withdrawn, BigDecimal::from(250));
        assert_eq!(summary.balance, BigDecimal::from(260));
        assert_eq!(summary.pending_withdrawals, BigDecimal::from(100));
        assert_eq!(summary.stats.monthly_earnings, BigDecimal::from(170));
        assert_eq!(summary.stats.completed_jobs, 2);
        assert_eq!(summary.stats.average_per_job, BigDecimal::from(255));
    }

    #[test]
    fn transactions_are_newest_first() {
        let summary = summarize(
            &[earning("p1", 200, at(2026, 10, 2))],
            &[withdrawal("w1", 100, "pending", at(2026, 10, 3))],
            &rate(),
            at(2026, 10, 16),
        );

        let kinds = summary
            .transactions
            .iter()
            .map(|transaction| transaction.kind)
            .collect::<Vec<_>>();
        assert_eq!(kinds, vec!["withdrawal", "earning"]);
    }

    #[test]
    fn empty_wallet() {
        let summary = summarize(&[], &[], &rate(), at(2026, 10, 16));
        assert_eq!(summary.balance, BigDecimal::zero());
        assert_eq!(summary.stats.average_per_job, BigDecimal::zero());
        assert!(summary.transactions.is_empty());
    }

    #[test]
    fn withdrawals_need_at_least_one_hundred_and_enough_funds() {
        let balance = BigDecimal::from(250);

        assert_eq!(
            check_withdrawal(&BigDecimal::from(99), &balance),
            Err(WithdrawalError::BelowMinimum)
        );
        assert_eq!(
            check_withdrawal(&BigDecimal::from(251), &balance),
            Err(WithdrawalError::InsufficientFunds)
        );
        assert_eq!(check_withdrawal(&BigDecimal::from(100), &balance), Ok(()));
        assert_eq!(check_withdrawal(&BigDecimal::from(250), &balance), Ok(()));
    }
}
