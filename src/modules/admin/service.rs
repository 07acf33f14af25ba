use super::repository::{ActivityEvent, PendingProvider, SelectedService, SettledJob};
use bigdecimal::{BigDecimal, One, Zero};
use chrono::NaiveDateTime;
use itertools::Itertools;
use serde::Serialize;

pub const ACTIVITY_LIMIT: usize = 10;

/// Newest first across every feed, capped at [`ACTIVITY_LIMIT`].
pub fn merge_activity(feeds: Vec<Vec<ActivityEvent>>) -> Vec<ActivityEvent> {
    feeds
        .into_iter()
        .kmerge_by(|a, b| a.date > b.date)
        .take(ACTIVITY_LIMIT)
        .collect()
}

pub fn is_valid_rate(rate: &BigDecimal) -> bool {
    *rate >= BigDecimal::zero() && *rate <= BigDecimal::one()
}

pub fn platform_fee(amount: &BigDecimal, rate: &BigDecimal) -> BigDecimal {
    (amount.clone() * rate.clone()).round(2)
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Commission {
    pub job_id: String,
    pub date: NaiveDateTime,
    pub service: String,
    pub provider: Option<String>,
    pub amount: BigDecimal,
    pub platform_fee: BigDecimal,
    pub net: BigDecimal,
}

pub fn commissions(jobs: Vec<SettledJob>, rate: &BigDecimal) -> Vec<Commission> {
    jobs.into_iter()
        .map(|job| {
            let platform_fee = platform_fee(&job.amount, rate);
            Commission {
                net: job.amount.clone() - platform_fee.clone(),
                platform_fee,
                job_id: job.job_id,
                date: job.date,
                service: job.service,
                provider: job.provider,
                amount: job.amount,
            }
        })
        .collect()
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PendingProviderWithServices {
    #[serde(flatten)]
    pub provider: PendingProvider,
    pub services: Vec<SelectedService>,
}

pub fn attach_services(
    providers: Vec<PendingProvider>,
    services: Vec<SelectedService>,
) -> Vec<PendingProviderWithServices> {
    let mut services_by_provider = services
        .into_iter()
        .into_group_map_by(|service| service.provider_id.clone());

    providers
        .into_iter()
        .map(|provider| PendingProviderWithServices {
            services: services_by_provider
                .remove(&provider.user_id)
                .unwrap_or_default(),
            provider,
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, Utc};
    use std::str::FromStr;

    fn event(kind: &str, minutes_ago: i64) -> ActivityEvent {
        ActivityEvent {
            kind: kind.to_string(),
            reference_id: format!("{}-{}", kind, minutes_ago),
            title: kind.to_string(),
            date: Utc::now().naive_utc() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn activity_is_merged_newest_first() {
        let merged = merge_activity(vec![
            vec![event("registration", 1), event("registration", 30)],
            vec![event("order", 5), event("order", 10)],
            vec![event("payment", 2)],
        ]);

        assert_eq!(
            merged.iter().map(|e| e.reference_id.as_str()).collect::<Vec<_>>(),
            vec!["registration-1", "payment-2", "order-5", "order-10", "registration-30"]
        );
    }

    #[test]
    fn activity_is_capped() {
        let feed = (0..8).map(|i| event("order", i)).collect::<Vec<_>>();
        let merged = merge_activity(vec![feed.clone(), feed]);
        assert_eq!(merged.len(), ACTIVITY_LIMIT);
    }

    #[test]
    fn rate_must_be_a_fraction() {
        assert!(is_valid_rate(&BigDecimal::from_str("0.15").unwrap()));
        assert!(is_valid_rate(&BigDecimal::zero()));
        assert!(is_valid_rate(&BigDecimal::one()));
        assert!(!is_valid_rate(&BigDecimal::from_str("1.5").unwrap()));
        assert!(!is_valid_rate(&BigDecimal::from_str("-0.1").unwrap()));
    }

    #[test]
    fn commission_splits_fee_and_net() {
        let rows = commissions(
            vec![SettledJob {
                job_id: "job-1".to_string(),
                date: Utc::now().naive_utc(),
                service: "Débouchage".to_string(),
                provider: Some("Youssef".to_string()),
                amount: BigDecimal::from(120),
            }],
            &BigDecimal::from_str("0.15").unwrap(),
        );

        assert_eq!(rows[0].platform_fee, BigDecimal::from(18));
        assert_eq!(rows[0].net, BigDecimal::from(102));
    }

    #[test]
    fn services_are_attached_to_their_provider() {
        let provider = |id: &str| PendingProvider {
            user_id: id.to_string(),
            full_name: "Youssef".to_string(),
            email: "youssef@example.com".to_string(),
            zones: "General".to_string(),
            bio: None,
            interview_date: None,
            cv_url: None,
            photo_url: None,
            created_at: Utc::now().naive_utc(),
        };
        let service = |provider_id: &str, item_id: i32| SelectedService {
            provider_id: provider_id.to_string(),
            item_id,
            name: "Débouchage".to_string(),
            base_price: BigDecimal::from(120),
        };

        let rows = attach_services(
            vec![provider("p1"), provider("p2")],
            vec![service("p1", 1), service("p1", 2)],
        );

        assert_eq!(rows[0].services.len(), 2);
        assert!(rows[1].services.is_empty());
    }
}
