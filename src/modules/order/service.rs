use super::repository::{Job, JobStatus};
use crate::modules::{
    provider::repository::Candidate,
    user::repository::{self as user_repository, User},
};

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Actor {
    Client,
    Provider,
    Admin,
}

impl Actor {
    /// How `user` relates to `job`, or `None` for outsiders.
    pub fn of(user: &User, job: &Job) -> Option<Self> {
        if user_repository::is_admin(user) {
            Some(Actor::Admin)
        } else if job.provider_id.as_deref() == Some(user.id.as_str()) {
            Some(Actor::Provider)
        } else if job.client_id == user.id {
            Some(Actor::Client)
        } else {
            None
        }
    }
}

/// Status changes reachable through the generic status endpoint.
pub fn can_transition(actor: Actor, from: JobStatus, to: JobStatus) -> bool {
    use JobStatus::*;

    match actor {
        Actor::Provider => matches!(
            (from, to),
            (Confirmed, InProgress) | (InProgress, Completed) | (Assigned, Cancelled)
        ),
        Actor::Client => matches!((from, to), (Pending, Cancelled) | (Assigned, Cancelled)),
        Actor::Admin => to == Cancelled && !from.is_terminal(),
    }
}

/// Great-circle distance in kilometres between two `(lat, lng)` points.
pub fn distance_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lng2) = (to.0.to_radians(), to.1.to_radians());

    let a = ((lat2 - lat1) / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * ((lng2 - lng1) / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

pub fn nearest(origin: (f64, f64), candidates: &[Candidate]) -> Option<(&Candidate, f64)> {
    candidates
        .iter()
        .filter_map(|candidate| {
            candidate
                .position()
                .map(|position| (candidate, distance_km(origin, position)))
        })
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
}

/// Who hears about a status change made by `actor`.
pub fn status_change_recipients(actor: Actor, job: &Job) -> Vec<String> {
    match actor {
        Actor::Client => job.provider_id.iter().cloned().collect(),
        Actor::Provider => vec![job.client_id.clone()],
        Actor::Admin => std::iter::once(job.client_id.clone())
            .chain(job.provider_id.iter().cloned())
            .collect(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::modules::user::repository::{test::user, Role, Status};
    use bigdecimal::BigDecimal;

    const CASABLANCA: (f64, f64) = (33.5731, -7.5898);
    const RABAT: (f64, f64) = (34.0209, -6.8416);

    fn candidate(id: &str, position: Option<(f64, f64)>) -> Candidate {
        Candidate {
            user_id: id.to_string(),
            last_lat: position.map(|(lat, _)| lat),
            last_lng: position.map(|(_, lng)| lng),
        }
    }

    fn job(client_id: &str, provider_id: Option<&str>) -> Job {
        Job {
            id: "job-1".to_string(),
            client_id: client_id.to_string(),
            provider_id: provider_id.map(str::to_string),
            service_item_id: 1,
            status: JobStatus::Pending,
            price: BigDecimal::from(100),
            address: "Casablanca".to_string(),
            lat: CASABLANCA.0,
            lng: CASABLANCA.1,
            distance_km: None,
            scheduled_at: None,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: None,
        }
    }

    #[test]
    fn distance_between_casablanca_and_rabat() {
        let distance = distance_km(CASABLANCA, RABAT);
        assert!((distance - 85.2).abs() < 1.0, "got {}", distance);
        assert_eq!(distance_km(RABAT, RABAT), 0.0);
    }

    #[test]
    fn picks_the_closest_positioned_candidate() {
        let candidates = vec![
            candidate("far", Some(RABAT)),
            candidate("unknown", None),
            candidate("near", Some((33.58, -7.60))),
        ];

        let (chosen, distance) = nearest(CASABLANCA, &candidates).unwrap();
        assert_eq!(chosen.user_id, "near");
        assert!(distance < 2.0);

        assert!(nearest(CASABLANCA, &[candidate("unknown", None)]).is_none());
    }

    #[test]
    fn provider_transitions() {
        use JobStatus::*;

        assert!(can_transition(Actor::Provider, Confirmed, InProgress));
        assert!(can_transition(Actor::Provider, InProgress, Completed));
        assert!(can_transition(Actor::Provider, Assigned, Cancelled));
        assert!(!can_transition(Actor::Provider, Assigned, InProgress));
        assert!(!can_transition(Actor::Provider, Pending, Completed));
    }

    #[test]
    fn client_transitions() {
        use JobStatus::*;

        assert!(can_transition(Actor::Client, Pending, Cancelled));
        assert!(can_transition(Actor::Client, Assigned, Cancelled));
        assert!(!can_transition(Actor::Client, Confirmed, Cancelled));
        assert!(!can_transition(Actor::Client, InProgress, Completed));
    }

    #[test]
    fn admin_can_cancel_any_open_job() {
        use JobStatus::*;

        for from in [Pending, Assigned, Confirmed, InProgress] {
            assert!(can_transition(Actor::Admin, from, Cancelled));
        }
        assert!(!can_transition(Actor::Admin, Completed, Cancelled));
        assert!(!can_transition(Actor::Admin, Pending, Completed));
    }

    #[test]
    fn resolves_the_actor_of_a_user() {
        let client = user(Role::Client, Status::Active);
        let provider = user(Role::Provider, Status::Active);
        let admin = user(Role::Admin, Status::Active);
        let stranger = user(Role::Client, Status::Active);
        let job = job(&client.id, Some(&provider.id));

        assert_eq!(Actor::of(&client, &job), Some(Actor::Client));
        assert_eq!(Actor::of(&provider, &job), Some(Actor::Provider));
        assert_eq!(Actor::of(&admin, &job), Some(Actor::Admin));
        assert_eq!(Actor::of(&stranger, &job), None);
    }

    #[test]
    fn status_changes_notify_the_other_parties() {
        let job = job("client-1", Some("provider-1"));

        assert_eq!(
            status_change_recipients(Actor::Client, &job),
            vec!["provider-1".to_string()]
        );
        assert_eq!(
            status_change_recipients(Actor::Provider, &job),
            vec!["client-1".to_string()]
        );
        assert_eq!(
            status_change_recipients(Actor::Admin, &job),
            vec!["client-1".to_string(), "provider-1".to_string()]
        );
    }

    #[test]
    fn cancelling_an_unassigned_job_notifies_nobody() {
        let job = job("client-1", None);
        assert!(status_change_recipients(Actor::Client, &job).is_empty());
    }
}
