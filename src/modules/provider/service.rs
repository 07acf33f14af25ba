use bigdecimal::{BigDecimal, Zero};
use std::str::FromStr;

const DEFAULT_RATING: i32 = 5;
const DEFAULT_MONTHLY_GOAL: i32 = 5000;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    InvalidServiceId(String),
    NoServiceSelected,
}

/// Parses the comma-separated catalog item ids sent by the onboarding form.
pub fn parse_service_ids(raw: &str) -> Result<Vec<i32>, Error> {
    let mut ids = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            i32::from_str(id)
                .ok()
                .filter(|id| *id > 0)
                .ok_or_else(|| Error::InvalidServiceId(id.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    ids.sort_unstable();
    ids.dedup();

    match ids.is_empty() {
        true => Err(Error::NoServiceSelected),
        false => Ok(ids),
    }
}

/// Providers nobody rated yet are shown with full marks.
pub fn displayed_rating(rating: &BigDecimal) -> BigDecimal {
    match rating.is_zero() {
        true => BigDecimal::from(DEFAULT_RATING),
        false => rating.clone(),
    }
}

pub fn displayed_goal(goal: &BigDecimal) -> BigDecimal {
    match goal.is_zero() {
        true => BigDecimal::from(DEFAULT_MONTHLY_GOAL),
        false => goal.clone(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_comma_separated_ids() {
        assert_eq!(parse_service_ids("3, 1,2,,3"), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert_eq!(
            parse_service_ids("1,plomberie"),
            Err(Error::InvalidServiceId("plomberie".to_string()))
        );
        assert_eq!(
            parse_service_ids("-4"),
            Err(Error::InvalidServiceId("-4".to_string()))
        );
    }

    #[test]
    fn requires_at_least_one_service() {
        assert_eq!(parse_service_ids(" , "), Err(Error::NoServiceSelected));
    }

    #[test]
    fn unrated_providers_show_five_stars() {
        assert_eq!(displayed_rating(&BigDecimal::from(0)), BigDecimal::from(5));
        assert_eq!(
            displayed_rating(&BigDecimal::from_str("4.2").unwrap()),
            BigDecimal::from_str("4.2").unwrap()
        );
        assert_eq!(displayed_goal(&BigDecimal::from(0)), BigDecimal::from(5000));
    }
}
