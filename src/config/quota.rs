// Rate-limit quota parsing ("10/minute", "100 per hour")

use crate::error::{Result, TranslatorError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

static QUOTA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\s*(?:/|per)\s*(second|minute|hour|day)s?\s*$")
        .expect("quota regex is valid")
});

/// `limit` requests allowed per `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateQuota {
    pub limit: u32,
    pub window: Duration,
}

impl RateQuota {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self { limit, window }
    }
}

impl Default for RateQuota {
    fn default() -> Self {
        Self::new(10, Duration::from_secs(60))
    }
}

impl FromStr for RateQuota {
    type Err = TranslatorError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = QUOTA_RE.captures(s).ok_or_else(|| {
            TranslatorError::Config(format!(
                "Invalid rate limit '{}': expected '<N>/<second|minute|hour|day>'",
                s
            ))
        })?;

        let limit: u32 = caps[1]
            .parse()
            .map_err(|_| TranslatorError::Config(format!("Rate limit count out of range: {}", s)))?;
        if limit == 0 {
            return Err(TranslatorError::Config(format!(
                "Rate limit '{}' must allow at least one request",
                s
            )));
        }

        let secs = match &caps[2] {
            "second" => 1,
            "minute" => 60,
            "hour" => 3_600,
            _ => 86_400,
        };

        Ok(Self::new(limit, Duration::from_secs(secs)))
    }
}

impl fmt::Display for RateQuota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.window.as_secs() {
            1 => "second",
            60 => "minute",
            3_600 => "hour",
            86_400 => "day",
            n => return write!(f, "{}/{}s", self.limit, n),
        };
        write!(f, "{}/{}", self.limit, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_matches_service_default() {
        assert_eq!("10/minute".parse::<RateQuota>().unwrap(), RateQuota::default());
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("5/second".parse::<RateQuota>().unwrap().window.as_secs(), 1);
        assert_eq!("5/hour".parse::<RateQuota>().unwrap().window.as_secs(), 3_600);
        assert_eq!("5/day".parse::<RateQuota>().unwrap().window.as_secs(), 86_400);
        assert_eq!("100 per minutes".parse::<RateQuota>().unwrap().limit, 100);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("".parse::<RateQuota>().is_err());
        assert!("ten/minute".parse::<RateQuota>().is_err());
        assert!("10/fortnight".parse::<RateQuota>().is_err());
        assert!("0/minute".parse::<RateQuota>().is_err());
        assert!("99999999999/minute".parse::<RateQuota>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(RateQuota::default().to_string(), "10/minute");
        assert_eq!(RateQuota::new(3, Duration::from_secs(90)).to_string(), "3/90s");
    }

    proptest! {
        #[test]
        fn prop_display_parses_back(limit in 1u32..100_000, unit in prop::sample::select(vec!["second", "minute", "hour", "day"])) {
            let quota: RateQuota = format!("{}/{}", limit, unit).parse().unwrap();
            prop_assert_eq!(quota.limit, limit);
            prop_assert_eq!(quota.to_string().parse::<RateQuota>().unwrap(), quota);
        }
    }
}
