use std::str::FromStr;
use crate::domain::error::ConfigError;

const DEFAULT_MAX_CONCURRENCY: usize = 1;
const DEFAULT_SQS_MAX_MESSAGES: i32 = 10;
const DEFAULT_SQS_WAIT_TIME_SECONDS: i32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub queue_url: String,
    /// Custom AWS endpoint, e.g. LocalStack. Also switches S3 to path-style addressing.
    pub endpoint_url: Option<String>,
    pub max_concurrency: usize,
    pub sqs_max_messages: i32,
    pub sqs_wait_time_seconds: i32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let queue_url = lookup("SQS_QUEUE_URL")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("SQS_QUEUE_URL"))?;
        let endpoint_url = lookup("AWS_ENDPOINT_URL").filter(|v| !v.is_empty());

        let max_concurrency = parse_in_range(&lookup, "MAX_CONCURRENCY", DEFAULT_MAX_CONCURRENCY, 1..=usize::MAX)?;
        let sqs_max_messages = parse_in_range(&lookup, "SQS_MAX_MESSAGES", DEFAULT_SQS_MAX_MESSAGES, 1..=10)?;
        let sqs_wait_time_seconds = parse_in_range(&lookup, "SQS_WAIT_TIME_SECONDS", DEFAULT_SQS_WAIT_TIME_SECONDS, 0..=20)?;

        Ok(Self {
            queue_url,
            endpoint_url,
            max_concurrency,
            sqs_max_messages,
            sqs_wait_time_seconds,
        })
    }
}

fn parse_in_range<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
    range: std::ops::RangeInclusive<T>,
) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + std::fmt::Debug,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    let value = raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        name,
        value: raw.clone(),
        reason: e.to_string(),
    })?;
    if !range.contains(&value) {
        return Err(ConfigError::Invalid {
            name,
            value: raw,
            reason: format!("must be within {:?}", range),
        });
    }
    Ok(value)
}
