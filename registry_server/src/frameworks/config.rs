use crate::domain::IdStrategy;
use std::env;

// Runtime/server constants read from the environment.

pub fn http_port() -> u16 {
    env::var("REGISTRY_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5000)
}

pub fn seed_sample_users() -> bool {
    env::var("REGISTRY_SEED_SAMPLE_USERS")
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(true)
}

pub fn id_strategy() -> IdStrategy {
    match env::var("REGISTRY_ID_STRATEGY") {
        Ok(value) => IdStrategy::parse(&value).unwrap_or_else(|| {
            tracing::warn!(value = %value, "unknown REGISTRY_ID_STRATEGY; using length");
            IdStrategy::default()
        }),
        Err(_) => IdStrategy::default(),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_flag_is_spelled_loosely_then_it_still_parses() {
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
