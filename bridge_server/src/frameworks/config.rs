use crate::domain::Frame;
use std::{env, time::Duration};

// Runtime/server constants (not sketch tuning).

pub fn http_port() -> u16 {
    env::var("BRIDGE_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3001)
}

/// Frame size the sketch simulates in; should match the client's capture size.
pub fn frame() -> Frame {
    let default = Frame::default();
    Frame::new(
        dimension("FRAME_WIDTH").unwrap_or(default.width),
        dimension("FRAME_HEIGHT").unwrap_or(default.height),
    )
}

pub fn flip_horizontal() -> bool {
    env::var("FLIP_HORIZONTAL")
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(true)
}

/// Fixed seed for reproducible particle spawns; unset means OS entropy.
pub fn rng_seed() -> Option<u64> {
    env::var("SKETCH_RNG_SEED").ok().and_then(|v| v.trim().parse().ok())
}

fn dimension(key: &str) -> Option<f32> {
    let value = env::var(key).ok()?;
    match value.trim().parse::<f32>() {
        Ok(v) if v.is_finite() && v > 0.0 => Some(v),
        _ => {
            tracing::warn!(key, value = %value, "ignoring invalid frame dimension");
            None
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub const WORLD_BROADCAST_CAPACITY: usize = 128;

pub const TICK_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 60);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_flag_is_spelled_loosely_then_it_still_parses() {
        assert_eq!(parse_flag("Yes"), Some(true));
        assert_eq!(parse_flag(" 0"), Some(false));
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn when_tick_interval_is_read_then_it_is_one_sixtieth_of_a_second() {
        assert!((TICK_INTERVAL.as_secs_f64() - 1.0 / 60.0).abs() < 1e-6);
    }
}
