use rand::SeedableRng;
use rand::rngs::StdRng;

/// Random identifier for correlating one connection's log lines.
pub fn conn_id() -> u64 {
    rand::random()
}

/// Generator for the sketch loop: reproducible when a seed is given, fresh
/// OS entropy otherwise.
pub fn sketch_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
