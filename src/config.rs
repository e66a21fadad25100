// Startup configuration: where the skin lives, how big the window opens, which seed.
// Everything has a default; the environment can override it.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Fixed rules of the toy (not configurable).
pub mod consts {
    /// Taps until the device dies.
    pub const MAX_TOUCHES: u32 = 100;
    /// Most glitches per tap (reached on the final tap).
    pub const MAX_GLITCHES_PER_TAP: u32 = 15;
    /// Most glitches retained at once; oldest are evicted past this.
    pub const GLITCH_CAPACITY: usize = (MAX_TOUCHES * MAX_GLITCHES_PER_TAP) as usize;
}

pub const ENV_SKIN: &str = "MORTEM_SKIN";
pub const ENV_WIDTH: &str = "MORTEM_WIDTH";
pub const ENV_HEIGHT: &str = "MORTEM_HEIGHT";
pub const ENV_SEED: &str = "MORTEM_SEED";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Background "phone screen" image.
    pub skin_path: PathBuf,
    /// Initial window size; the user may resize afterwards.
    pub width: usize,
    pub height: usize,
    /// RNG seed; `None` picks a fresh one at startup.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skin_path: PathBuf::from("assets/smartphone_screen.png"),
            width: 400,
            height: 800,
            seed: None,
        }
    }
}

impl Config {
    /// Defaults overridden by `MORTEM_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, with the variable source injected (tests use a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(path) = lookup(ENV_SKIN).filter(|p| !p.trim().is_empty()) {
            cfg.skin_path = PathBuf::from(path);
        }
        if let Some(w) = parse_var::<usize>(&lookup, ENV_WIDTH).filter(|w| *w > 0) {
            cfg.width = w;
        }
        if let Some(h) = parse_var::<usize>(&lookup, ENV_HEIGHT).filter(|h| *h > 0) {
            cfg.height = h;
        }
        cfg.seed = parse_var::<u64>(&lookup, ENV_SEED);

        cfg
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Ignoring {key}={raw:?}: not a valid number, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn capacity_is_fifteen_per_touch() {
        assert_eq!(consts::GLITCH_CAPACITY, 1500);
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(Config::from_lookup(lookup_from(&[])), Config::default());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = Config::from_lookup(lookup_from(&[
            (ENV_SKIN, "skins/cracked.png"),
            (ENV_WIDTH, "320"),
            (ENV_HEIGHT, " 640 "),
            (ENV_SEED, "42"),
        ]));
        assert_eq!(cfg.skin_path, PathBuf::from("skins/cracked.png"));
        assert_eq!((cfg.width, cfg.height), (320, 640));
        assert_eq!(cfg.seed, Some(42));
    }

    #[test]
    fn bad_numbers_fall_back_to_defaults() {
        let cfg = Config::from_lookup(lookup_from(&[
            (ENV_WIDTH, "wide"),
            (ENV_HEIGHT, "0"),
            (ENV_SEED, "-1"),
        ]));
        let d = Config::default();
        assert_eq!((cfg.width, cfg.height), (d.width, d.height));
        assert_eq!(cfg.seed, None);
    }
}
