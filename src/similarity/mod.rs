//! String similarity powered by `strsim`.
//!
//! The selector only sees the [`Similarity`] trait; [`JaroWinkler`] is the
//! metric the tool ships with.

use crate::config::MatchConfig;

/// Winkler's prefix scaling factor.
pub const PREFIX_SCALE: f64 = 0.1;

/// A pure, deterministic similarity score in [0.0, 1.0] (higher is more similar).
pub trait Similarity: Sync {
    fn score(&self, a: &str, b: &str) -> f64;
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> f64 + Sync,
{
    fn score(&self, a: &str, b: &str) -> f64 {
        self(a, b)
    }
}

/// Jaro-Winkler with a configurable boost threshold and prefix length.
///
/// Pairs whose Jaro score is strictly above `boost_threshold` get
/// `0.1 * l * (1 - jaro)` added, where `l` is the number of leading
/// characters the strings share, capped at `prefix_size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JaroWinkler {
    pub boost_threshold: f64,
    pub prefix_size: usize,
}

impl Default for JaroWinkler {
    fn default() -> Self {
        Self::from_config(&MatchConfig::default())
    }
}

impl JaroWinkler {
    pub fn new(boost_threshold: f64, prefix_size: usize) -> Self {
        Self {
            boost_threshold,
            prefix_size,
        }
    }

    pub fn from_config(cfg: &MatchConfig) -> Self {
        Self::new(cfg.boost_threshold, cfg.prefix_size)
    }
}

impl Similarity for JaroWinkler {
    fn score(&self, a: &str, b: &str) -> f64 {
        let jaro = strsim::jaro(a, b);
        if jaro <= self.boost_threshold {
            return jaro;
        }
        let prefix = a
            .chars()
            .zip(b.chars())
            .take(self.prefix_size)
            .take_while(|(x, y)| x == y)
            .count();
        (jaro + PREFIX_SCALE * prefix as f64 * (1.0 - jaro)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_strsim_jaro_winkler() {
        let jw = JaroWinkler::default();
        let pairs = [
            ("martha", "marhta"),
            ("martha", "marta"),
            ("martha", "mart"),
            ("dwayne", "duane"),
            ("dixon", "dicksonx"),
            ("printf", "fprintf"),
            ("", ""),
            ("abc", ""),
            ("jones", "johnson"),
        ];
        for (a, b) in pairs {
            let ours = jw.score(a, b);
            let reference = strsim::jaro_winkler(a, b);
            assert!(
                (ours - reference).abs() < 1e-12,
                "{a}/{b}: {ours} vs {reference}"
            );
        }
    }

    #[test]
    fn known_scores() {
        let jw = JaroWinkler::default();
        assert!((jw.score("martha", "marhta") - 0.961_111_111_111_111).abs() < 1e-9);
        assert!((jw.score("dwayne", "duane") - 0.84).abs() < 1e-9);
        assert_eq!(jw.score("same", "same"), 1.0);
    }

    #[test]
    fn no_boost_below_threshold() {
        let strict = JaroWinkler::new(1.0, 4);
        let jaro = strsim::jaro("martha", "marhta");
        assert_eq!(strict.score("martha", "marhta"), jaro);
    }

    #[test]
    fn zero_prefix_is_plain_jaro() {
        let jw = JaroWinkler::new(0.7, 0);
        assert_eq!(jw.score("martha", "marta"), strsim::jaro("martha", "marta"));
    }

    #[test]
    fn longer_prefix_boosts_more() {
        let short = JaroWinkler::new(0.7, 2).score("martha", "marta");
        let long = JaroWinkler::new(0.7, 4).score("martha", "marta");
        assert!(long > short);
        assert!(long <= 1.0);
    }

    #[test]
    fn prefix_counts_characters_not_bytes() {
        let jw = JaroWinkler::default();
        let s = jw.score("ééééx", "ééééy");
        assert!(s > strsim::jaro("ééééx", "ééééy"));
        assert!(s <= 1.0);
    }

    #[test]
    fn closures_are_metrics() {
        let constant = |_: &str, _: &str| 0.5;
        assert_eq!(constant.score("a", "b"), 0.5);
    }
}
