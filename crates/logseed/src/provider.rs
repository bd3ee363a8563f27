//! Realistic field values
//!
//! The generator never reaches for ambient randomness: string fields come
//! from a [`ValueProvider`] handed in by the caller, so tests can swap in a
//! fixed stub and production uses [`FakeProvider`].

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

/// ISO-8601 rendering used for every generated timestamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const WORDS: &[&str] = &[
    "account", "agent", "allow", "answer", "build", "cache", "central", "check", "client",
    "cluster", "commit", "daemon", "detail", "disk", "event", "field", "flush", "global",
    "handle", "health", "image", "index", "kernel", "local", "memory", "message", "metric",
    "mount", "network", "node", "order", "packet", "policy", "process", "queue", "record",
    "region", "request", "retry", "service", "session", "signal", "socket", "source", "state",
    "stream", "system", "table", "thread", "update", "volume", "worker",
];

const URI_SEGMENTS: &[&str] = &[
    "app", "main", "wp-content", "search", "category", "tag", "categories", "tags", "blog",
    "posts", "list", "explore",
];

const HOST_ROLES: &[&str] = &["db", "srv", "desktop", "laptop", "lt", "email", "web"];

const DOMAIN_WORDS: &[&str] = &[
    "smith", "johnson", "garcia", "miller", "davis", "wilson", "anderson", "taylor", "moore",
    "martin", "lee", "walker", "young", "allen", "king",
];

const TLDS: &[&str] = &["com", "net", "org", "info", "biz"];

/// Source of realistic string values for generated records
pub trait ValueProvider {
    /// ISO-8601 timestamp, e.g. `2003-07-19T14:02:55`
    fn next_timestamp(&mut self) -> String;

    /// Dotted-quad IPv4 address
    fn next_ipv4(&mut self) -> String;

    /// URL path without a leading slash, e.g. `blog/posts`
    fn next_uri_path(&mut self) -> String;

    /// Host name, e.g. `web-27.smith.com`
    fn next_hostname(&mut self) -> String;

    /// Capitalised sentence ending in a period, roughly `words` long
    fn next_sentence(&mut self, words: usize) -> String;
}

/// Word-list backed provider with its own random source
pub struct FakeProvider<R = StdRng> {
    rng: R,
    latest: i64,
}

impl FakeProvider<StdRng> {
    /// Reproducible provider; timestamps are capped at the current time
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), Utc::now())
    }

    /// Provider seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng(), Utc::now())
    }
}

impl<R: Rng> FakeProvider<R> {
    /// Timestamps fall between the Unix epoch and `latest`
    pub fn new(rng: R, latest: DateTime<Utc>) -> Self {
        Self {
            rng,
            latest: latest.timestamp().max(0),
        }
    }

    fn pick(&mut self, items: &[&'static str]) -> &'static str {
        items.choose(&mut self.rng).copied().unwrap_or_default()
    }
}

impl<R: Rng> ValueProvider for FakeProvider<R> {
    fn next_timestamp(&mut self) -> String {
        let secs = self.rng.random_range(0..=self.latest);
        DateTime::from_timestamp(secs, 0)
            .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default()
    }

    fn next_ipv4(&mut self) -> String {
        let first: u8 = self.rng.random_range(1..=223);
        let [b, c, d]: [u8; 3] = self.rng.random();
        format!("{}.{}.{}.{}", first, b, c, d)
    }

    fn next_uri_path(&mut self) -> String {
        let depth = self.rng.random_range(1..=3);
        (0..depth)
            .map(|_| self.pick(URI_SEGMENTS))
            .collect::<Vec<_>>()
            .join("/")
    }

    fn next_hostname(&mut self) -> String {
        let role = self.pick(HOST_ROLES);
        let number: u8 = self.rng.random_range(0..=99);
        let domain = self.pick(DOMAIN_WORDS);
        let tld = self.pick(TLDS);
        format!("{}-{:02}.{}.{}", role, number, domain, tld)
    }

    fn next_sentence(&mut self, words: usize) -> String {
        // Vary length to 60-140% of the target, never below one word.
        let percent = self.rng.random_range(60..=140);
        let count = (words * percent / 100).max(1);

        let mut sentence = (0..count)
            .map(|_| self.pick(WORDS))
            .collect::<Vec<_>>()
            .join(" ");
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use std::net::Ipv4Addr;

    fn provider(seed: u64) -> FakeProvider {
        let latest = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        FakeProvider::new(StdRng::seed_from_u64(seed), latest)
    }

    #[test]
    fn test_timestamps_are_iso8601_and_bounded() {
        let mut p = provider(7);
        for _ in 0..200 {
            let ts = p.next_timestamp();
            let parsed = NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT).unwrap();
            assert!(parsed.and_utc().timestamp() <= 1_700_000_000);
        }
    }

    #[test]
    fn test_ipv4_parses() {
        let mut p = provider(1);
        for _ in 0..200 {
            let ip: Ipv4Addr = p.next_ipv4().parse().unwrap();
            assert!((1..=223).contains(&ip.octets()[0]));
        }
    }

    #[test]
    fn test_uri_path_shape() {
        let mut p = provider(3);
        for _ in 0..100 {
            let path = p.next_uri_path();
            assert!(!path.starts_with('/'));
            let depth = path.split('/').count();
            assert!((1..=3).contains(&depth), "unexpected depth in {}", path);
        }
    }

    #[test]
    fn test_hostname_shape() {
        let mut p = provider(5);
        let host = p.next_hostname();
        assert_eq!(host.split('.').count(), 3);
        assert!(host.split('.').next().unwrap().contains('-'));
    }

    #[test]
    fn test_sentence_shape() {
        let mut p = provider(11);
        for _ in 0..100 {
            let sentence = p.next_sentence(8);
            assert!(sentence.ends_with('.'));
            assert!(sentence.chars().next().unwrap().is_ascii_uppercase());
            let words = sentence.split(' ').count();
            assert!((4..=11).contains(&words), "{} words in {:?}", words, sentence);
        }
    }

    #[test]
    fn test_sentence_never_empty() {
        let mut p = provider(13);
        assert!(p.next_sentence(0).len() > 1);
    }

    #[test]
    fn test_same_seed_same_values() {
        let mut a = provider(99);
        let mut b = provider(99);
        assert_eq!(a.next_timestamp(), b.next_timestamp());
        assert_eq!(a.next_hostname(), b.next_hostname());
        assert_eq!(a.next_sentence(8), b.next_sentence(8));
    }
}
