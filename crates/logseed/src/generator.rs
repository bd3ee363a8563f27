//! Record generation
//!
//! [`generate`] is pure apart from the random source and provider passed to
//! it. [`Generator`] bundles both behind a single optional seed.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::provider::{FakeProvider, ValueProvider};
use crate::record::{Batch, Record, Value};
use crate::schema::{
    SchemaId, ACTIONS, HTTP_METHODS, LOG_LEVELS, MESSAGE_WORDS, SEVERITIES, STATUS_CODES,
    USER_ID_MAX, USER_ID_MIN,
};

/// Produce `count` records conforming to `schema`
///
/// Enumerated fields are drawn uniformly from `rng`; free-text fields come
/// from `provider`. `count == 0` yields an empty batch.
pub fn generate<P, R>(count: usize, schema: SchemaId, provider: &mut P, rng: &mut R) -> Batch
where
    P: ValueProvider + ?Sized,
    R: Rng + ?Sized,
{
    let records = (0..count)
        .map(|_| match schema {
            SchemaId::AppLog => app_log_record(provider, rng),
            SchemaId::WebLog => web_log_record(provider, rng),
            SchemaId::SysLog => sys_log_record(provider, rng),
        })
        .collect();

    Batch::new(schema, records)
}

fn choice<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> T {
    items[rng.random_range(0..items.len())]
}

fn text(value: impl Into<String>) -> Value {
    Value::Str(value.into())
}

fn app_log_record<P, R>(provider: &mut P, rng: &mut R) -> Record
where
    P: ValueProvider + ?Sized,
    R: Rng + ?Sized,
{
    let timestamp = provider.next_timestamp();
    let log_level = choice(rng, LOG_LEVELS);
    let user_id = rng.random_range(USER_ID_MIN..=USER_ID_MAX);
    let action = choice(rng, ACTIONS);
    let description = format!("User {} performed {}", user_id, action);

    let mut record = Record::with_capacity(5);
    record.push("timestamp", text(timestamp));
    record.push("log_level", text(log_level));
    record.push("user_id", Value::Int(user_id));
    record.push("action", text(action));
    record.push("description", text(description));
    record
}

fn web_log_record<P, R>(provider: &mut P, rng: &mut R) -> Record
where
    P: ValueProvider + ?Sized,
    R: Rng + ?Sized,
{
    let mut record = Record::with_capacity(5);
    record.push("timestamp", text(provider.next_timestamp()));
    record.push("ip", text(provider.next_ipv4()));
    record.push("method", text(choice(rng, HTTP_METHODS)));
    record.push("status", Value::Int(choice(rng, STATUS_CODES)));
    record.push("url", text(provider.next_uri_path()));
    record
}

fn sys_log_record<P, R>(provider: &mut P, rng: &mut R) -> Record
where
    P: ValueProvider + ?Sized,
    R: Rng + ?Sized,
{
    let mut record = Record::with_capacity(4);
    record.push("timestamp", text(provider.next_timestamp()));
    record.push("hostname", text(provider.next_hostname()));
    record.push("severity", text(choice(rng, SEVERITIES)));
    record.push("message", text(provider.next_sentence(MESSAGE_WORDS)));
    record
}

/// Random source and value provider for one run
pub struct Generator {
    rng: StdRng,
    provider: FakeProvider<StdRng>,
}

impl Generator {
    /// A fixed seed makes every generated value reproducible, except that
    /// timestamps are capped at the time of construction.
    pub fn new(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let provider = FakeProvider::new(StdRng::from_rng(&mut rng), Utc::now());
        Self { rng, provider }
    }

    pub fn generate(&mut self, count: usize, schema: SchemaId) -> Batch {
        let batch = generate(count, schema, &mut self.provider, &mut self.rng);
        debug!(schema = %schema, records = batch.len(), "Generated batch");
        batch
    }
}
