use chrono::{DateTime, Utc};

/// Hands out proposal ids derived from the creation time in milliseconds.
///
/// Two proposals created within the same millisecond (or after the clock
/// stepped backwards) get `last + 1`, so ids are strictly increasing and
/// never repeat for the lifetime of the generator.
#[derive(Debug, Default)]
pub struct ProposalIdGenerator {
    last: i64,
}

impl ProposalIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis();
        let id = if millis > self.last { millis } else { self.last + 1 };
        self.last = id;
        id.to_string()
    }
}
