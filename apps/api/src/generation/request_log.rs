use std::time::Instant;

use chrono::{SecondsFormat, Utc};

/// Ordered, timestamped log of one generation request.
///
/// Entries are returned verbatim to the caller for display; nothing is
/// persisted. Each entry reads `<ISO-8601 timestamp>: <message>`.
#[derive(Debug)]
pub struct RequestLog {
    started: Instant,
    entries: Vec<String>,
}

impl RequestLog {
    pub fn new() -> Self {
        RequestLog {
            started: Instant::now(),
            entries: Vec::new(),
        }
    }

    /// Appends a timestamped entry and mirrors it to the trace output.
    pub fn push(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::info!("{message}");
        self.entries.push(format!(
            "{}: {}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            message
        ));
    }

    /// Milliseconds since the log was opened.
    pub fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }

    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }
}

impl Default for RequestLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_entries_are_timestamp_prefixed() {
        let mut log = RequestLog::new();
        log.push("Started");
        let entries = log.into_entries();
        assert_eq!(entries.len(), 1);
        let (timestamp, message) = entries[0].split_once(": ").unwrap();
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert_eq!(message, "Started");
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut log = RequestLog::new();
        log.push("Started");
        log.push("Sending request to OpenAI");
        let elapsed = log.elapsed_ms();
        log.push(format!("Completed in {elapsed}ms"));
        let entries = log.into_entries();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].contains("Started"));
        assert!(entries[1].contains("Sending request to OpenAI"));
        assert!(entries[2].contains("Completed"));
    }
}
