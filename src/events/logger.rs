//! Category-tagged event logging with an injectable sink and clock format.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Receives the `"[category] timestamp:"` prefix and the event details.
pub type Sink<'a> = &'a dyn Fn(&str, &Value);

/// Turns the event time into the text placed in the prefix.
pub type TimeFormatter<'a> = &'a dyn Fn(DateTime<Utc>) -> String;

/// Overrides for [`log_event`] and [`batch_log`]. Unset fields fall back to
/// a `tracing` INFO event and an RFC 3339 UTC timestamp with milliseconds.
#[derive(Clone, Copy, Default)]
pub struct LogOptions<'a> {
    pub logger: Option<Sink<'a>>,
    pub format_time: Option<TimeFormatter<'a>>,
}

impl<'a> LogOptions<'a> {
    pub fn with_logger(mut self, logger: Sink<'a>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_format_time(mut self, format_time: TimeFormatter<'a>) -> Self {
        self.format_time = Some(format_time);
        self
    }
}

/// One entry for [`batch_log`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: Value,
}

impl Event {
    pub fn new(kind: impl Into<String>, payload: impl Into<Value>) -> Self {
        Self {
            kind: kind.into(),
            payload: payload.into(),
        }
    }
}

/// `2026-01-31T08:15:00.000Z`
pub fn iso_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn default_sink(prefix: &str, details: &Value) {
    info!(target: "tokenscan::events", "{} {}", prefix, details);
}

/// Emit `[category] timestamp:` followed by `details`.
///
/// Whatever the injected sink or formatter does (including panicking) is
/// passed straight through.
pub fn log_event(category: &str, details: &Value, options: &LogOptions<'_>) {
    let now = Utc::now();
    let time = match options.format_time {
        Some(format_time) => format_time(now),
        None => iso_timestamp(now),
    };
    let prefix = format!("[{}] {}:", category, time);

    match options.logger {
        Some(logger) => logger(&prefix, details),
        None => default_sink(&prefix, details),
    }
}

/// [`log_event`] for each entry, in order, with the same options.
pub fn batch_log(events: &[Event], options: &LogOptions<'_>) {
    for event in events {
        log_event(&event.kind, &event.payload, options);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    #[test]
    fn test_log_event_uses_injected_sink_and_clock() {
        let lines = RefCell::new(Vec::new());
        let sink = |prefix: &str, details: &Value| {
            lines.borrow_mut().push((prefix.to_string(), details.clone()));
        };
        let clock = |_: DateTime<Utc>| "T0".to_string();
        let opts = LogOptions::default()
            .with_logger(&sink)
            .with_format_time(&clock);

        log_event("trade", &json!({"qty": 3}), &opts);

        let lines = lines.into_inner();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, "[trade] T0:");
        assert_eq!(lines[0].1, json!({"qty": 3}));
    }

    #[test]
    fn test_default_clock_is_iso() {
        let prefixes = RefCell::new(Vec::new());
        let sink = |prefix: &str, _: &Value| prefixes.borrow_mut().push(prefix.to_string());
        let opts = LogOptions::default().with_logger(&sink);

        log_event("boot", &Value::Null, &opts);

        let prefix = prefixes.into_inner().remove(0);
        let ts = prefix
            .strip_prefix("[boot] ")
            .and_then(|s| s.strip_suffix(':'))
            .unwrap();
        assert!(DateTime::parse_from_rfc3339(ts).is_ok(), "not RFC 3339: {}", ts);
        assert!(ts.ends_with('Z'));
    }

    #[test]
    fn test_batch_log_preserves_order_and_options() {
        let seen = RefCell::new(Vec::new());
        let sink = |prefix: &str, details: &Value| {
            seen.borrow_mut().push(format!("{} {}", prefix, details));
        };
        let clock = |_: DateTime<Utc>| "now".to_string();
        let opts = LogOptions::default()
            .with_logger(&sink)
            .with_format_time(&clock);

        let events: Vec<Event> =
            serde_json::from_value(json!([
                {"type": "a", "payload": 1},
                {"type": "b", "payload": "x"}
            ]))
            .unwrap();
        batch_log(&events, &opts);

        assert_eq!(
            seen.into_inner(),
            vec!["[a] now: 1".to_string(), "[b] now: \"x\"".to_string()]
        );
    }

    #[test]
    fn test_default_sink_does_not_panic() {
        log_event("plain", &json!("details"), &LogOptions::default());
        batch_log(&[Event::new("x", 1)], &LogOptions::default());
    }
}
