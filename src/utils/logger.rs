use std::fmt;

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt as layer_fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid logging.level '{0}'. Valid values: trace, debug, info, warn, error")]
    InvalidLevel(String),
    #[error("invalid logging.format '{0}'. Valid values: json, console")]
    InvalidFormat(String),
    #[error("a global logger is already installed: {0}")]
    AlreadyInitialized(String),
}

/// Collects event fields as JSON attributes.
#[derive(Default)]
struct AttributeVisitor {
    attributes: Map<String, Value>,
}

impl AttributeVisitor {
    // Structured names use dots in the output, underscores at the call site.
    fn key(field: &Field) -> String {
        match field.name() {
            "event_name" => "event.name".to_string(),
            "event_domain" => "event.domain".to_string(),
            other => other.to_string(),
        }
    }
}

impl Visit for AttributeVisitor {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.attributes.insert(Self::key(field), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.attributes.insert(Self::key(field), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.attributes.insert(Self::key(field), Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.attributes.insert(Self::key(field), Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.attributes.insert(Self::key(field), Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.attributes
            .insert(Self::key(field), Value::from(format!("{:?}", value)));
    }
}

/// One JSON object per line, following the OpenTelemetry log data model.
#[derive(Clone)]
struct OtelJsonFormatter {
    service_name: String,
    service_version: String,
}

fn severity_number(level: &Level) -> u64 {
    match *level {
        Level::TRACE => 1,
        Level::DEBUG => 5,
        Level::INFO => 9,
        Level::WARN => 13,
        Level::ERROR => 17,
    }
}

impl OtelJsonFormatter {
    fn render(&self, event: &Event<'_>) -> Value {
        let metadata = event.metadata();
        let mut visitor = AttributeVisitor::default();
        event.record(&mut visitor);
        let mut attributes = visitor.attributes;

        let body = match attributes.remove("message") {
            Some(Value::String(message)) => message,
            _ => metadata.name().to_string(),
        };
        if let Some(file) = metadata.file() {
            attributes.insert("code.filepath".to_string(), Value::from(file));
        }
        if let Some(line) = metadata.line() {
            attributes.insert("code.lineno".to_string(), Value::from(line));
        }
        attributes.insert("code.target".to_string(), Value::from(metadata.target()));

        json!({
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            "severity_text": metadata.level().as_str(),
            "severity_number": severity_number(metadata.level()),
            "body": body,
            "resource": {
                "service.name": self.service_name,
                "service.version": self.service_version,
            },
            "attributes": attributes,
        })
    }
}

impl<S, N> FormatEvent<S, N> for OtelJsonFormatter
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let line = serde_json::to_string(&self.render(event)).map_err(|_| fmt::Error)?;
        writeln!(writer, "{}", line)
    }
}

fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" => Ok(LevelFilter::WARN),
        "error" => Ok(LevelFilter::ERROR),
        _ => Err(LoggingError::InvalidLevel(level.to_string())),
    }
}

/// Installs the global subscriber described by `logging_config`.
///
/// `RUST_LOG` directives are honoured on top of the configured level.
pub fn init_logging(logging_config: &LoggingConfig) -> Result<(), LoggingError> {
    let level_filter = parse_level(&logging_config.level)?;
    let filter_layer = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .from_env_lossy();

    let installed = match logging_config.format.trim().to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(filter_layer)
            .with(layer_fmt::layer().event_format(OtelJsonFormatter {
                service_name: logging_config.service_name.clone(),
                service_version: logging_config.service_version.clone(),
            }))
            .try_init(),
        "console" => tracing_subscriber::registry()
            .with(filter_layer)
            .with(layer_fmt::layer().with_writer(std::io::stderr).compact())
            .try_init(),
        other => return Err(LoggingError::InvalidFormat(other.to_string())),
    };
    installed.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(" Debug ").unwrap(), LevelFilter::DEBUG);
        assert!(matches!(
            parse_level("loud"),
            Err(LoggingError::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_json_line_shape() {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::registry().with(
            layer_fmt::layer()
                .with_writer(capture.clone())
                .event_format(OtelJsonFormatter {
                    service_name: "zerowaste-client".to_string(),
                    service_version: "0.1.0".to_string(),
                }),
        );

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(
                event_name = "client.refresh.failed",
                event_domain = "client",
                status = 401u64,
                "token refresh failed"
            );
        });

        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        let line: Value = serde_json::from_str(output.trim()).expect("one JSON line");
        assert_eq!(line["severity_text"], "WARN");
        assert_eq!(line["severity_number"], 13);
        assert_eq!(line["body"], "token refresh failed");
        assert_eq!(line["resource"]["service.name"], "zerowaste-client");
        assert_eq!(line["attributes"]["event.name"], "client.refresh.failed");
        assert_eq!(line["attributes"]["event.domain"], "client");
        assert_eq!(line["attributes"]["status"], 401);
    }
}
