use tracing::level_filters::LevelFilter;
use tracing::{Level, Span};

/// Logging context handed to each target: a span carrying the target's
/// identity plus the target's own verbosity, if one was configured.
#[derive(Debug, Clone)]
pub struct TargetLog {
    service: String,
    span: Span,
    level: Option<LevelFilter>,
}

impl TargetLog {
    pub fn new(service: &str, url: &str, verbosity: &str) -> Self {
        Self {
            service: service.to_owned(),
            span: tracing::info_span!("target", service, url),
            level: parse_verbosity(verbosity),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn level(&self) -> Option<LevelFilter> {
        self.level
    }

    /// Without a target verbosity every level is passed on to the global
    /// subscriber.
    pub fn enabled(&self, level: Level) -> bool {
        self.level.is_none_or(|filter| level <= filter)
    }
}

/// Blank or unknown labels inherit the global level.
pub fn parse_verbosity(raw: &str) -> Option<LevelFilter> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(LevelFilter::TRACE),
        "debug" => Some(LevelFilter::DEBUG),
        "info" => Some(LevelFilter::INFO),
        "warn" | "warning" => Some(LevelFilter::WARN),
        "error" | "fatal" | "panic" => Some(LevelFilter::ERROR),
        "disabled" | "off" => Some(LevelFilter::OFF),
        _ => None,
    }
}
