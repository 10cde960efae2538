// src/utils/logger.rs

use serde_json::{Map, Value};
use std::sync::OnceLock;

#[cfg(target_arch = "wasm32")]
use worker::console_log;

#[cfg(not(target_arch = "wasm32"))]
macro_rules! console_log {
    ($($arg:tt)*) => {
        println!($($arg)*);
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Unknown names fall back to `Info`.
    pub fn parse(s: &str) -> LogLevel {
        match s.trim().to_lowercase().as_str() {
            "error" => LogLevel::Error,
            "warn" | "warning" => LogLevel::Warn,
            "debug" => LogLevel::Debug,
            _ => LogLevel::Info,
        }
    }
}

/// JSON line logger writing to the Workers console
#[derive(Debug, Clone)]
pub struct Logger {
    level: LogLevel,
    fields: Map<String, Value>,
}

impl Logger {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            fields: Map::new(),
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Returns a logger that stamps `key` on every line it writes.
    pub fn with_field(&self, key: &str, value: impl Into<Value>) -> Self {
        let mut fields = self.fields.clone();
        fields.insert(key.to_string(), value.into());
        Self {
            level: self.level,
            fields,
        }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.level
    }

    pub fn format_line(&self, level: LogLevel, message: &str, meta: Option<&Value>) -> String {
        let mut line = Map::new();
        line.insert(
            "timestamp".to_string(),
            Value::String(chrono::Utc::now().to_rfc3339()),
        );
        line.insert("level".to_string(), Value::String(level.as_str().to_string()));
        line.insert("message".to_string(), Value::String(message.to_string()));
        for (key, value) in &self.fields {
            line.insert(key.clone(), value.clone());
        }
        if let Some(meta) = meta {
            line.insert("meta".to_string(), meta.clone());
        }
        Value::Object(line).to_string()
    }

    pub fn log(&self, level: LogLevel, message: &str, meta: Option<&Value>) {
        if self.enabled(level) {
            console_log!("{}", self.format_line(level, message, meta));
        }
    }

    pub fn error(&self, message: &str, meta: Option<&Value>) {
        self.log(LogLevel::Error, message, meta);
    }

    pub fn warn(&self, message: &str, meta: Option<&Value>) {
        self.log(LogLevel::Warn, message, meta);
    }

    pub fn info(&self, message: &str, meta: Option<&Value>) {
        self.log(LogLevel::Info, message, meta);
    }

    pub fn debug(&self, message: &str, meta: Option<&Value>) {
        self.log(LogLevel::Debug, message, meta);
    }
}

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// First call wins; later calls within the same isolate are ignored.
pub fn init_logger(level: LogLevel) {
    GLOBAL_LOGGER
        .set(Logger::new(level).with_field("service", "wake-relay"))
        .ok();
}

pub fn logger() -> &'static Logger {
    GLOBAL_LOGGER.get_or_init(|| Logger::new(LogLevel::Info).with_field("service", "wake-relay"))
}

#[macro_export]
macro_rules! log_error {
    ($msg:expr) => {
        $crate::utils::logger::logger().error($msg, None)
    };
    ($msg:expr, $meta:expr) => {
        $crate::utils::logger::logger().error($msg, Some(&$meta))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($msg:expr) => {
        $crate::utils::logger::logger().warn($msg, None)
    };
    ($msg:expr, $meta:expr) => {
        $crate::utils::logger::logger().warn($msg, Some(&$meta))
    };
}

#[macro_export]
macro_rules! log_info {
    ($msg:expr) => {
        $crate::utils::logger::logger().info($msg, None)
    };
    ($msg:expr, $meta:expr) => {
        $crate::utils::logger::logger().info($msg, Some(&$meta))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($msg:expr) => {
        $crate::utils::logger::logger().debug($msg, None)
    };
    ($msg:expr, $meta:expr) => {
        $crate::utils::logger::logger().debug($msg, Some(&$meta))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("error"), LogLevel::Error);
        assert_eq!(LogLevel::parse(" WARN "), LogLevel::Warn);
        assert_eq!(LogLevel::parse("debug"), LogLevel::Debug);
        assert_eq!(LogLevel::parse("verbose"), LogLevel::Info);
    }

    #[test]
    fn test_enabled_respects_level() {
        let logger = Logger::new(LogLevel::Warn);
        assert!(logger.enabled(LogLevel::Error));
        assert!(logger.enabled(LogLevel::Warn));
        assert!(!logger.enabled(LogLevel::Info));
    }

    #[test]
    fn test_format_line_includes_fields_and_meta() {
        let logger = Logger::new(LogLevel::Info).with_field("route", "/poll");
        let line = logger.format_line(
            LogLevel::Info,
            "poll answered",
            Some(&serde_json::json!({"signal": "noop"})),
        );
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], "INFO");
        assert_eq!(parsed["message"], "poll answered");
        assert_eq!(parsed["route"], "/poll");
        assert_eq!(parsed["meta"]["signal"], "noop");
    }
}
