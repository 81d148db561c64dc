use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Receives the writer's diagnostics.
///
/// One logger is handed to each [`MovFile`](crate::MovFile) when it is built;
/// there is no process wide sink.
pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, tag: &str, message: fmt::Arguments<'_>);
}

/// Drops everything. Used when no logger is given.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _: LogLevel, _: &str, _: fmt::Arguments<'_>) {}
}

/// Forwards records to `tracing` with the tag as a field.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, tag: &str, message: fmt::Arguments<'_>) {
        match level {
            LogLevel::Debug => tracing::debug!(tag, "{}", message),
            LogLevel::Info => tracing::info!(tag, "{}", message),
            LogLevel::Warn => tracing::warn!(tag, "{}", message),
            LogLevel::Error => tracing::error!(tag, "{}", message),
        }
    }
}
