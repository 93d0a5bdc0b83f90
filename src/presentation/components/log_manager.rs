use chrono::{DateTime, Local};
use std::collections::{HashSet, VecDeque};

const MAX_LOG_SIZE: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "Debug",
            LogLevel::Info => "Info",
            LogLevel::Warn => "Warn",
            LogLevel::Error => "Error",
        }
    }

    fn from_tracing(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::ERROR => LogLevel::Error,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::INFO => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl LogEntry {
    pub fn format_timestamp(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

/// Event forwarded by the tracing capture layer.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: tracing::Level,
    pub message: String,
}

pub struct LogManager {
    logs: VecDeque<LogEntry>,
    visible_levels: HashSet<LogLevel>,
}

impl LogManager {
    pub fn new() -> Self {
        Self {
            logs: VecDeque::with_capacity(MAX_LOG_SIZE),
            visible_levels: [LogLevel::Info, LogLevel::Warn, LogLevel::Error]
                .into_iter()
                .collect(),
        }
    }

    pub fn push(&mut self, level: LogLevel, message: String) {
        if self.logs.len() >= MAX_LOG_SIZE {
            self.logs.pop_front();
        }
        self.logs.push_back(LogEntry {
            level,
            message,
            timestamp: Local::now(),
        });
    }

    pub fn push_captured(&mut self, event: CapturedEvent) {
        self.push(LogLevel::from_tracing(&event.level), event.message);
    }

    pub fn clear(&mut self) {
        self.logs.clear();
    }

    pub fn all_logs(&self) -> impl Iterator<Item = &LogEntry> {
        self.logs.iter()
    }

    pub fn filtered_logs(&self) -> impl Iterator<Item = &LogEntry> {
        self.logs
            .iter()
            .filter(|entry| self.visible_levels.contains(&entry.level))
    }

    pub fn filtered_logs_reversed(&self) -> impl Iterator<Item = &LogEntry> {
        self.logs
            .iter()
            .rev()
            .filter(|entry| self.visible_levels.contains(&entry.level))
    }

    pub fn is_level_visible(&self, level: LogLevel) -> bool {
        self.visible_levels.contains(&level)
    }

    pub fn set_level_visible(&mut self, level: LogLevel, visible: bool) {
        if visible {
            self.visible_levels.insert(level);
        } else {
            self.visible_levels.remove(&level);
        }
    }

    pub fn export_text(&self) -> String {
        self.all_logs()
            .map(|entry| {
                format!(
                    "[{}] [{}] {}",
                    entry.format_timestamp(),
                    entry.level.label(),
                    entry.message
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
