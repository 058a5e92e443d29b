//! Structured logger with hierarchical prefixing, transport dispatch, and
//! bounded history tracking
//!
//! A [`Logger`] composes a prefix chain through child derivation, gates
//! output on the `LOG_LEVEL` and `SPRUCE_LOGS` environment settings, routes
//! rendered messages to per-level transports (or console/stderr when none
//! are registered), and records every gated-in write into a process-wide
//! bounded history buffer.

use std::io::{IsTerminal, Write};
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};

use super::context::TrackingContext;
use super::environment::{
    EnvReader, ProcessEnv, SharedEnv, LOG_LEVEL, MAXIMUM_LOG_PREFIXES_LENGTH, SHOULD_LOG_TIME,
    SHOULD_LOG_TIME_DELTAS, SPRUCE_LOGS,
};
use super::level::{should_write, Level};
use super::transport::{discard_transport, stderr_transport, LogTransport, TransportMap};
use super::value::LogValue;

const PREFIX_DELIMITER: &str = " :: ";

/// ANSI foreground colors used for decoration when output is interactive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
}

impl Color {
    fn sgr(&self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
            Color::Cyan => 36,
            Color::Gray => 90,
        }
    }

    fn paint(&self, text: &str) -> String {
        format!("\u{1b}[{}m{}\u{1b}[0m", self.sgr(), text)
    }
}

/// Styles applied when colorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorOptions {
    /// Style for info and warn output
    pub info: Color,
    /// Style for error output
    pub error: Color,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            info: Color::Yellow,
            error: Color::Red,
        }
    }
}

/// Options accepted by [`Logger::new`] and the child factory
///
/// Every field is optional; unset fields fall back to defaults (or, for
/// children, to the parent's configuration).
///
/// # Example
///
/// ```no_run
/// use skillkit_core::logging::{Level, LogOptions, Logger, transport};
///
/// let log = Logger::new(
///     Some("boot"),
///     LogOptions::new()
///         .with_use_colors(false)
///         .with_transport(Level::Error, transport(|parts| {
///             eprintln!("{}", parts.join(" "));
///         })),
/// );
/// log.error(&["engine offline".into()]);
/// ```
#[derive(Clone, Default)]
pub struct LogOptions {
    /// Explicit override sink, replacing the console/stderr fallback
    pub log: Option<LogTransport>,
    /// Force colors on or off; unset auto-detects terminal interactivity
    pub use_colors: Option<bool>,
    /// Per-level transport routing table
    pub transports_by_level: Option<TransportMap>,
    /// Styles used when colorizing
    pub colors: Option<ColorOptions>,
    /// Environment reader; defaults to the live process environment
    pub env: Option<SharedEnv>,
    /// Entry-point hook for namespace gating; defaults to true
    pub is_entry_point: Option<bool>,
    /// Shared tracking context; defaults to the process-wide one
    pub context: Option<Arc<TrackingContext>>,
}

impl LogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log(mut self, sink: LogTransport) -> Self {
        self.log = Some(sink);
        self
    }

    pub fn with_use_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = Some(use_colors);
        self
    }

    /// Register a sink for a level, keeping any registered earlier
    pub fn with_transport(mut self, level: Level, sink: LogTransport) -> Self {
        let mut map = self.transports_by_level.take().unwrap_or_default();
        map.add(level, sink);
        self.transports_by_level = Some(map);
        self
    }

    pub fn with_transports(mut self, map: TransportMap) -> Self {
        self.transports_by_level = Some(map);
        self
    }

    pub fn with_colors(mut self, colors: ColorOptions) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn with_env(mut self, env: SharedEnv) -> Self {
        self.env = Some(env);
        self
    }

    pub fn with_entry_point(mut self, is_entry_point: bool) -> Self {
        self.is_entry_point = Some(is_entry_point);
        self
    }

    pub fn with_context(mut self, context: Arc<TrackingContext>) -> Self {
        self.context = Some(context);
        self
    }
}

enum ResolvedSink<'a> {
    Custom(&'a LogTransport),
    Stderr,
    Console(Level),
}

/// Structured console logger
///
/// Instances are immutable value-holders; the only mutable state is the
/// shared [`TrackingContext`]. Child loggers derived through
/// [`build_log`](Logger::build_log) extend the prefix chain and inherit
/// the parent's configuration.
pub struct Logger {
    prefix: Option<String>,
    pre: Option<String>,
    base_log: Option<LogTransport>,
    use_colors_option: Option<bool>,
    transports: TransportMap,
    colors: ColorOptions,
    should_use_colors: bool,
    is_entry_point: bool,
    env: SharedEnv,
    context: Arc<TrackingContext>,
}

impl Logger {
    pub fn new(prefix: Option<&str>, options: LogOptions) -> Self {
        let LogOptions {
            log,
            use_colors,
            transports_by_level,
            colors,
            env,
            is_entry_point,
            context,
        } = options;

        let prefix = prefix.map(str::to_string).filter(|p| !p.is_empty());
        let pre = prefix.as_ref().map(|p| format!("{p} ::"));

        let is_interactive = std::io::stdout().is_terminal();
        let should_use_colors = use_colors != Some(false) && is_interactive;

        Self {
            prefix,
            pre,
            base_log: log,
            use_colors_option: use_colors,
            transports: transports_by_level.unwrap_or_default(),
            colors: colors.unwrap_or_default(),
            should_use_colors,
            is_entry_point: is_entry_point.unwrap_or(true),
            env: env.unwrap_or_else(|| ProcessEnv::shared()),
            context: context.unwrap_or_else(TrackingContext::global),
        }
    }

    /// This logger's own label, before chaining
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Log at INFO; returns the rendered message (empty when level-gated)
    pub fn info(&self, args: &[LogValue]) -> String {
        self.write(Level::Info, self.colors.info, args)
    }

    /// Log at WARN; returns the rendered message (empty when level-gated)
    pub fn warn(&self, args: &[LogValue]) -> String {
        self.write(Level::Warn, self.colors.info, args)
    }

    /// Log at ERROR; returns the rendered message (empty when level-gated)
    pub fn error(&self, args: &[LogValue]) -> String {
        self.write(Level::Error, self.colors.error, args)
    }

    /// Derive a child logger with an extended prefix chain
    pub fn build_log(&self, prefix: Option<&str>) -> Logger {
        self.build_log_with(prefix, LogOptions::default())
    }

    /// Derive a child logger, overriding selected options
    ///
    /// Unset options inherit from this logger: the override sink, the color
    /// preference, the transport table, and the env/context/entry-point
    /// hooks.
    pub fn build_log_with(&self, prefix: Option<&str>, options: LogOptions) -> Logger {
        let child_prefix = self.combine_prefixes(prefix);

        let merged = LogOptions {
            log: options.log.or_else(|| self.base_log.clone()),
            use_colors: options.use_colors.or(self.use_colors_option),
            transports_by_level: options
                .transports_by_level
                .or_else(|| Some(self.transports.clone())),
            colors: options.colors,
            env: options.env.or_else(|| Some(self.env.clone())),
            is_entry_point: options.is_entry_point.or(Some(self.is_entry_point)),
            context: options.context.or_else(|| Some(self.context.clone())),
        };

        Logger::new(child_prefix.as_deref(), merged)
    }

    /// Start recording history, bounded at `limit` entries
    ///
    /// May be called again to change the capacity; a smaller limit applies
    /// lazily on the next write.
    pub fn start_tracking_history(&self, limit: usize) {
        self.context.set_limit(limit);
    }

    /// Stop recording; already-recorded entries are kept
    pub fn stop_tracking_history(&self) {
        self.context.set_limit(0);
    }

    pub fn get_is_tracking_history(&self) -> bool {
        self.context.is_tracking()
    }

    pub fn get_history_limit(&self) -> usize {
        self.context.limit()
    }

    /// Entries recorded through this logger's shared context
    pub fn get_history(&self) -> Vec<String> {
        self.context.history()
    }

    /// Entries recorded through the process-wide context
    pub fn global_history() -> Vec<String> {
        TrackingContext::global().history()
    }

    fn write(&self, level: Level, color: Color, raw_args: &[LogValue]) -> String {
        if !should_write(self.env.get(LOG_LEVEL).as_deref(), level) {
            return String::new();
        }

        let passes_namespace = self.passes_namespace_gate();

        let formatted: Vec<String> = raw_args.iter().map(|arg| arg.to_string()).collect();
        let (prefix, log_args) = self.build_prefixes(&formatted);

        let joined = formatted.join(" ");
        let flattened = if prefix.is_empty() {
            joined
        } else {
            format!("{prefix} {joined}")
        };

        self.context.record(&flattened);

        if !passes_namespace || self.dispatch_to_transports(level, &prefix, &formatted) {
            return flattened;
        }

        let message = self.build_message(level, color, &log_args, &prefix);
        self.emit(level, &message, &formatted);

        message
    }

    /// Allow-list gate: passes for entry-point contexts, prefixless
    /// loggers, and exact trimmed matches against `SPRUCE_LOGS`
    fn passes_namespace_gate(&self) -> bool {
        if self.is_entry_point {
            return true;
        }
        let Some(prefix) = self.prefix.as_deref() else {
            return true;
        };
        self.env
            .get(SPRUCE_LOGS)
            .map(|list| list.split(',').any(|entry| entry.trim() == prefix))
            .unwrap_or(false)
    }

    fn combine_prefixes(&self, next: Option<&str>) -> Option<String> {
        match next {
            None => self.prefix.clone(),
            Some(next) => match &self.pre {
                None => Some(next.to_string()),
                Some(pre) => Some(format!("{pre} {next}")),
            },
        }
    }

    /// Resolve the rendered prefix and the argument list passed to the
    /// color formatter
    fn build_prefixes(&self, args: &[String]) -> (String, Vec<String>) {
        let Some(pre) = &self.pre else {
            return (String::new(), args.to_vec());
        };

        let reduced = self.reduce_prefix(pre);
        if reduced.is_empty() {
            return (String::new(), args.to_vec());
        }

        let mut log_args = Vec::with_capacity(args.len() + 1);
        log_args.push(reduced.clone());
        log_args.extend(args.iter().cloned());

        (reduced.trim().to_string(), log_args)
    }

    /// Keep only the last N chain segments when
    /// `MAXIMUM_LOG_PREFIXES_LENGTH` is set; zero drops the prefix, a
    /// non-numeric value reads as unset
    fn reduce_prefix(&self, prefix: &str) -> String {
        let max = self
            .env
            .get(MAXIMUM_LOG_PREFIXES_LENGTH)
            .and_then(|raw| raw.trim().parse::<i64>().ok());

        match max {
            Some(n) if n <= 0 => String::new(),
            Some(n) => {
                let parts: Vec<&str> = prefix.split(PREFIX_DELIMITER).collect();
                let keep = parts.len().saturating_sub(n as usize);
                parts[keep..].join(PREFIX_DELIMITER)
            }
            None => prefix.to_string(),
        }
    }

    /// Fan out to every sink registered for the level; true when any were
    fn dispatch_to_transports(&self, level: Level, prefix: &str, args: &[String]) -> bool {
        let sinks = self.transports.get(level);
        if sinks.is_empty() {
            return false;
        }

        let parts: Vec<String> = std::iter::once(prefix.to_string())
            .chain(args.iter().cloned())
            .filter(|part| !part.is_empty())
            .collect();

        for sink in sinks {
            sink(&parts);
        }

        true
    }

    fn build_message(&self, level: Level, color: Color, log_args: &[String], prefix: &str) -> String {
        let base = if self.should_use_colors {
            color.paint(&log_args.join(" "))
        } else {
            build_plain_message(level, prefix)
        };

        let with_delta = if self.should_log_time_deltas() {
            format!("({}ms) {}", self.context.take_delta_ms(), base)
        } else {
            base
        };

        if self.should_log_time() {
            let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            format!("({timestamp}) {with_delta}")
        } else {
            with_delta
        }
    }

    fn emit(&self, level: Level, message: &str, formatted: &[String]) {
        let resolved = if let Some(base) = &self.base_log {
            ResolvedSink::Custom(base)
        } else if level == Level::Error {
            ResolvedSink::Stderr
        } else {
            ResolvedSink::Console(level)
        };

        // Explicit sinks get the formatted parts when colors are off and
        // the single composed message otherwise; console always receives
        // the message plus the arguments
        let parts: Vec<String> = match &resolved {
            ResolvedSink::Custom(_) | ResolvedSink::Stderr if self.should_use_colors => {
                vec![message.to_string()]
            }
            _ => std::iter::once(message.to_string())
                .chain(formatted.iter().cloned())
                .collect(),
        };

        match resolved {
            ResolvedSink::Custom(sink) => sink(&parts),
            ResolvedSink::Stderr => {
                let mut stderr = std::io::stderr();
                let _ = writeln!(stderr, "{}", parts.join(" "));
            }
            ResolvedSink::Console(Level::Warn) => eprintln!("{}", parts.join(" ")),
            ResolvedSink::Console(_) => println!("{}", parts.join(" ")),
        }
    }

    fn should_log_time_deltas(&self) -> bool {
        self.env.get(SHOULD_LOG_TIME_DELTAS).as_deref() != Some("false")
    }

    fn should_log_time(&self) -> bool {
        self.env.get(SHOULD_LOG_TIME).as_deref() != Some("false")
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("prefix", &self.prefix)
            .field("transports", &self.transports)
            .field("use_colors", &self.use_colors_option)
            .finish()
    }
}

fn build_plain_message(level: Level, prefix: &str) -> String {
    if prefix.is_empty() {
        format!("({level})")
    } else {
        format!("({level}) {prefix}")
    }
}

/// Build a root logger
///
/// # Example
///
/// ```no_run
/// use skillkit_core::logging::build_log;
///
/// let log = build_log(Some("boot"));
/// log.info(&["skill is booting".into()]);
/// ```
pub fn build_log(prefix: Option<&str>) -> Logger {
    Logger::new(prefix, LogOptions::default())
}

/// A logger that always writes to stderr, regardless of how stdout is
/// captured; handy in test harnesses
pub fn test_log() -> Logger {
    Logger::new(Some("TEST"), LogOptions::new().with_log(stderr_transport()))
}

/// A logger that silently discards all output
pub fn stub_log() -> Logger {
    Logger::new(
        Some("STUB"),
        LogOptions::new()
            .with_log(discard_transport())
            .with_use_colors(false),
    )
}

/// Log at INFO with loosely-typed arguments
///
/// ```no_run
/// use skillkit_core::logging::build_log;
/// use skillkit_core::log_info;
///
/// let log = build_log(None);
/// log_info!(log, "answer", 42, true);
/// ```
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.info(&[$($crate::logging::LogValue::from($arg)),+])
    };
}

/// Log at WARN with loosely-typed arguments
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.warn(&[$($crate::logging::LogValue::from($arg)),+])
    };
}

/// Log at ERROR with loosely-typed arguments
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.error(&[$($crate::logging::LogValue::from($arg)),+])
    };
}
