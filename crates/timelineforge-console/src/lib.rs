//! Colorful console output for conversion events.
//!
//! Provides a custom `tracing` layer that formats conversion events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (conversion start/end, grounding summary)
//! - **WARN**: Rejected problems
//! - **DEBUG**: One line per analyzed action and per synthesized timeline

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static CONVERT_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the TimelineForge banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::builder()
            .with_default_directive("timelineforge_convert=info".parse().unwrap())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ConversionConsoleLayer)
            .try_init();
    });
}

// Marks the start of a conversion for elapsed time tracking.
fn mark_convert_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    CONVERT_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = CONVERT_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 _____ _                _ _            _____
|_   _(_)_ __ ___   ___| (_)_ __   ___|  ___|__  _ __ __ _  ___
  | | | | '_ ` _ \ / _ \ | | '_ \ / _ \ |_ / _ \| '__/ _` |/ _ \
  | | | | | | | | |  __/ | | | | |  __/  _| (_) | | | (_| |  __/
  |_| |_|_| |_| |_|\___|_|_|_| |_|\___|_|  \___/|_|  \__, |\___|
                                                     |___/
"#;

    let version_line = format!(
        "                     v{} - Planning to Timeline Converter\n",
        VERSION
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats conversion events with colors.
pub struct ConversionConsoleLayer;

impl<S: Subscriber> Layer<S> for ConversionConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("timelineforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    problem: Option<String>,
    action: Option<String>,
    timeline: Option<String>,
    from: Option<String>,
    temporary: Option<String>,
    final_value: Option<String>,
    error: Option<String>,
    fluent_count: Option<u64>,
    action_count: Option<u64>,
    timeline_count: Option<u64>,
    resource_count: Option<u64>,
    token_type_count: Option<u64>,
    static_token_count: Option<u64>,
    token_types: Option<u64>,
    static_tokens: Option<u64>,
    duration: Option<u64>,
    duration_ms: Option<u64>,
    threads: Option<u64>,
    merged: Option<bool>,
}

impl EventVisitor {
    fn set_str(&mut self, name: &str, value: String) {
        let slot = match name {
            "event" => &mut self.event,
            "problem" => &mut self.problem,
            "action" => &mut self.action,
            "timeline" => &mut self.timeline,
            "from" => &mut self.from,
            "temporary" => &mut self.temporary,
            "final_value" => &mut self.final_value,
            "error" => &mut self.error,
            _ => return,
        };
        *slot = Some(value);
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_str(field.name(), s.trim_matches('"').to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "fluent_count" => self.fluent_count = Some(value),
            "action_count" => self.action_count = Some(value),
            "timeline_count" => self.timeline_count = Some(value),
            "resource_count" => self.resource_count = Some(value),
            "token_type_count" => self.token_type_count = Some(value),
            "static_token_count" => self.static_token_count = Some(value),
            "token_types" => self.token_types = Some(value),
            "static_tokens" => self.static_tokens = Some(value),
            "duration" => self.duration = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "threads" => self.threads = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_u128(&mut self, field: &Field, value: u128) {
        self.record_u64(field, u64::try_from(value).unwrap_or(u64::MAX));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "merged" {
            self.merged = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_str(field.name(), value.to_string());
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "convert_start" => format_convert_start(v),
        "fluents_grounded" => format_fluents_grounded(v),
        "action_analyzed" => format_action_analyzed(v, level),
        "timeline_synthesized" => format_timeline_synthesized(v, level),
        "convert_end" => format_convert_end(v),
        "convert_rejected" => format_convert_rejected(v),
        "synthesis_pool_failed" => format_pool_failed(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_convert_start(v: &EventVisitor) -> String {
    mark_convert_start();
    let problem = v.problem.as_deref().unwrap_or("problem");

    format!(
        "{} {} Converting {} │ {} fluents │ {} actions",
        format_elapsed(),
        "▶".bright_green().bold(),
        problem.white().bold(),
        count(v.fluent_count).bright_yellow(),
        count(v.action_count).bright_yellow(),
    )
}

fn format_fluents_grounded(v: &EventVisitor) -> String {
    format!(
        "{} {} Grounded │ {} timelines │ {} resources",
        format_elapsed(),
        "◆".bright_blue(),
        count(v.timeline_count).bright_yellow(),
        count(v.resource_count).bright_yellow(),
    )
}

fn format_action_analyzed(v: &EventVisitor, level: Level) -> String {
    if level < Level::DEBUG {
        return String::new();
    }

    let icon = if v.merged.unwrap_or(false) {
        "≡".bright_black().to_string()
    } else {
        "✓".bright_green().to_string()
    };

    format!(
        "{} {} {} │ {}: {} → {} → {} │ {}",
        format_elapsed(),
        icon,
        v.action.as_deref().unwrap_or("?").white(),
        v.timeline.as_deref().unwrap_or("?").bright_cyan(),
        v.from.as_deref().unwrap_or("?"),
        v.temporary.as_deref().unwrap_or("?").bright_magenta(),
        v.final_value.as_deref().unwrap_or("?"),
        format!("d={}", v.duration.unwrap_or(0)).yellow(),
    )
}

fn format_timeline_synthesized(v: &EventVisitor, level: Level) -> String {
    if level < Level::DEBUG {
        return String::new();
    }

    format!(
        "{} {} {} │ {} token types │ {} static tokens",
        format_elapsed(),
        "·".bright_black(),
        v.timeline.as_deref().unwrap_or("?").bright_cyan(),
        count(v.token_types).white(),
        count(v.static_tokens).white(),
    )
}

fn format_convert_end(v: &EventVisitor) -> String {
    let duration = v.duration_ms.unwrap_or(0);

    format!(
        "{} {} Conversion complete │ {} │ {} timelines │ {} token types │ {} static tokens",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(duration).yellow(),
        count(v.timeline_count).bright_yellow(),
        count(v.token_type_count).bright_yellow(),
        count(v.static_token_count).bright_yellow(),
    )
}

fn format_convert_rejected(v: &EventVisitor) -> String {
    let error = v.error.as_deref().unwrap_or("unknown error");

    format!(
        "{} {} {} │ {}",
        format_elapsed(),
        "✗".bright_red().bold(),
        "REJECTED".bright_red().bold(),
        error.red(),
    )
}

fn format_pool_failed(v: &EventVisitor) -> String {
    format!(
        "{} {} Thread pool of {} unavailable, synthesizing sequentially │ {}",
        format_elapsed(),
        "!".bright_yellow().bold(),
        count(v.threads).bright_yellow(),
        v.error.as_deref().unwrap_or("unknown error"),
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor(event: &str) -> EventVisitor {
        EventVisitor {
            event: Some(event.to_string()),
            ..EventVisitor::default()
        }
    }

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(15), "15ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_event_is_silent() {
        assert!(format_event(&visitor("phase_start"), Level::INFO).is_empty());
        assert!(format_event(&EventVisitor::default(), Level::INFO).is_empty());
    }

    #[test]
    fn test_convert_end_lists_counts() {
        let mut v = visitor("convert_end");
        v.timeline_count = Some(3);
        v.token_type_count = Some(1234);
        let line = format_event(&v, Level::INFO);
        assert!(line.contains("Conversion complete"));
        assert!(line.contains("1,234"));
    }

    #[test]
    fn test_rejection_shows_error() {
        let mut v = visitor("convert_rejected");
        v.error = Some("Resource `power` has 2 providers".to_string());
        let line = format_event(&v, Level::WARN);
        assert!(line.contains("REJECTED"));
        assert!(line.contains("Resource `power` has 2 providers"));
    }

    #[test]
    fn test_set_str_ignores_unknown_fields() {
        let mut v = EventVisitor::default();
        v.set_str("timeline", "kettle".to_string());
        v.set_str("score", "-1".to_string());
        assert_eq!(v.timeline.as_deref(), Some("kettle"));
        assert!(v.event.is_none());
    }
}
