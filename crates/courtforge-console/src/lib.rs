//! Colorful console output for solver events.
//!
//! Provides a custom `tracing` layer that renders the structured events of
//! `courtforge_solver` with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solve start/end, model built, solutions)
//! - **DEBUG**: Failed root propagation, tournaments without a first solution
//! - **TRACE**: Constraint posting per generator

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes the solver console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing, honoring `RUST_LOG`.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = match "courtforge_solver=info".parse::<Directive>() {
            Ok(directive) => EnvFilter::builder()
                .with_default_directive(directive)
                .from_env_lossy(),
            Err(_) => EnvFilter::from_default_env(),
        };

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(CourtConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
  ____                  _   _____
 / ___|___  _   _ _ __| |_|  ___|__  _ __ __ _  ___
| |   / _ \| | | | '__| __| |_ / _ \| '__/ _` |/ _ \
| |__| (_) | |_| | |  | |_|  _| (_) | | | (_| |  __/
 \____\___/ \__,_|_|   \__|_|  \___/|_|  \__, |\___|
                                         |___/
"#;

    let version_line = format!("                 v{VERSION} - Tournament Scheduler\n");

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct CourtConsoleLayer;

impl<S: Subscriber> Layer<S> for CourtConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !target.starts_with("courtforge_solver") && !target.starts_with("courtforge::") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{output}");
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    strategy: Option<String>,
    state: Option<String>,
    feasibility: Option<String>,
    generator: Option<String>,
    events: Option<u64>,
    variables: Option<u64>,
    constraints: Option<u64>,
    generators: Option<u64>,
    solution: Option<u64>,
    solutions: Option<u64>,
    duration_ms: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{value:?}").trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "strategy" => self.strategy = Some(s),
            "state" => self.state = Some(s),
            "feasibility" => self.feasibility = Some(s),
            "generator" => self.generator = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "events" => self.events = Some(value),
            "variables" => self.variables = Some(value),
            "constraints" => self.constraints = Some(value),
            "generators" => self.generators = Some(value),
            "solution" => self.solution = Some(value),
            "solutions" => self.solutions = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "strategy" => self.strategy = Some(value.to_string()),
            "state" => self.state = Some(value.to_string()),
            "feasibility" => self.feasibility = Some(value.to_string()),
            "generator" => self.generator = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "model_built" => format_model_built(v),
        "solution_found" => format_solution_found(v),
        "search_exhausted" => format_search_end(v, "Search exhausted"),
        "search_stopped" => format_search_end(v, "Search stopped"),
        "solve_end" => format_solve_end(v),
        _ if level == Level::TRACE => format_posted(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    format!(
        "{} {} Solving │ {} events │ strategy {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.events).bright_yellow(),
        v.strategy.as_deref().unwrap_or("unknown").bright_magenta()
    )
}

fn format_model_built(v: &EventVisitor) -> String {
    format!(
        "{} {} Model built │ {} variables │ {} constraints │ {} generators │ {}",
        format_elapsed(),
        "◆".bright_blue(),
        count(v.variables).bright_yellow(),
        count(v.constraints).bright_yellow(),
        count(v.generators).white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    )
}

fn format_solution_found(v: &EventVisitor) -> String {
    format!(
        "{} {} Solution #{} │ {}",
        format_elapsed(),
        "✓".bright_green(),
        count(v.solution).bright_green().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    )
}

fn format_search_end(v: &EventVisitor, label: &str) -> String {
    format!(
        "{} {} {} │ {} solutions │ {}",
        format_elapsed(),
        "◀".bright_blue(),
        label.white().bold(),
        count(v.solutions).bright_yellow(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    )
}

fn format_posted(v: &EventVisitor) -> String {
    let Some(generator) = v.generator.as_deref() else {
        return String::new();
    };
    format!(
        "{} {} {} │ {} constraints",
        format_elapsed(),
        "·".bright_black(),
        generator.bright_black(),
        count(v.constraints).bright_black()
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let state = v.state.as_deref().unwrap_or("unknown");
    let feasibility = v.feasibility.as_deref().unwrap_or("undefined");
    let status = match feasibility {
        "true" => "FEASIBLE".bright_green().bold().to_string(),
        "false" => "INFEASIBLE".bright_red().bold().to_string(),
        _ => "UNDECIDED".bright_yellow().bold().to_string(),
    };

    let mut output = format!(
        "{} {} Solving complete │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        state.white(),
        status
    );

    let inner_width: usize = 58;
    let border = "═".repeat(inner_width);
    output.push_str("\n\n");
    output.push_str(&format!("╔{border}╗").bright_cyan().to_string());
    output.push('\n');

    let rows = [
        ("Solutions:", count(v.solutions)),
        ("Variables:", count(v.variables)),
        ("Constraints:", count(v.constraints)),
        ("Search time:", format_duration_ms(v.duration_ms.unwrap_or(0))),
    ];
    for (label, value) in rows {
        output.push_str(&format!(
            "{}  {:<18}{:>36}  {}",
            "║".bright_cyan(),
            label,
            value,
            "║".bright_cyan()
        ));
        output.push('\n');
    }

    output.push_str(&format!("╚{border}╝").bright_cyan().to_string());
    output.push('\n');
    output
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{mins}m {secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let visitor = EventVisitor {
            event: Some("other".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor, Level::INFO).is_empty());
        assert!(format_event(&EventVisitor::default(), Level::TRACE).is_empty());
    }

    #[test]
    fn test_solve_end_lists_counters() {
        let visitor = EventVisitor {
            event: Some("solve_end".to_string()),
            feasibility: Some("true".to_string()),
            solutions: Some(1_200),
            ..EventVisitor::default()
        };
        let output = format_event(&visitor, Level::INFO);
        assert!(output.contains("Solving complete"));
        assert!(output.contains("1,200"));
    }
}
