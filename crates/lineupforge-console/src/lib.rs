//! Colourful console output for optimizer runs.
//!
//! Provides a custom `tracing` layer that renders the optimizer's lifecycle
//! events with colours.
//!
//! ## Log Levels
//!
//! - **INFO**: Run and stage start/end
//! - **DEBUG**: Per-shard enumeration results
//! - **TRACE**: Every admitted lineup

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
static RUN_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and installs the layer behind an `EnvFilter` that
/// defaults to `lineupforge=info` and honours `RUST_LOG`.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("lineupforge=info"));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(OptimizerConsoleLayer)
            .try_init();
    });
}

// Marks the start of a run for elapsed time tracking.
fn mark_run_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    RUN_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = RUN_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 _     _                        _____
| |   (_)_ __   ___ _   _ _ __ |  ___|__  _ __ __ _  ___
| |   | | '_ \ / _ \ | | | '_ \| |_ / _ \| '__/ _` |/ _ \
| |___| | | | |  __/ |_| | |_) |  _| (_) | | | (_| |  __/
|_____|_|_| |_|\___|\__,_| .__/|_|  \___/|_|  \__, |\___|
                         |_|                  |___/
"#;

    let version_line = format!(
        "                   v{} - Exposure-Capped Lineup Optimizer\n",
        VERSION
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats optimizer events with colours.
pub struct OptimizerConsoleLayer;

impl<S: Subscriber> Layer<S> for OptimizerConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("lineupforge") {
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
    message: Option<String>,
    input: Option<String>,
    output: Option<String>,
    entrants: Option<u64>,
    skipped: Option<u64>,
    filtered: Option<u64>,
    lineup_size: Option<u64>,
    max_lineups: Option<u64>,
    min_salary: Option<u64>,
    max_salary: Option<u64>,
    combinations: Option<u64>,
    pruning: Option<bool>,
    shard: Option<u64>,
    lineups: Option<u64>,
    nodes: Option<u64>,
    pruned: Option<u64>,
    leaves: Option<u64>,
    over_budget: Option<u64>,
    under_budget: Option<u64>,
    low_value: Option<u64>,
    candidates: Option<u64>,
    accepted: Option<u64>,
    rejected: Option<u64>,
    groups: Option<u64>,
    rank: Option<u64>,
    projection: Option<f64>,
    duration_ms: Option<u64>,
    speed: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "message" => self.message = Some(s),
            "input" => self.input = Some(s),
            "output" => self.output = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let slot = match field.name() {
            "entrants" => &mut self.entrants,
            "skipped" => &mut self.skipped,
            "filtered" => &mut self.filtered,
            "lineup_size" => &mut self.lineup_size,
            "max_lineups" => &mut self.max_lineups,
            "min_salary" => &mut self.min_salary,
            "max_salary" => &mut self.max_salary,
            "combinations" => &mut self.combinations,
            "shard" => &mut self.shard,
            "lineups" => &mut self.lineups,
            "nodes" => &mut self.nodes,
            "pruned" => &mut self.pruned,
            "leaves" => &mut self.leaves,
            "over_budget" => &mut self.over_budget,
            "under_budget" => &mut self.under_budget,
            "low_value" => &mut self.low_value,
            "candidates" => &mut self.candidates,
            "accepted" => &mut self.accepted,
            "rejected" => &mut self.rejected,
            "groups" => &mut self.groups,
            "rank" => &mut self.rank,
            "duration_ms" => &mut self.duration_ms,
            "speed" => &mut self.speed,
            _ => return,
        };
        *slot = Some(value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "projection" {
            self.projection = Some(value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "pruning" {
            self.pruning = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "message" => self.message = Some(value.to_string()),
            "input" => self.input = Some(value.to_string()),
            "output" => self.output = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "optimize_start" => format_optimize_start(v),
        "optimize_end" => format_optimize_end(v),
        "pool_loaded" => format_pool_loaded(v),
        "enumerate_start" => format_enumerate_start(v),
        "enumerate_end" => format_enumerate_end(v),
        "shard_end" => format_shard_end(v),
        "diversify_end" => format_diversify_end(v),
        "lineup_accepted" => format_lineup_accepted(v, level),
        _ if level <= Level::WARN => format_warning(v, level),
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

fn format_optimize_start(v: &EventVisitor) -> String {
    mark_run_start();
    format!(
        "{} {} Optimizing │ {} │ {} per lineup │ up to {} lineups │ salary {}..={}",
        format_elapsed(),
        "▶".bright_green().bold(),
        v.input.as_deref().unwrap_or("?").white().bold(),
        count(v.lineup_size).bright_yellow(),
        count(v.max_lineups).bright_yellow(),
        count(v.min_salary).bright_yellow(),
        count(v.max_salary).bright_yellow(),
    )
}

fn format_pool_loaded(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} Pool loaded │ {} entrants",
        format_elapsed(),
        "●".bright_blue(),
        count(v.entrants).bright_yellow(),
    );
    if v.skipped.unwrap_or(0) > 0 {
        output.push_str(&format!(" │ {} skipped", count(v.skipped).yellow()));
    }
    if v.filtered.unwrap_or(0) > 0 {
        output.push_str(&format!(" │ {} filtered", count(v.filtered).yellow()));
    }
    output
}

fn format_enumerate_start(v: &EventVisitor) -> String {
    let entrants = v.entrants.unwrap_or(0) as usize;
    let lineup_size = v.lineup_size.unwrap_or(0) as usize;
    let pruning = if v.pruning.unwrap_or(true) {
        "pruning on".bright_green().to_string()
    } else {
        "pruning off".yellow().to_string()
    };

    format!(
        "{} {} {} started │ {} choose {} │ scale {} │ {}",
        format_elapsed(),
        "▶".bright_blue(),
        "Enumeration".white().bold(),
        entrants.to_formatted_string(&Locale::en).bright_yellow(),
        lineup_size.to_formatted_string(&Locale::en).bright_yellow(),
        calculate_problem_scale(entrants, lineup_size).bright_magenta(),
        pruning,
    )
}

fn format_enumerate_end(v: &EventVisitor) -> String {
    let rejected = v.over_budget.unwrap_or(0) + v.under_budget.unwrap_or(0) + v.low_value.unwrap_or(0);
    format!(
        "{} {} {} ended │ {} │ {} lineups │ {} nodes │ {} pruned │ {} rejected │ {} nodes/s",
        format_elapsed(),
        "◀".bright_blue(),
        "Enumeration".white().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        count(v.lineups).bright_green().bold(),
        count(v.nodes).white(),
        count(v.pruned).white(),
        rejected.to_formatted_string(&Locale::en).white(),
        count(v.speed).bright_magenta().bold(),
    )
}

fn format_shard_end(v: &EventVisitor) -> String {
    format!(
        "{} {} Shard {:>4} │ {:>10} lineups │ {:>12} nodes │ {:>10} pruned",
        format_elapsed(),
        "⚡".bright_cyan(),
        count(v.shard).bright_black(),
        count(v.lineups).white(),
        count(v.nodes).white(),
        count(v.pruned).bright_black(),
    )
}

fn format_diversify_end(v: &EventVisitor) -> String {
    format!(
        "{} {} {} ended │ {} │ {} of {} candidates examined │ {} accepted │ {} rejected │ {} groups",
        format_elapsed(),
        "◀".bright_blue(),
        "Diversification".white().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        count(v.accepted.map(|a| a + v.rejected.unwrap_or(0))).white(),
        count(v.candidates).white(),
        count(v.accepted).bright_green().bold(),
        count(v.rejected).yellow(),
        count(v.groups).white(),
    )
}

fn format_lineup_accepted(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    format!(
        "{} {} Lineup {:>6} │ rank {:>10} │ {:.2}",
        format_elapsed(),
        "✓".bright_green(),
        count(v.accepted).bright_black(),
        count(v.rank).bright_black(),
        v.projection.unwrap_or(0.0).bright_black(),
    )
}

fn format_optimize_end(v: &EventVisitor) -> String {
    let lineups = v.lineups.unwrap_or(0);
    let status = if lineups > 0 {
        "DONE".bright_green().bold().to_string()
    } else {
        "NO FEASIBLE LINEUPS".bright_red().bold().to_string()
    };

    let mut output = format!(
        "{} {} Optimization complete │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        status
    );

    output.push_str("\n\n");
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    output.push_str(&box_row(
        "Lineups written:",
        &lineups.to_formatted_string(&Locale::en),
    ));
    output.push_str(&box_row(
        "Output:",
        v.output.as_deref().unwrap_or("-"),
    ));
    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output
}

fn box_row(label: &str, value: &str) -> String {
    format!(
        "{}  {:<18}{:>36}  {}\n",
        "║".bright_cyan(),
        label,
        truncate_left(value, 36),
        "║".bright_cyan()
    )
}

// Keeps the tail of long paths so the file name stays visible.
fn truncate_left(s: &str, width: usize) -> String {
    let chars = s.chars().count();
    if chars <= width {
        return s.to_string();
    }
    let tail: String = s.chars().skip(chars - (width - 1)).collect();
    format!("…{tail}")
}

fn format_warning(v: &EventVisitor, level: Level) -> String {
    let message = v.message.as_deref().unwrap_or("");
    let event = v.event.as_deref().unwrap_or("");
    let text = match (event.is_empty(), message.is_empty()) {
        (true, _) => message.to_string(),
        (false, true) => event.to_string(),
        (false, false) => format!("{event}: {message}"),
    };
    if text.is_empty() {
        return String::new();
    }

    let icon = if level == Level::ERROR {
        "✗".bright_red().bold().to_string()
    } else {
        "!".yellow().bold().to_string()
    };
    format!("{} {} {}", format_elapsed(), icon, text.yellow())
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

/// Formats C(n, k) as a mantissa and power of ten.
fn calculate_problem_scale(entrants: usize, lineup_size: usize) -> String {
    if lineup_size == 0 || lineup_size >= entrants {
        return "0".to_string();
    }

    let k = lineup_size.min(entrants - lineup_size);
    let log_scale: f64 = (0..k)
        .map(|i| ((entrants - i) as f64 / (i + 1) as f64).log10())
        .sum();
    let exponent = log_scale.floor() as i32;
    let mantissa = 10f64.powf(log_scale - exponent as f64);

    format!("{:.3} x 10^{}", mantissa, exponent)
}
