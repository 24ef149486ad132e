//! Colorful console output for solver events.
//!
//! Provides a `tracing` layer that formats phase and improvement events
//! with colors. Initialized by [`crate::solve`] when the `console` feature
//! is enabled.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. Does
/// nothing if another global subscriber is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "wardplan_solver=info".parse::<Directive>() {
            filter = filter.add_directive(directive);
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(WardplanConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats solver events with colors.
pub struct WardplanConsoleLayer;

impl<S: Subscriber> Layer<S> for WardplanConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("wardplan_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    phase: Option<String>,
    duration_ms: Option<u64>,
    steps: Option<u64>,
    step: Option<u64>,
    patients: Option<u64>,
    wards: Option<u64>,
    horizon: Option<u64>,
    objective: Option<f64>,
    score: Option<f64>,
    best: Option<f64>,
    error: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "phase" => self.phase = Some(s.trim_matches('"').to_string()),
            "error" => self.error = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "duration_ms" => self.duration_ms = Some(value),
            "steps" | "rounds" => self.steps = Some(value),
            "step" => self.step = Some(value),
            "patients" => self.patients = Some(value),
            "wards" => self.wards = Some(value),
            "horizon" => self.horizon = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "objective" => self.objective = Some(value),
            "score" => self.score = Some(value),
            "best" => self.best = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "phase" => self.phase = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "phase_start" => format_phase_start(v),
        "phase_end" => format_phase_end(v),
        "new_best" => format_new_best(v),
        "oracle_failed" => format_oracle_failed(v),
        "solve_end" => format_solve_end(v),
        _ => String::new(),
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} patients ({}), wards ({}), horizon ({} days)",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        v.patients.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow(),
        v.wards.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow(),
        v.horizon.unwrap_or(0).to_string().bright_yellow(),
    )
}

fn format_phase_start(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    let mut line = format!(
        "{} {} {} {} started",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", phase).bright_cyan(),
        phase.white().bold(),
    );
    if let Some(objective) = v.objective {
        line.push_str(&format!(" from objective ({})", format_objective(objective)));
    }
    line
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    let mut line = format!(
        "{} {} {} {} ended: time spent ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", phase).bright_cyan(),
        phase.white().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    );
    if let Some(objective) = v.objective {
        line.push_str(&format!(", objective ({})", format_objective(objective)));
    }
    if let Some(steps) = v.steps {
        line.push_str(&format!(
            ", step total ({})",
            steps.to_formatted_string(&Locale::en).white()
        ));
    }
    line
}

fn format_new_best(v: &EventVisitor) -> String {
    format!(
        "    {} Step {:>7} | {}",
        "->".bright_blue(),
        v.step.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        format_objective(v.score.unwrap_or(f64::NAN)),
    )
}

fn format_oracle_failed(v: &EventVisitor) -> String {
    format!(
        "{} {} {} exact oracle failed, keeping metaheuristic result: {}",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        "[Hybrid]".bright_cyan(),
        v.error.as_deref().unwrap_or("unknown error"),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    format!(
        "{} {} {} Solving ended in {}: best objective ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_objective(v.best.unwrap_or(f64::NAN)),
    )
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
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

fn format_objective(value: f64) -> String {
    if value.is_finite() {
        format!("{:.4}", value).bright_green().to_string()
    } else {
        "N/A".white().to_string()
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
            event: Some("step".to_string()),
            ..Default::default()
        };
        assert!(format_event(&visitor).is_empty());
    }
}
