use crate::error::Result;
use crate::models::{LoadState, Milestone, Outcome, Settlement, StatsRecord};
use colored::Colorize;

/// How many contributor handles are listed before collapsing into `+N`.
pub const FEATURED_CONTRIBUTORS: usize = 5;
const BAR_WIDTH: usize = 20;

/// Formats a count with thousands separators, e.g. `62,404`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_goal(goal: u64) -> String {
    if goal >= 1000 && goal % 1000 == 0 {
        format!("{}K", goal / 1000)
    } else {
        format_count(goal)
    }
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        percent
    )
}

struct Painter {
    color: bool,
}

impl Painter {
    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn value(&self, text: &str) -> String {
        if self.color {
            text.yellow().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Renders the landing page statistics panels for a terminal.
pub fn render_console(state: &LoadState, color: bool) -> String {
    let painter = Painter { color };
    let mut out = String::new();

    match state {
        LoadState::Loading => {
            push_line(&mut out, &painter.heading("GitHub Statistics"));
            for _ in 0..4 {
                placeholder_row(&mut out, &painter);
            }
            push_line(&mut out, "");
            push_line(&mut out, &painter.heading("Modrinth Statistics"));
            for _ in 0..3 {
                placeholder_row(&mut out, &painter);
            }
        }
        LoadState::Settled(settlement) => render_settlement(&mut out, settlement, &painter),
    }

    out
}

fn push_line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn label(text: &str) -> String {
    format!("  {:<20} ", text)
}

fn placeholder_row(out: &mut String, painter: &Painter) {
    let line = format!("  {}--", painter.dim(&format!("{:<20} ", "Loading...")));
    push_line(out, &line);
}

fn row(out: &mut String, painter: &Painter, name: &str, value: u64) {
    let line = format!("{}{}", label(name), painter.value(&format_count(value)));
    push_line(out, &line);
}

fn render_settlement(out: &mut String, settlement: &Settlement, painter: &Painter) {
    let record = &settlement.record;

    push_line(out, &painter.heading("GitHub Statistics"));
    row(out, painter, "GitHub Stars", record.stars);
    row(out, painter, "Forks", record.forks);
    row(out, painter, "Open Issues", record.open_issues);
    row(out, painter, "Contributors", record.contributor_count);
    render_contributors(out, record, painter);
    if record.recent_events > 0 {
        row(out, painter, "Recent Events", record.recent_events);
    }

    push_line(out, "");
    push_line(out, &painter.heading("Modrinth Statistics"));
    row(out, painter, "Total Downloads", record.downloads);
    row(out, painter, "Followers", record.followers);
    row(out, painter, "Versions Released", record.released_version_count);

    push_line(out, "");
    push_line(out, &painter.heading("Growth Analytics"));
    let achieved = format!(
        "{}{}+",
        label("Downloads Achieved"),
        painter.value(&format_count(record.downloads))
    );
    push_line(out, &achieved);
    for milestone in [Milestone::stars(record), Milestone::downloads(record)] {
        let line = format!(
            "{}{}/{} {}",
            label(milestone.label),
            format_count(milestone.current),
            format_goal(milestone.goal),
            progress_bar(milestone.percent())
        );
        push_line(out, &line);
    }

    let notice = match &settlement.outcome {
        Outcome::Live => None,
        Outcome::Degraded { groups } => {
            let names: Vec<String> = groups.iter().map(|g| g.to_string()).collect();
            Some(format!("Some stats unavailable ({}), shown as 0", names.join(", ")))
        }
        Outcome::Fallback => Some("Live stats unavailable, showing snapshot data".to_string()),
    };
    if let Some(notice) = notice {
        push_line(out, "");
        push_line(out, &painter.dim(&notice));
    }
}

fn render_contributors(out: &mut String, record: &StatsRecord, painter: &Painter) {
    let (shown, hidden) = record.featured_contributors(FEATURED_CONTRIBUTORS);
    if shown.is_empty() {
        return;
    }

    let mut handles: Vec<String> = shown.iter().map(|c| format!("@{}", c.handle)).collect();
    if hidden > 0 {
        handles.push(format!("+{}", hidden));
    }
    let line = format!("{}{}", label(""), painter.dim(&handles.join(" ")));
    push_line(out, &line);
}

pub fn render_json(settlement: &Settlement) -> Result<String> {
    Ok(serde_json::to_string_pretty(settlement)?)
}
