//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use instaplot_domain::{AxisMode, Card, CardId};
use instaplot_gatekeeper::SyncReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest claim text shown in a table cell
const CLAIMS_WIDTH: usize = 40;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format cards output; `selected` is marked in table mode.
    pub fn format_cards(&self, cards: &[Card], selected: Option<&CardId>) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(cards)?),
            OutputFormat::Table => Ok(self.format_cards_table(cards, selected)),
            OutputFormat::Quiet => Ok(format_cards_quiet(cards)),
        }
    }

    /// Format a single card.
    pub fn format_card(&self, card: &Card) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(card)?),
            _ => self.format_cards(std::slice::from_ref(card), None),
        }
    }

    /// Format cards as a table.
    fn format_cards_table(&self, cards: &[Card], selected: Option<&CardId>) -> String {
        if cards.is_empty() {
            return self.colorize("No cards on the board.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["", "ID", "Time", "Actor", "Place", "Claims", "Truth", "Position"]);

        for card in cards {
            let marker = if selected == Some(&card.id) { "*" } else { "" };
            let position = format!("({:.1}, {:.1})", card.x, card.y);
            builder.push_record([
                marker.to_string(),
                short_id(&card.id),
                card.time.clone(),
                card.actor.clone(),
                card.place.clone(),
                truncate(&card.claims, CLAIMS_WIDTH),
                self.truth_badge(card.is_lie),
                position,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a bulk-sync report.
    pub fn sync_report(&self, report: &SyncReport) -> String {
        let mut lines = Vec::with_capacity(report.errors.len() + 1);
        lines.push(if report.is_complete() && report.is_applicable() {
            self.success(&report.summary())
        } else if report.is_applicable() {
            self.warning(&report.summary())
        } else {
            self.error(&report.summary())
        });
        lines.extend(report.errors.iter().map(|e| format!("  {}", e)));
        lines.join("\n")
    }

    /// Format the axis modes.
    pub fn axes(&self, x_axis: AxisMode, y_axis: AxisMode) -> String {
        match self.format {
            OutputFormat::Json => serde_json::json!({ "x": x_axis, "y": y_axis }).to_string(),
            OutputFormat::Quiet => format!("{} {}", x_axis, y_axis),
            OutputFormat::Table => self.info(&format!("x: {}, y: {}", x_axis, y_axis)),
        }
    }

    /// Lie/Truth badge.
    pub fn truth_badge(&self, is_lie: bool) -> String {
        if is_lie {
            self.colorize("Lie", "red")
        } else {
            self.colorize("Truth", "green")
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Format cards in quiet mode (IDs only).
fn format_cards_quiet(cards: &[Card]) -> String {
    let ids: Vec<&str> = cards.iter().map(|c| c.id.as_str()).collect();
    ids.join("\n")
}

/// First 8 characters of an id; commands accept any unique prefix.
fn short_id(id: &CardId) -> String {
    id.as_str().chars().take(8).collect()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
