use crate::models::view_types::{ProgressUpdate, ResultView, StatusTone, ViewState};
use crate::services::view::View;
use colored::Colorize;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

const BAR_WIDTH: usize = 40;

/// Renders the flow on a terminal. Progress is redrawn in place on one line.
#[derive(Default)]
pub struct TerminalView {
    reloaded: AtomicBool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the flow ended in a reload.
    pub fn reloaded(&self) -> bool {
        self.reloaded.load(Ordering::Relaxed)
    }
}

impl View for TerminalView {
    fn show_section(&self, state: ViewState) {
        match state {
            ViewState::Upload => println!("{}", "Select a file to analyze".dimmed()),
            ViewState::Loading => println!(),
            ViewState::Result => println!(),
        }
    }

    fn set_file_label(&self, name: &str) {
        println!("  {} {}", "File:".bold(), name);
    }

    fn set_detect_ready(&self, ready: bool) {
        if ready {
            println!("  {}", "Ready to detect".cyan());
        }
    }

    fn set_progress(&self, update: ProgressUpdate) {
        let filled = BAR_WIDTH * update.percent as usize / 100;
        let bar = format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled));
        let caption = update.caption.unwrap_or_else(|| format!("{}%", update.percent));
        print!("\r  [{}] {:<20}", bar.blue(), caption);
        let _ = std::io::stdout().flush();
    }

    fn show_result(&self, result: &ResultView) {
        let label = match result.status.tone {
            StatusTone::Danger => result.status.label.red().bold(),
            StatusTone::Success => result.status.label.green().bold(),
        };
        println!("  {}", label);
        println!();

        let data = result
            .chart
            .data
            .datasets
            .first()
            .map(|d| d.data.clone())
            .unwrap_or_default();
        let total: f64 = data.iter().sum();
        let values = [&result.ai_value, &result.organic_value];
        for ((name, share), text) in result.chart.data.labels.iter().zip(&data).zip(values) {
            let width = if total > 0.0 {
                (share / total * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            println!("  {:<13} {:<40} {}", name, "=".repeat(width.min(BAR_WIDTH)), text);
        }

        if let Some(preview) = &result.preview {
            println!();
            println!("  {} {}", "Preview:".bold(), preview.url.underline());
        }
    }

    fn alert(&self, message: &str) {
        eprintln!();
        eprintln!("{} {}", "!".red().bold(), message);
    }

    fn reload(&self) {
        self.reloaded.store(true, Ordering::Relaxed);
    }
}
