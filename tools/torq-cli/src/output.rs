//! Terminal and JSON rendering.
//!
//! In `--json` mode only machine-readable documents reach stdout and every
//! human-oriented helper is a no-op, except errors which are emitted as
//! `{"error": ...}` on stderr.

use console::{style, Term};
use serde::Serialize;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Human,
    Json,
}

/// Where the CLI writes user-facing text.
#[derive(Clone)]
pub struct Output {
    mode: Mode,
    verbose: bool,
    term: Term,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            mode: if json { Mode::Json } else { Mode::Human },
            verbose,
            term: Term::stdout(),
        }
    }

    fn human(&self) -> bool {
        self.mode == Mode::Human
    }

    pub fn info(&self, msg: &str) {
        if self.human() {
            println!("{} {}", style("ℹ").blue(), msg);
        }
    }

    pub fn success(&self, msg: &str) {
        if self.human() {
            println!("{} {}", style("✓").green(), msg);
        }
    }

    pub fn warn(&self, msg: &str) {
        if self.human() {
            eprintln!("{} {}", style("⚠").yellow(), msg);
        }
    }

    pub fn error(&self, msg: &str) {
        match self.mode {
            Mode::Json => eprintln!("{}", serde_json::json!({ "error": msg })),
            Mode::Human => eprintln!("{} {}", style("✗").red(), style(msg).red()),
        }
    }

    /// Diagnostics shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose && self.human() {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    pub fn header(&self, title: &str) {
        if self.human() {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Emit a JSON document on stdout, pretty-printed.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(doc) => println!("{}", doc),
            Err(e) => self.error(&format!("Failed to render JSON: {}", e)),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.human() {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if self.human() {
            println!("  {} {}", style("•").dim(), item);
        }
    }

    /// Print rows under a bold heading, padding each column to its widest
    /// cell.
    pub fn table(&self, headings: &[&str], rows: &[Vec<String>]) {
        if !self.human() {
            return;
        }

        let widths = column_widths(headings, rows);
        let heading: Vec<String> = headings.iter().map(|h| h.to_string()).collect();
        println!("  {}", style(pad_row(&heading, &widths)).bold());
        for row in rows {
            println!("  {}", pad_row(row, &widths));
        }
    }

    /// Print multi-line text indented under the current section.
    pub fn block(&self, text: &str) {
        if self.human() {
            for line in text.lines() {
                println!("    {}", line);
            }
        }
    }

    pub fn link(&self, url: &str) {
        if self.human() {
            println!("  {}", style(url).cyan().underlined());
        }
    }

    pub fn is_json(&self) -> bool {
        self.mode == Mode::Json
    }

    /// Whether stdout is attached to a terminal.
    pub fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

fn column_widths(headings: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headings.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }
    widths
}

fn pad_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        let width = widths.get(i).copied().unwrap_or(0);
        let fill = width.saturating_sub(cell.chars().count());
        line.extend(std::iter::repeat(' ').take(fill));
    }
    line.trim_end().to_string()
}
