//! Terminal markdown rendering for assistant replies.
//!
//! `ChatRenderer` renders the full reply through a `termimad` skin once it
//! arrives, then prints a one-line stats footer and the suggested services.

use console::style;
use termimad::MadSkin;
use termimad::crossterm::style::Color;

use finchat_types::chat::TurnStatus;
use finchat_types::service::ServiceRecord;

pub struct ChatRenderer {
    skin: MadSkin,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);
        Self { skin }
    }

    /// Render a complete markdown reply, indented to match the prompt.
    pub fn render_final(&self, markdown: &str) -> String {
        let rendered = self.skin.term_text(markdown).to_string();
        indent(&rendered)
    }

    /// Format: "| {status} . {time}s . {model}"
    pub fn print_stats_footer(&self, status: TurnStatus, response_ms: u64, model: &str) {
        let seconds = response_ms as f64 / 1000.0;
        let status_label = match status {
            TurnStatus::Completed => style(status.to_string()).green(),
            TurnStatus::Offline => style(status.to_string()).yellow(),
            TurnStatus::Failed => style(status.to_string()).red(),
        };
        println!(
            "\n  {} {} {} {:.1}s {} {}",
            style("|").dim(),
            status_label,
            style("\u{00b7}").dim(),
            style(seconds).dim(),
            style("\u{00b7}").dim(),
            style(model).dim(),
        );
    }

    /// Print the suggested-services footer under a reply.
    pub fn print_shortlist(&self, shortlist: &[ServiceRecord]) {
        if shortlist.is_empty() {
            return;
        }
        println!("  {}", style("Suggested services:").bold());
        for line in shortlist_lines(shortlist) {
            println!("  {line}");
        }
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn shortlist_lines(shortlist: &[ServiceRecord]) -> Vec<String> {
    shortlist
        .iter()
        .map(|s| {
            if s.summary.is_empty() {
                format!("- {}", s.name)
            } else {
                format!("- {}: {}", s.name, s.summary)
            }
        })
        .collect()
}
