//! Static presentation text shared by the terminal chat and the HTTP API.

use chrono::Datelike;
use serde::Serialize;

pub const TITLE: &str = "Finance Services Chatbot";

pub const CAPTION: &str = "Educational use only - not legal or tax advice.";

pub const DEPLOY_NOTE: &str =
    "Set your OPENAI_API_KEY in secrets.toml in the data directory or as an environment variable on your host.";

/// Copyright footer for `firm_name`, stamped with the current year.
pub fn footer(firm_name: &str) -> String {
    footer_for_year(chrono::Local::now().year(), firm_name)
}

fn footer_for_year(year: i32, firm_name: &str) -> String {
    format!("\u{a9} {year} {firm_name} - Educational information only.")
}

/// Everything a front end needs to frame the conversation.
#[derive(Debug, Clone, Serialize)]
pub struct AppInfo {
    pub title: &'static str,
    pub caption: &'static str,
    pub deploy_note: &'static str,
    pub footer: String,
    pub online: bool,
    pub version: &'static str,
}

impl AppInfo {
    pub fn new(firm_name: &str, online: bool) -> Self {
        Self {
            title: TITLE,
            caption: CAPTION,
            deploy_note: DEPLOY_NOTE,
            footer: footer(firm_name),
            online,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_names_year_and_firm() {
        assert_eq!(
            footer_for_year(2025, "Zack Financial"),
            "\u{a9} 2025 Zack Financial - Educational information only."
        );
    }

    #[test]
    fn app_info_carries_static_text() {
        let info = AppInfo::new("Acme CPA", false);
        assert_eq!(info.title, TITLE);
        assert!(info.footer.contains("Acme CPA"));
        assert!(!info.online);
    }
}
