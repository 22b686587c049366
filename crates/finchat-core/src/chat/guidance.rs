//! Per-request system guidance.
//!
//! Rebuilt on every turn from the session's current firm settings so that
//! edits to the firm name or contact email apply to the next request.

use finchat_types::chat::FirmSettings;

/// Builds the system guidance sent as the first outbound message.
pub struct SystemGuidance;

impl SystemGuidance {
    pub fn render(firm_name: &str, contact_email: &str) -> String {
        format!(
            "You are representing {firm_name}. The user's email contact is {contact_email}.\n\
             \n\
             Rules:\n\
             - Be concise (5-8 sentences). Educational, not legal/tax advice.\n\
             - If needed, ask up to 2 clarifying questions."
        )
    }

    pub fn for_settings(settings: &FirmSettings) -> String {
        Self::render(&settings.firm_name, &settings.contact_email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_firm_and_contact() {
        let text = SystemGuidance::render("Acme CPA", "hello@acme.test");
        assert!(text.contains("Acme CPA"));
        assert!(text.contains("hello@acme.test"));
        assert!(text.contains("5-8 sentences"));
        assert!(text.contains("up to 2 clarifying questions"));
    }

    #[test]
    fn uses_default_settings() {
        let text = SystemGuidance::for_settings(&FirmSettings::default());
        assert!(text.starts_with("You are representing Zack Financial."));
    }
}
