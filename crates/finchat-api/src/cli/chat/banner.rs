//! Welcome banner and closing footer for chat sessions.

use console::style;

use finchat_types::chat::FirmSettings;

use crate::info::{CAPTION, DEPLOY_NOTE, TITLE, footer};

/// Print the welcome banner at the start of a chat session.
///
/// Shows the title and caption, the active firm settings, the session id,
/// and the deployment note when no API key is configured.
pub fn print_welcome_banner(settings: &FirmSettings, session_id: &str, online: bool) {
    println!();
    println!("  {}", style(TITLE).cyan().bold());
    println!("  {}", style(CAPTION).dim());
    println!();
    println!("  {}    {}", style("Firm:").bold(), settings.firm_name);
    println!("  {}   {}", style("Model:").bold(), style(&settings.model).dim());
    println!(
        "  {} {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    if !online {
        println!();
        println!("  {} {}", style("!").yellow().bold(), style("Offline").yellow());
        println!("  {}", style(DEPLOY_NOTE).dim());
    }
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

/// Print the copyright footer when the session ends.
pub fn print_footer(firm_name: &str) {
    println!();
    println!("  {}", style(footer(firm_name)).dim());
    println!();
}
