//! Slash command parsing and help text for the chat loop.
//!
//! Commands start with `/` and provide in-chat controls for the session,
//! the catalog, and the three firm settings.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Drop this session and start a fresh one.
    New,
    /// Show the conversation so far.
    History,
    /// List the service catalog.
    Services,
    /// Show the current firm settings.
    Settings,
    /// Set the firm display name.
    Firm(String),
    /// Set the contact email.
    Email(String),
    /// Set the model identifier.
    Model(String),
    /// Unknown command or missing argument.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim().to_string()),
        None => (trimmed.to_lowercase(), String::new()),
    };

    let with_arg = |name: &str, build: fn(String) -> ChatCommand| {
        if arg.is_empty() {
            ChatCommand::Unknown(format!("{name} requires a value"))
        } else {
            build(arg.clone())
        }
    };

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/clear" | "/cls" => ChatCommand::Clear,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        "/new" => ChatCommand::New,
        "/history" => ChatCommand::History,
        "/services" => ChatCommand::Services,
        "/settings" => ChatCommand::Settings,
        "/firm" => with_arg("/firm", ChatCommand::Firm),
        "/email" => with_arg("/email", ChatCommand::Email),
        "/model" => with_arg("/model", ChatCommand::Model),
        other => ChatCommand::Unknown(other.to_string()),
    };
    Some(command)
}

/// Print the help text listing all available commands.
pub fn print_help() {
    let rows = [
        ("/help", "Show this help message"),
        ("/clear", "Clear the screen"),
        ("/exit", "End the chat session"),
        ("/new", "Start a new session"),
        ("/history", "Show conversation history"),
        ("/services", "List the service catalog"),
        ("/settings", "Show firm name, contact email and model"),
        ("/firm <name>", "Set the firm name"),
        ("/email <addr>", "Set the contact email"),
        ("/model <id>", "Set the model"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (cmd, desc) in rows {
        println!("  {:<15} {}", style(cmd).cyan(), desc);
    }
    println!();
    println!(
        "  {}",
        style("Ctrl+D to exit, Ctrl+C safe (no message loss)").dim()
    );
    println!();
}
