//! Main chat loop orchestration.
//!
//! Creates a session, prints the banner, then reads lines until EOF or
//! `/exit`. Each non-command line is one turn through the chat service; the
//! reply is rendered as markdown followed by the suggested services.

use std::time::{Duration, Instant};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use uuid::Uuid;

use finchat_types::chat::{FirmSettings, FirmSettingsPatch, MessageRole};

use crate::cli::services::list_services;
use crate::state::AppState;

use super::banner::{print_footer, print_welcome_banner};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let spinner_style = ProgressStyle::default_spinner()
        .template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(spinner_style);
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

async fn start_session(state: &AppState) -> anyhow::Result<(Uuid, FirmSettings)> {
    let service = &state.chat_service;
    let session_id = service.create_session();
    let settings = service.settings(&session_id).await?;
    print_welcome_banner(
        &settings,
        &session_id.to_string(),
        service.client().is_configured(),
    );
    Ok((session_id, settings))
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let service = &state.chat_service;
    let renderer = ChatRenderer::new();

    let (mut session_id, mut settings) = start_session(state).await?;

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Line(text) if text.is_empty() => continue,
            InputEvent::Line(text) => text,
        };

        if let Some(cmd) = commands::parse(&text) {
            let patch = match cmd {
                ChatCommand::Help => {
                    commands::print_help();
                    continue;
                }
                ChatCommand::Clear => {
                    chat_input.clear();
                    continue;
                }
                ChatCommand::Exit => break,
                ChatCommand::New => {
                    service.end_session(&session_id);
                    (session_id, settings) = start_session(state).await?;
                    continue;
                }
                ChatCommand::History => {
                    print_history(state, &session_id, &settings).await?;
                    continue;
                }
                ChatCommand::Services => {
                    list_services(state, false).await?;
                    continue;
                }
                ChatCommand::Settings => {
                    print_settings(&settings);
                    continue;
                }
                ChatCommand::Firm(name) => FirmSettingsPatch {
                    firm_name: Some(name),
                    ..Default::default()
                },
                ChatCommand::Email(email) => FirmSettingsPatch {
                    contact_email: Some(email),
                    ..Default::default()
                },
                ChatCommand::Model(model) => FirmSettingsPatch {
                    model: Some(model),
                    ..Default::default()
                },
                ChatCommand::Unknown(cmd_name) => {
                    println!(
                        "\n  {} Unknown command: {}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(cmd_name).dim()
                    );
                    continue;
                }
            };

            settings = service.update_settings(&session_id, patch).await?;
            println!("\n  {} Settings updated.", style("*").cyan().bold());
            print_settings(&settings);
            continue;
        }

        let spinner = thinking_spinner();
        let start_time = Instant::now();
        let turn = service.send_message(Some(session_id), &text).await;
        spinner.finish_and_clear();
        let response_ms = start_time.elapsed().as_millis() as u64;

        println!();
        println!("  {}", style(&settings.firm_name).cyan().bold());
        println!("{}", renderer.render_final(&turn.reply));
        renderer.print_stats_footer(turn.status, response_ms, &settings.model);
        renderer.print_shortlist(&turn.shortlist);
        println!();
    }

    chat_input.flush();
    println!("\n  {}", style("Session ended.").dim());
    print_footer(&settings.firm_name);
    service.end_session(&session_id);
    Ok(())
}

async fn print_history(state: &AppState, session_id: &Uuid, settings: &FirmSettings) -> anyhow::Result<()> {
    let messages = state.chat_service.transcript(session_id).await?;
    println!();
    if messages.is_empty() {
        println!("  {}", style("No messages yet.").dim());
    }
    for msg in &messages {
        let role_label = match msg.role {
            MessageRole::User => style("You".to_string()).green(),
            _ => style(settings.firm_name.clone()).cyan(),
        };
        let preview: String = if msg.content.chars().count() > 100 {
            let head: String = msg.content.chars().take(97).collect();
            format!("{head}...")
        } else {
            msg.content.clone()
        };
        println!("  {} {}", role_label.bold(), preview);
    }
    println!();
    Ok(())
}

fn print_settings(settings: &FirmSettings) {
    println!();
    println!("  {}   {}", style("Firm:").bold(), settings.firm_name);
    println!("  {}  {}", style("Email:").bold(), settings.contact_email);
    println!("  {}  {}", style("Model:").bold(), settings.model);
    println!();
}
