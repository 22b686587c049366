//! One-shot catalog commands: `finchat services` and `finchat match`.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use finchat_types::service::ServiceRecord;

use crate::state::AppState;

/// List the whole catalog.
pub async fn list_services(state: &AppState, json: bool) -> Result<()> {
    let services = state.chat_service.services().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&*services)?);
        return Ok(());
    }

    if services.is_empty() {
        println!();
        println!(
            "  {} No services found in {}",
            style("i").blue().bold(),
            style(state.config.catalog_path.display()).yellow()
        );
        println!();
        return Ok(());
    }

    println!();
    println!("{}", services_table(&services));
    println!();
    println!(
        "  {} service{}",
        style(services.len()).bold(),
        if services.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Rank the catalog against `query` and print the shortlist.
pub async fn match_query(state: &AppState, query: &str, top_k: Option<usize>, json: bool) -> Result<()> {
    let shortlist = state.chat_service.shortlist(query, top_k).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&shortlist)?);
        return Ok(());
    }

    println!();
    if shortlist.is_empty() {
        println!(
            "  {} No services to suggest (catalog is empty).",
            style("i").blue().bold()
        );
    } else {
        println!("  {} {}", style("Suggested services for").bold(), style(query).cyan());
        println!();
        println!("{}", services_table(&shortlist));
    }
    println!();

    Ok(())
}

fn services_table(services: &[ServiceRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Service").fg(Color::White),
        Cell::new("Summary").fg(Color::White),
        Cell::new("Keywords").fg(Color::White),
    ]);

    for service in services {
        table.add_row(vec![
            Cell::new(&service.name).fg(Color::Cyan),
            Cell::new(&service.summary),
            Cell::new(service.keywords.join(", ")).fg(Color::DarkGrey),
        ]);
    }

    table
}
