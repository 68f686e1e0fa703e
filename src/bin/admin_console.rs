//! src/bin/admin_console.rs
//!
//! Terminal front end of the admin dashboard.

use anyhow::Context;
use booking_desk::configuration::get_configuration;
use booking_desk::dashboard::{Command, ConsoleView, Dashboard};
use booking_desk::telemetry::{get_subscriber, init_subscriber};
use std::io::BufReader;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // keep stdout for the dashboard itself
    let subscriber = get_subscriber("admin_console".into(), "warn".into(), std::io::stderr);
    init_subscriber(subscriber);

    let settings = get_configuration()
        .context("Failed to read configuration.")?
        .dashboard;
    let client = settings.client()?;
    client
        .login(&settings.username, &settings.password)
        .await
        .context("Failed to log in to the admin API.")?;

    let view = Arc::new(ConsoleView::new(
        BufReader::new(std::io::stdin()),
        std::io::stdout(),
    ));
    let dashboard = Arc::new(
        Dashboard::new(client, Arc::clone(&view))
            .with_refresh_interval(settings.refresh_interval())
            .with_banner_lifetime(settings.error_banner_lifetime()),
    );
    let polling_task = tokio::spawn({
        let dashboard = Arc::clone(&dashboard);
        async move { dashboard.run_until_stopped().await }
    });

    loop {
        let input = Arc::clone(&view);
        let Some(line) = tokio::task::spawn_blocking(move || input.read_line())
            .await
            .context("Failed to read from stdin.")??
        else {
            break;
        };
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => command.execute(&dashboard).await,
            Err(e) => view.print(&e.to_string()),
        }
        if dashboard.has_left_page() {
            view.print("Session ended, please log in again.");
            break;
        }
    }

    polling_task.abort();
    Ok(())
}
