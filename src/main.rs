//! main.rs

use booking_desk::configuration::get_configuration;
use booking_desk::error::DeskResult;
use booking_desk::startup::Application;
use booking_desk::telemetry::{get_subscriber, init_subscriber};
use std::fmt::{Debug, Display};
use tokio::task::JoinError;

#[tokio::main]
async fn main() -> DeskResult<()> {
    let subscriber = get_subscriber("booking_desk".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().map_err(anyhow::Error::from)?;
    let application = Application::build(configuration).await?;
    let application_task = tokio::spawn(application.run_until_stopped());
    report_exit("API", application_task.await);

    Ok(())
}

fn report_exit(task_name: &str, outcome: Result<Result<(), impl Debug + Display>, JoinError>) {
    match outcome {
        Ok(Ok(())) => {
            tracing::info!("{} has exited", task_name)
        }
        Ok(Err(e)) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{} failed",
                task_name
            )
        }
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{} task failed to complete",
                task_name
            )
        }
    }
}
