//! src/dashboard/console.rs

use crate::dashboard::controller::Dashboard;
use crate::dashboard::view::{BannerId, BookingDetailView, BookingRow, DashboardView};
use crate::domain::{BookingStats, BookingStatus, ValidationError};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::runtime::{Handle, RuntimeFlavor};

pub const HELP: &str = "\
commands:
  refresh               reload stats and recent bookings
  view <id>             show details of a booking
  complete <id>         mark a booking as completed
  cancel <id>           mark a booking as cancelled
  status <id> <status>  set any status, e.g. `status 4 in progress`
  export [file]         download all bookings as csv
  help                  show this text
  quit                  leave the console";

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("Unknown command `{0}`. Type `help` for a list of commands.")]
    Unknown(String),
    #[error("`{0}` expects {1}.")]
    MissingArgument(&'static str, &'static str),
    #[error("`{0}` is not a valid booking id.")]
    InvalidId(String),
    #[error(transparent)]
    InvalidStatus(#[from] ValidationError),
}

/// One line of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    View(i64),
    SetStatus(i64, BookingStatus),
    Export(Option<PathBuf>),
    Help,
    Quit,
}

fn parse_id(arg: Option<&str>, command: &'static str) -> Result<i64, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(command, "a booking id"))?;
    arg.parse()
        .map_err(|_| CommandError::InvalidId(arg.to_owned()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Command::Help);
        };
        let command = match command.to_lowercase().as_str() {
            "refresh" | "r" => Command::Refresh,
            "view" | "v" => Command::View(parse_id(words.next(), "view")?),
            "complete" => Command::SetStatus(parse_id(words.next(), "complete")?, BookingStatus::completed()),
            "cancel" => Command::SetStatus(parse_id(words.next(), "cancel")?, BookingStatus::cancelled()),
            "status" => {
                let id = parse_id(words.next(), "status")?;
                let status = words.collect::<Vec<_>>().join(" ");
                if status.is_empty() {
                    return Err(CommandError::MissingArgument("status", "a booking id and a status"));
                }
                Command::SetStatus(id, status.parse()?)
            }
            "export" => Command::Export(words.next().map(PathBuf::from)),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_owned())),
        };
        Ok(command)
    }
}

impl Command {
    /// Run the command against the dashboard. `Quit` is left to the caller.
    pub async fn execute<R, W>(self, dashboard: &Dashboard<ConsoleView<R, W>>)
    where
        R: BufRead + Send + 'static,
        W: Write + Send + 'static,
    {
        match self {
            Command::Refresh => dashboard.refresh().await,
            Command::View(id) => dashboard.view_booking(id).await,
            Command::SetStatus(id, status) => {
                dashboard.update_status(id, &status).await;
            }
            Command::Export(Some(path)) => {
                if dashboard.export_to(&path).await {
                    dashboard
                        .view()
                        .print(&format!("Exported bookings to {}", path.display()));
                }
            }
            Command::Export(None) => dashboard.export(),
            Command::Help => dashboard.view().print(HELP),
            Command::Quit => {}
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Read operator input without stalling the other tasks of a multi-threaded runtime.
fn blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

/// Terminal rendering of the dashboard.
pub struct ConsoleView<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
    banners: Mutex<Vec<(BannerId, String)>>,
    next_banner: AtomicU64,
    location: Mutex<Option<String>>,
}

impl<R: BufRead, W: Write> ConsoleView<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
            banners: Mutex::new(Vec::new()),
            next_banner: AtomicU64::new(1),
            location: Mutex::new(None),
        }
    }

    /// Next line of input, `None` at end of input.
    pub fn read_line(&self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        let n = lock(&self.input).read_line(&mut line)?;
        Ok((n > 0).then(|| line.trim().to_owned()))
    }

    pub fn print(&self, text: &str) {
        let mut output = lock(&self.output);
        if let Err(e) = writeln!(output, "{}", text).and_then(|_| output.flush()) {
            tracing::warn!(error.message = %e, "Failed to write to console");
        }
    }

    /// Messages of the error banners currently shown.
    pub fn active_errors(&self) -> Vec<String> {
        lock(&self.banners).iter().map(|(_, m)| m.clone()).collect()
    }

    /// Last location the dashboard navigated to.
    pub fn location(&self) -> Option<String> {
        lock(&self.location).clone()
    }

    pub fn into_output(self) -> W {
        self.output.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R, W> DashboardView for ConsoleView<R, W>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    fn render_stats(&self, stats: &BookingStats) {
        self.print(&format!(
            "Total bookings: {} | Today's bookings: {} | Pending tests: {}",
            stats.total_bookings, stats.today_bookings, stats.pending_tests
        ));
    }

    fn replace_bookings(&self, rows: &[BookingRow]) {
        let mut table = format!(
            "{:>6}  {:<24}  {:<24}  {:<16}  {:<20}  {}",
            "ID", "Date", "Name", "Test Type", "Phone", "Status"
        );
        for row in rows {
            table.push_str(&format!(
                "\n{:>6}  {:<24}  {:<24}  {:<16}  {:<20}  {}",
                row.id, row.created_at, row.name, row.test_type, row.phone, row.status
            ));
        }
        self.print(&table);
    }

    fn show_booking(&self, booking: &BookingDetailView) {
        self.print(&format!(
            "Name: {}\nEmail: {}\nPhone: {}\nTest Type: {}\nPreferred Date: {}\n\
            Message: {}\nStatus: {}\nCreated At: {}",
            booking.name,
            booking.email,
            booking.phone,
            booking.test_type,
            booking.preferred_date,
            booking.message,
            booking.status,
            booking.created_at
        ));
    }

    fn show_error(&self, message: &str) -> BannerId {
        let banner = BannerId(self.next_banner.fetch_add(1, Ordering::SeqCst));
        lock(&self.banners).push((banner, message.to_owned()));
        self.print(&format!("[error] {}", message));
        banner
    }

    fn remove_error(&self, banner: BannerId) {
        lock(&self.banners).retain(|(id, _)| *id != banner);
    }

    fn navigate(&self, location: &str) {
        *lock(&self.location) = Some(location.to_owned());
        self.print(&format!("-> {}", location));
    }

    fn confirm(&self, prompt: &str) -> bool {
        {
            let mut output = lock(&self.output);
            if write!(output, "{} [y/N] ", prompt)
                .and_then(|_| output.flush())
                .is_err()
            {
                return false;
            }
        }
        match blocking(|| self.read_line()) {
            Ok(Some(answer)) => matches!(answer.to_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}
