//! src/dashboard/controller.rs

use crate::dashboard::client::{AdminClient, ApiError, EXPORT_PATH};
use crate::dashboard::view::{BookingDetailView, BookingRow, DashboardView};
use crate::domain::BookingStatus;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;

/// Where the dashboard goes when the session is gone.
pub const LOGIN_LOCATION: &str = "/";
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);
pub const DEFAULT_BANNER_LIFETIME: Duration = Duration::from_millis(5000);

/// Drives a `DashboardView` from the admin API.
///
/// Every operation is a single request/response/render sequence. Failures end
/// up as an error banner, a `401` makes the dashboard leave for
/// [`LOGIN_LOCATION`] and stop polling.
pub struct Dashboard<V> {
    client: AdminClient,
    view: Arc<V>,
    // serializes refreshes triggered by the timer and by status updates
    refresh_lock: Mutex<()>,
    left_page: AtomicBool,
    refresh_interval: Duration,
    banner_lifetime: Duration,
}

impl<V: DashboardView> Dashboard<V> {
    pub fn new(client: AdminClient, view: Arc<V>) -> Self {
        Self {
            client,
            view,
            refresh_lock: Mutex::new(()),
            left_page: AtomicBool::new(false),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            banner_lifetime: DEFAULT_BANNER_LIFETIME,
        }
    }

    pub fn with_refresh_interval(mut self, refresh_interval: Duration) -> Self {
        self.refresh_interval = refresh_interval;
        self
    }

    pub fn with_banner_lifetime(mut self, banner_lifetime: Duration) -> Self {
        self.banner_lifetime = banner_lifetime;
        self
    }

    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    /// `true` once the dashboard navigated away after an authentication failure.
    pub fn has_left_page(&self) -> bool {
        self.left_page.load(Ordering::SeqCst)
    }

    /// Ask the server whether the session is authenticated.
    ///
    /// Anything but a positive answer sends the view to the login location.
    pub async fn authenticate(&self) -> bool {
        match self.client.check_auth().await {
            Ok(status) if status.authenticated => true,
            Ok(_) => {
                tracing::warn!("Session is not authenticated");
                self.leave_page();
                false
            }
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Auth check failed"
                );
                self.leave_page();
                false
            }
        }
    }

    pub async fn update_stats(&self) {
        match self.client.stats().await {
            Ok(stats) => self.view.render_stats(&stats),
            Err(e) => self.report_failure("Failed to load statistics", e),
        }
    }

    pub async fn update_recent_bookings(&self) {
        match self.client.recent_bookings().await {
            Ok(bookings) => {
                let rows: Vec<BookingRow> = bookings.iter().map(BookingRow::from).collect();
                self.view.replace_bookings(&rows);
            }
            Err(e) => self.report_failure("Failed to load recent bookings", e),
        }
    }

    /// Re-fetch stats and recent bookings.
    pub async fn refresh(&self) {
        let _guard = self.refresh_lock.lock().await;
        if self.has_left_page() {
            return;
        }
        tokio::join!(self.update_stats(), self.update_recent_bookings());
    }

    pub async fn view_booking(&self, id: i64) {
        match self.client.booking(id).await {
            Ok(booking) => self.view.show_booking(&BookingDetailView::from(&booking)),
            Err(e) => self.report_failure("Failed to load booking details", e),
        }
    }

    /// Set the status of a booking after the operator confirmed it.
    ///
    /// Returns `true`, if the status has been updated.
    pub async fn update_status(&self, id: i64, status: &BookingStatus) -> bool {
        let prompt = format!(
            "Are you sure you want to mark this booking as {}?",
            status
        );
        if !self.view.confirm(&prompt) {
            return false;
        }
        match self.client.update_status(id, status).await {
            Ok(()) => {
                self.refresh().await;
                true
            }
            Err(e) => {
                self.report_failure("Failed to update booking status", e);
                false
            }
        }
    }

    /// Hand the CSV download over to the view.
    pub fn export(&self) {
        self.view.navigate(&self.client.url(EXPORT_PATH));
    }

    /// Download the CSV export and store it at `path`.
    pub async fn export_to(&self, path: &Path) -> bool {
        let csv = match self.client.export_csv().await {
            Ok(csv) => csv,
            Err(e) => {
                self.report_failure("Failed to export bookings", e);
                return false;
            }
        };
        match tokio::fs::write(path, csv).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    path = %path.display(),
                    "Failed to write export"
                );
                self.show_error("Failed to export bookings");
                false
            }
        }
    }

    /// Check authentication, then refresh on every tick of the refresh interval
    /// until the dashboard leaves the page.
    pub async fn run_until_stopped(&self) {
        if !self.authenticate().await {
            return;
        }
        let mut interval = tokio::time::interval(self.refresh_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            // the first tick completes immediately
            interval.tick().await;
            if self.has_left_page() {
                break;
            }
            self.refresh().await;
        }
        tracing::info!("Dashboard stopped polling");
    }

    fn report_failure(&self, message: &str, error: ApiError) {
        if let ApiError::Unauthorized = error {
            self.leave_page();
            return;
        }
        tracing::error!(
            error.cause_chain = ?error,
            error.message = %error,
            "{}",
            message
        );
        self.show_error(message);
    }

    fn show_error(&self, message: &str) {
        let banner = self.view.show_error(message);
        let view = Arc::clone(&self.view);
        let lifetime = self.banner_lifetime;
        tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;
            view.remove_error(banner);
        });
    }

    fn leave_page(&self) {
        // navigate only once, even if concurrent requests fail together
        if !self.left_page.swap(true, Ordering::SeqCst) {
            self.view.navigate(LOGIN_LOCATION);
        }
    }
}
