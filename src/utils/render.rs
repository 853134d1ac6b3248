//! Terminal rendering of marketplace records.
//!
//! Rendering is pure: every function returns the text and the caller prints it.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::{
    models::{
        analyticsmodel::{Analytics, MonthCount},
        bookingmodel::{Booking, BookingStatus},
        servicemodel::ServiceListing,
        usermodel::Professional,
    },
    service::{
        eligibility::daily_limit_reached,
        notification_service::{Toast, ToastLevel},
        pro_service::{AccountStatus, ClientContact, ProDashboard},
    },
};

/// Visual variant. `Standard` uses emoji markers, `Plain` sticks to ASCII.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Standard,
    Plain,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Theme::Standard),
            "plain" => Ok(Theme::Plain),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

impl Theme {
    fn pick<'a>(&self, standard: &'a str, plain: &'a str) -> &'a str {
        match self {
            Theme::Standard => standard,
            Theme::Plain => plain,
        }
    }

    fn bar(&self, count: u64, max: u64, width: usize) -> String {
        let filled = if max == 0 {
            0
        } else {
            ((count as f64 / max as f64) * width as f64).round() as usize
        };
        let filled = filled.min(width);
        let (on, off) = match self {
            Theme::Standard => ("█", "░"),
            Theme::Plain => ("#", "."),
        };
        format!("{}{}", on.repeat(filled), off.repeat(width - filled))
    }
}

fn or_na(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("N/A")
}

pub fn pro_card(theme: Theme, pro: &Professional, can_rate: bool) -> String {
    let mut out = String::new();
    let skills: Vec<&str> = pro.skills.iter().map(|s| s.as_str()).collect();

    let _ = writeln!(out, "{} [{}]", pro.display_name(), pro.id);
    let _ = writeln!(out, "  {} {}", theme.pick("🛠️", "skills:"), skills.join(", "));
    let _ = writeln!(out, "  {} {}", theme.pick("📍", "location:"), or_na(pro.location.as_deref()));
    let _ = writeln!(
        out,
        "  {} {} ({} reviews)",
        theme.pick("⭐", "rating:"),
        pro.average_rating(),
        pro.review_count
    );

    let action = if daily_limit_reached(pro) { "Limit Reached" } else { "Hire Now" };
    let _ = write!(out, "  -> {}", action);
    if can_rate {
        let _ = write!(out, " | Rate your experience (1-5)");
    }
    out
}

fn status_marker(theme: Theme, status: BookingStatus) -> &'static str {
    match (theme, status) {
        (Theme::Standard, BookingStatus::Pending) => "🕒",
        (Theme::Standard, BookingStatus::Approved | BookingStatus::Accepted) => "✅",
        (Theme::Standard, BookingStatus::Rejected) => "❌",
        (Theme::Plain, BookingStatus::Pending) => "[..]",
        (Theme::Plain, BookingStatus::Approved | BookingStatus::Accepted) => "[ok]",
        (Theme::Plain, BookingStatus::Rejected) => "[no]",
    }
}

/// One line of the client's "Your Requests" panel.
pub fn client_request(theme: Theme, booking: &Booking) -> String {
    format!(
        "{} {} - {} ({})",
        status_marker(theme, booking.status),
        booking.professional_name(),
        booking.category.as_deref().unwrap_or("General Service"),
        booking.status
    )
}

pub fn requests_panel(theme: Theme, bookings: &[Booking]) -> String {
    let mut out = format!("{} Your Requests\n", theme.pick("📬", "=="));
    if bookings.is_empty() {
        out.push_str("  No requests yet");
        return out;
    }
    let lines: Vec<String> = bookings
        .iter()
        .map(|b| format!("  {}", client_request(theme, b)))
        .collect();
    out.push_str(&lines.join("\n"));
    out
}

pub fn account_banner(theme: Theme, status: AccountStatus) -> String {
    let icon = match theme {
        Theme::Standard => status.icon(),
        Theme::Plain => "*",
    };
    format!("{} {}\n  {}", icon, status.title(), status.detail())
}

/// One entry of the pro's job queue, contact details included once accepted.
pub fn pro_job(theme: Theme, booking: &Booking) -> String {
    let mut out = String::new();
    let client = booking.client_party();
    let _ = writeln!(
        out,
        "{} {} [{}] {} {}",
        status_marker(theme, booking.status),
        booking.client_name(),
        booking.id,
        booking.status,
        booking.created_at.format("%Y-%m-%d")
    );
    let _ = write!(
        out,
        "  {} {}",
        theme.pick("📍", "location:"),
        client
            .and_then(|c| c.location.as_deref())
            .filter(|l| !l.trim().is_empty())
            .unwrap_or("Not provided")
    );

    match ProDashboard::contact(booking) {
        ClientContact::Revealed { email, phone } => {
            let _ = write!(out, "\n  {} {}", theme.pick("📧", "email:"), email);
            let _ = write!(out, "\n  {} {}", theme.pick("📞", "phone:"), phone);
        }
        ClientContact::Hidden => {
            let _ = write!(out, "\n  {} Accept to view phone number", theme.pick("🔒", "(hidden)"));
        }
    }
    out
}

pub fn pro_dashboard(theme: Theme, dashboard: &ProDashboard) -> String {
    let mut out = account_banner(theme, dashboard.account_status());
    let _ = write!(
        out,
        "\n\nTotal Jobs: {}  Pending: {}  Approved: {}\n\n{} Job Queue",
        dashboard.bookings.len(),
        dashboard.pending_count(),
        dashboard.approved_count(),
        theme.pick("📬", "==")
    );
    if dashboard.bookings.is_empty() {
        out.push_str("\n  No job requests yet.");
    }
    for booking in &dashboard.bookings {
        let _ = write!(out, "\n{}", pro_job(theme, booking));
    }
    out
}

pub fn admin_row(theme: Theme, pro: &Professional) -> String {
    let state = match (pro.is_suspended, pro.is_verified) {
        (true, _) => theme.pick("🚫 suspended", "suspended"),
        (false, true) => theme.pick("🛡️ verified", "verified"),
        (false, false) => theme.pick("⏳ pending", "pending"),
    };
    format!(
        "{:<24} {:<28} {:<14} {}  [{}]",
        pro.display_name(),
        pro.email,
        or_na(pro.phone.as_deref()),
        state,
        pro.id
    )
}

pub fn toast(theme: Theme, toast: &Toast) -> String {
    let marker = match (theme, toast.level) {
        (Theme::Standard, ToastLevel::Success) => "✓",
        (Theme::Standard, ToastLevel::Error) => "✕",
        (Theme::Standard, ToastLevel::Info) => "ℹ",
        (Theme::Plain, _) => toast.level.to_str(),
    };
    format!("[{}] {}", marker, toast.message)
}

pub fn service_listing(listing: &ServiceListing) -> String {
    format!(
        "{} - {} | {} | {} [{}]",
        listing.name,
        listing.skill,
        or_na(Some(listing.number.as_str())),
        or_na(Some(listing.location.as_str())),
        listing.id
    )
}

fn month_chart(theme: Theme, out: &mut String, title: &str, months: &[MonthCount], max: u64) {
    let _ = write!(out, "\n\n{}", title);
    for month in months {
        let _ = write!(
            out,
            "\n  {} {} {}",
            month.label(),
            theme.bar(month.count, max, 20),
            month.count
        );
    }
}

pub fn analytics(theme: Theme, data: &Analytics) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "Total Users: {}  Clients: {}  Pros: {}  Bookings: {}  Requests: {}",
        data.total_users,
        data.total_clients(),
        data.total_pros,
        data.total_bookings,
        data.total_requests()
    );
    let _ = write!(
        out,
        "\nVerified pros: {:.1}%  Suspended pros: {:.1}%  Pro coverage: {:.1}%",
        data.verified_pro_percent(),
        data.suspended_pro_percent(),
        data.pro_coverage_percent()
    );
    let _ = write!(
        out,
        "\nAvg bookings per user: {:.2}  per pro: {:.2}",
        data.avg_bookings_per_user(),
        data.avg_bookings_per_pro()
    );

    let max_location = data
        .requests_per_location
        .iter()
        .map(|l| l.count)
        .max()
        .unwrap_or(0)
        .max(1);
    let _ = write!(out, "\n\n{} Requests by Location", theme.pick("📍", "=="));
    for loc in &data.requests_per_location {
        let _ = write!(
            out,
            "\n  {:<12} {} {}",
            loc.location.as_deref().unwrap_or("unknown"),
            theme.bar(loc.count, max_location, 20),
            loc.count
        );
    }

    let _ = write!(
        out,
        "\n\n{} Bookings by Category ({})",
        theme.pick("🗂️", "=="),
        data.total_bookings_by_category()
    );
    for cat in &data.bookings_per_category {
        let _ = write!(
            out,
            "\n  {:<16} {}",
            cat.category.as_deref().unwrap_or("General Service"),
            cat.count
        );
    }

    month_chart(theme, &mut out, "User growth", &data.users_by_month, data.max_users_month());
    month_chart(theme, &mut out, "Monthly bookings", &data.monthly_bookings, data.max_bookings_month());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Instant;

    fn pro(daily: u32) -> Professional {
        serde_json::from_value(json!({
            "_id": "p1",
            "name": "Hodan",
            "skills": ["Plumber", "Painter"],
            "location": "hargeisa",
            "rating": 4.5,
            "reviewCount": 12,
            "dailyRequestCount": daily,
            "isVerified": true
        }))
        .unwrap()
    }

    #[test]
    fn theme_parses_from_env_values() {
        assert_eq!("PLAIN".parse::<Theme>(), Ok(Theme::Plain));
        assert_eq!(" standard ".parse::<Theme>(), Ok(Theme::Standard));
        assert!("neon".parse::<Theme>().is_err());
    }

    #[test]
    fn card_shows_limit_and_rating() {
        let open = pro_card(Theme::Plain, &pro(0), false);
        assert!(open.contains("Hire Now"));
        assert!(open.contains("4.5 (12 reviews)"));
        assert!(!open.contains("Rate your experience"));

        let full = pro_card(Theme::Plain, &pro(3), true);
        assert!(full.contains("Limit Reached"));
        assert!(full.contains("Rate your experience"));
    }

    #[test]
    fn pro_job_hides_contact_until_accepted() {
        let bookings: Vec<Booking> = serde_json::from_value(json!([
            {
                "_id": "b1",
                "client": { "_id": "c1", "name": "Amina", "phone": "0634", "email": "a@x.so" },
                "status": "pending",
                "createdAt": "2026-03-01T08:00:00Z"
            },
            {
                "_id": "b2",
                "client": { "_id": "c1", "name": "Amina", "phone": "0634", "email": "a@x.so" },
                "status": "approved",
                "createdAt": "2026-03-01T08:00:00Z"
            }
        ]))
        .unwrap();

        let pending = pro_job(Theme::Plain, &bookings[0]);
        assert!(pending.contains("Accept to view phone number"));
        assert!(!pending.contains("0634"));

        let approved = pro_job(Theme::Plain, &bookings[1]);
        assert!(approved.contains("phone: 0634"));
        assert!(approved.contains("2026-03-01"));
    }

    #[test]
    fn plain_theme_is_ascii() {
        let toast_line = toast(
            Theme::Plain,
            &Toast {
                id: 1,
                message: "Action successful".into(),
                level: ToastLevel::Success,
                expires_at: Instant::now(),
            },
        );
        assert_eq!(toast_line, "[success] Action successful");
        assert!(requests_panel(Theme::Plain, &[]).is_ascii());
        assert_eq!(Theme::Plain.bar(5, 10, 4), "##..");
    }
}
