use serde::{Deserialize, Serialize};

use super::usermodel::null_as_default;

/// Counters returned alongside the professional list on the admin dashboard.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_users: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pros: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_bookings: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pending_verifications: u64,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationCount {
    #[serde(rename = "_id", default)]
    pub location: Option<String>,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct CategoryCount {
    #[serde(rename = "_id", default)]
    pub category: Option<String>,
    #[serde(default)]
    pub count: u64,
}

/// One month bucket; `month` is 1-based as produced by the aggregation.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct MonthCount {
    #[serde(rename = "_id", default)]
    pub month: u32,
    #[serde(default)]
    pub count: u64,
}

impl MonthCount {
    pub fn label(&self) -> &'static str {
        const MONTHS: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        self.month
            .checked_sub(1)
            .and_then(|idx| MONTHS.get(idx as usize))
            .copied()
            .unwrap_or("?")
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_users: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pros: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verified_pros: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suspended_pros: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_bookings: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub requests_per_location: Vec<LocationCount>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bookings_per_category: Vec<CategoryCount>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub users_by_month: Vec<MonthCount>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub monthly_bookings: Vec<MonthCount>,
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

impl Analytics {
    pub fn total_clients(&self) -> u64 {
        self.total_users.saturating_sub(self.total_pros)
    }

    pub fn verified_pro_percent(&self) -> f64 {
        percent(self.verified_pros, self.total_pros)
    }

    pub fn suspended_pro_percent(&self) -> f64 {
        percent(self.suspended_pros, self.total_pros)
    }

    pub fn pro_coverage_percent(&self) -> f64 {
        percent(self.total_pros, self.total_users)
    }

    pub fn avg_bookings_per_user(&self) -> f64 {
        ratio(self.total_bookings, self.total_users)
    }

    pub fn avg_bookings_per_pro(&self) -> f64 {
        ratio(self.total_bookings, self.total_pros)
    }

    pub fn total_requests(&self) -> u64 {
        self.requests_per_location.iter().map(|loc| loc.count).sum()
    }

    pub fn total_bookings_by_category(&self) -> u64 {
        self.bookings_per_category.iter().map(|cat| cat.count).sum()
    }

    /// Largest monthly count, never below 1 so it can scale a bar chart.
    pub fn max_users_month(&self) -> u64 {
        self.users_by_month.iter().map(|m| m.count).max().unwrap_or(0).max(1)
    }

    pub fn max_bookings_month(&self) -> u64 {
        self.monthly_bookings.iter().map(|m| m.count).max().unwrap_or(0).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn derived_metrics() {
        let analytics: Analytics = serde_json::from_value(json!({
            "totalUsers": 40,
            "totalPros": 10,
            "verifiedPros": 8,
            "suspendedPros": 1,
            "totalBookings": 20,
            "requestsPerLocation": [{ "_id": "hargeisa", "count": 12 }, { "_id": "burco", "count": 3 }],
            "bookingsPerCategory": [{ "_id": "Plumber", "count": 7 }],
            "usersByMonth": [{ "_id": 1, "count": 5 }, { "_id": 2, "count": 9 }]
        }))
        .unwrap();

        assert_eq!(analytics.total_clients(), 30);
        assert_eq!(analytics.verified_pro_percent(), 80.0);
        assert_eq!(analytics.suspended_pro_percent(), 10.0);
        assert_eq!(analytics.pro_coverage_percent(), 25.0);
        assert_eq!(analytics.avg_bookings_per_user(), 0.5);
        assert_eq!(analytics.avg_bookings_per_pro(), 2.0);
        assert_eq!(analytics.total_requests(), 15);
        assert_eq!(analytics.total_bookings_by_category(), 7);
        assert_eq!(analytics.max_users_month(), 9);
        assert_eq!(analytics.max_bookings_month(), 1);
        assert_eq!(analytics.users_by_month[1].label(), "Feb");
    }

    #[test]
    fn empty_platform_has_no_division_by_zero() {
        let analytics = Analytics::default();
        assert_eq!(analytics.total_clients(), 0);
        assert_eq!(analytics.verified_pro_percent(), 0.0);
        assert_eq!(analytics.avg_bookings_per_pro(), 0.0);
    }
}
