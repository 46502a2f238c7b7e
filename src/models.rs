//! Core data types for the admin dashboard
//!
//! Plain data-transfer records handed from the API layer to callers:
//! - `DashboardStat`: a stat card value with its week-over-week trend
//! - `ChartDataPoint`: one point of a (possibly paired) chart series
//! - `RecentPatient`: a row of the recent sign-ups table
//! - `AuthUser` and `Role`: the signed-in administrator
//! - `DashboardCharts`: the chart sections of the stats payload
//! - `DashboardData`: everything the dashboard shows at once

use serde::{Deserialize, Serialize};

/// Label used for every stat card trend
pub const TREND_LABEL: &str = "Since last week";

/// A labeled numeric stat with its trend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStat {
    pub label: String,
    pub value: u64,
    /// Signed fractional change (0.125 = +12.5%)
    pub trend: f64,
    pub trend_label: String,
    #[serde(rename = "icon")]
    pub category: StatCategory,
}

impl DashboardStat {
    /// Create a stat from a raw API percentage (12.5 = +12.5%)
    pub fn from_percentage(
        label: impl Into<String>,
        value: u64,
        percentage: f64,
        category: StatCategory,
    ) -> Self {
        Self {
            label: label.into(),
            value,
            trend: percentage / 100.0,
            trend_label: TREND_LABEL.to_string(),
            category,
        }
    }

    /// Direction of the trend indicator
    pub fn trend_direction(&self) -> TrendDirection {
        if self.trend >= 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        }
    }

    /// Absolute trend as a percentage with two decimals
    pub fn trend_percent_label(&self) -> String {
        format!("{:.2}%", (self.trend * 100.0).abs())
    }

    /// Value with thousands separators
    pub fn formatted_value(&self) -> String {
        format_count(self.value)
    }
}

/// Which stat a card represents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StatCategory {
    Patients,
    Doctors,
    Reviews,
    Consultations,
    Prescriptions,
    Default,
}

impl std::fmt::Display for StatCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatCategory::Patients => write!(f, "patients"),
            StatCategory::Doctors => write!(f, "doctors"),
            StatCategory::Reviews => write!(f, "reviews"),
            StatCategory::Consultations => write!(f, "consultations"),
            StatCategory::Prescriptions => write!(f, "prescriptions"),
            StatCategory::Default => write!(f, "default"),
        }
    }
}

/// Up/down indicator for a trend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
}

impl TrendDirection {
    pub fn arrow(&self) -> &'static str {
        match self {
            TrendDirection::Up => "↑",
            TrendDirection::Down => "↓",
        }
    }
}

/// A single chart point; `value2` carries the second series of paired charts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartDataPoint {
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<f64>,
}

impl ChartDataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            value2: None,
        }
    }

    pub fn paired(label: impl Into<String>, value: f64, value2: f64) -> Self {
        Self {
            label: label.into(),
            value,
            value2: Some(value2),
        }
    }
}

/// Verification state of a patient account
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PatientStatus {
    Verified,
    Pending,
    /// Reported by the API as `"rejected"`; other unknown values are pending
    Rejected,
}

impl PatientStatus {
    /// Map the API's lowercase status
    ///
    /// `"verified"` and `"rejected"` are matched exactly; any other value,
    /// or none, counts as pending.
    pub fn from_api(status: Option<&str>) -> Self {
        match status {
            Some("verified") => PatientStatus::Verified,
            Some("rejected") => PatientStatus::Rejected,
            _ => PatientStatus::Pending,
        }
    }
}

impl std::fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatientStatus::Verified => write!(f, "Verified"),
            PatientStatus::Pending => write!(f, "Pending"),
            PatientStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// A row in the recent patient sign-ups table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentPatient {
    pub id: String,
    pub sign_up_date: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub last_seen: String,
    pub location: String,
    pub device: String,
    pub status: PatientStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Role of a signed-in user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// The signed-in user, persisted across sessions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl AuthUser {
    /// Display name given to administrators without a profile name
    pub const DEFAULT_ADMIN_NAME: &'static str = "Admin User";

    /// Administrator identified only by email
    pub fn admin(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Self::DEFAULT_ADMIN_NAME.to_string(),
            role: Role::Admin,
        }
    }
}

/// The four chart sections derived from the stats payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCharts {
    pub consultation_trend: Vec<ChartDataPoint>,
    pub prescription_trend: Vec<ChartDataPoint>,
    pub doctor_vs_patient: Vec<ChartDataPoint>,
    pub specialties: Vec<ChartDataPoint>,
}

/// Everything the dashboard page renders
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub stats: Vec<DashboardStat>,
    pub consultation_trend: Vec<ChartDataPoint>,
    pub prescription_trend: Vec<ChartDataPoint>,
    pub doctor_vs_patient: Vec<ChartDataPoint>,
    pub specialties: Vec<ChartDataPoint>,
    pub recent_patients: Vec<RecentPatient>,
}

/// Format an integer with comma thousands separators
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_from_percentage() {
        let stat = DashboardStat::from_percentage("Total Patients", 1200, 12.5, StatCategory::Patients);
        assert!((stat.trend - 0.125).abs() < f64::EPSILON);
        assert_eq!(stat.trend_label, "Since last week");
        assert_eq!(stat.trend_direction(), TrendDirection::Up);
        assert_eq!(stat.trend_percent_label(), "12.50%");
    }

    #[test]
    fn test_negative_trend() {
        let stat = DashboardStat::from_percentage("Pending Reviews", 4, -3.333, StatCategory::Reviews);
        assert_eq!(stat.trend_direction(), TrendDirection::Down);
        assert_eq!(stat.trend_percent_label(), "3.33%");
    }

    #[test]
    fn test_zero_trend_is_up() {
        let stat = DashboardStat::from_percentage("Total Doctors", 0, 0.0, StatCategory::Doctors);
        assert_eq!(stat.trend_direction(), TrendDirection::Up);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_patient_status_from_api() {
        assert_eq!(PatientStatus::from_api(Some("verified")), PatientStatus::Verified);
        assert_eq!(PatientStatus::from_api(Some("rejected")), PatientStatus::Rejected);
        assert_eq!(PatientStatus::from_api(Some("pending")), PatientStatus::Pending);
        assert_eq!(PatientStatus::from_api(Some("suspended")), PatientStatus::Pending);
        assert_eq!(PatientStatus::from_api(Some("Rejected")), PatientStatus::Pending);
        assert_eq!(PatientStatus::from_api(None), PatientStatus::Pending);
    }

    #[test]
    fn test_auth_user_serialization() {
        let user = AuthUser::admin("admin@careoneclinics.com");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "admin");
        assert_eq!(json["name"], "Admin User");
    }

    #[test]
    fn test_stat_serializes_icon() {
        let stat = DashboardStat::from_percentage("Total Doctors", 3, 1.0, StatCategory::Doctors);
        let json = serde_json::to_value(&stat).unwrap();
        assert_eq!(json["icon"], "doctors");
        assert_eq!(json["trendLabel"], "Since last week");
    }
}
