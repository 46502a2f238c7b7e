//! Data Transfer Objects
//!
//! Wire shapes of the admin API. These are deserialized from JSON and then
//! mapped into [`crate::models`] types; the mock server serializes the same
//! structs.

use serde::{Deserialize, Serialize};

use crate::models::{AuthUser, Role};

// ============================================
// ENVELOPE
// ============================================

/// Standard response envelope: `{"status": ..., "message": ..., "data": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: Some(true),
            message: None,
            data,
        }
    }
}

// ============================================
// DASHBOARD STATS DTOs
// ============================================

/// Payload of `GET /admin/dashboard/stats`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsPayload {
    pub patients: PatientTotals,
    pub doctors: DoctorTotals,
    pub pending_reviews: PendingReviewTotals,
    pub consultations: ConsultationTotals,
    pub prescriptions: PrescriptionTotals,

    #[serde(
        rename = "consultationOverTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub consultation_over_time: Option<Vec<MonthlyCount>>,

    #[serde(
        rename = "prescriptionVolumeTrend",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub prescription_volume_trend: Option<Vec<MonthlyCount>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_doctors_vs_patients: Option<SeriesBreakdown>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_specialities_in_demand: Option<Vec<SpecialityCount>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientTotals {
    pub total_patients: u64,
    #[serde(default)]
    pub patients_percentage_since_last_week: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorTotals {
    pub total_doctors: u64,
    #[serde(default)]
    pub doctors_percentage_since_last_week: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingReviewTotals {
    pub total_pending_reviews: u64,
    #[serde(default)]
    pub pending_reviews_percentage_since_last_week: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationTotals {
    pub total_consultations: u64,
    #[serde(default)]
    pub consultations_percentage_since_last_week: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionTotals {
    pub total_prescriptions: u64,
    #[serde(default)]
    pub prescriptions_percentage_since_last_week: f64,
}

/// One month of a trend series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: String,
    pub count: f64,
}

/// Category axis plus parallel named series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesBreakdown {
    pub categories: Vec<String>,
    #[serde(default)]
    pub series: Vec<NamedSeries>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedSeries {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialityCount {
    pub speciality: String,
    pub count: f64,
}

// ============================================
// PATIENT DTOs
// ============================================

/// Paginated payload of `GET /admin/patients`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientsPayload {
    pub data: Vec<PatientRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// A patient as the API returns it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: u64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub last_seen: Option<String>,
    #[serde(default)]
    pub lga: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub user: Option<PatientUser>,
}

/// Account nested under a patient record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientUser {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub lga: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub platform: Option<String>,
}

// ============================================
// AUTH DTOs
// ============================================

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub device_type: String,
    pub app_version: String,
}

pub const LOGIN_DEVICE_TYPE: &str = "web";
pub const LOGIN_APP_VERSION: &str = "1.0.0";

impl LoginRequest {
    /// Build the request; the email is trimmed, the password is sent as typed
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_string(),
            password: password.to_string(),
            device_type: LOGIN_DEVICE_TYPE.to_string(),
            app_version: LOGIN_APP_VERSION.to_string(),
        }
    }
}

/// Response of `POST /auth/login`
///
/// The token is read from `data.token` (or `data.access_token`), falling
/// back to a top-level `token`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<LoginData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginData {
    #[serde(default, alias = "access_token", skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<LoginProfile>,
}

/// Profile returned alongside the token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl LoginResponse {
    /// Non-empty bearer token, if the server issued one
    pub fn token(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.token.as_deref())
            .or(self.token.as_deref())
            .filter(|t| !t.trim().is_empty())
    }

    pub fn profile(&self) -> Option<&LoginProfile> {
        self.data.as_ref().and_then(|d| d.user.as_ref())
    }
}

impl LoginProfile {
    /// Convert to the persisted user, filling gaps from the login email
    pub fn to_auth_user(&self, login_email: &str) -> AuthUser {
        let email = non_empty(self.email.as_deref())
            .unwrap_or(login_email)
            .to_string();

        let name = non_empty(self.name.as_deref())
            .map(str::to_string)
            .or_else(|| join_present(&[self.first_name.as_deref(), self.last_name.as_deref()], " "))
            .unwrap_or_else(|| AuthUser::DEFAULT_ADMIN_NAME.to_string());

        let role = match self.role.as_deref().map(str::to_lowercase) {
            Some(role) if !role.contains("admin") => Role::User,
            _ => Role::Admin,
        };

        AuthUser { email, name, role }
    }
}

// ============================================
// HELPERS
// ============================================

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Join the present, non-empty parts; `None` when nothing is left
pub(crate) fn join_present(parts: &[Option<&str>], sep: &str) -> Option<String> {
    let present: Vec<&str> = parts.iter().filter_map(|p| non_empty(*p)).collect();
    if present.is_empty() {
        None
    } else {
        Some(present.join(sep))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_trims_email() {
        let req = LoginRequest::new("  admin@careoneclinics.com ", " secret ");
        assert_eq!(req.email, "admin@careoneclinics.com");
        assert_eq!(req.password, " secret ");
        assert_eq!(req.device_type, "web");
        assert_eq!(req.app_version, "1.0.0");
    }

    #[test]
    fn test_login_response_token_locations() {
        let nested: LoginResponse =
            serde_json::from_str(r#"{"data":{"token":"abc","user":{"email":"a@b.co"}}}"#).unwrap();
        assert_eq!(nested.token(), Some("abc"));

        let alias: LoginResponse = serde_json::from_str(r#"{"data":{"access_token":"xyz"}}"#).unwrap();
        assert_eq!(alias.token(), Some("xyz"));

        let top: LoginResponse = serde_json::from_str(r#"{"token":"top"}"#).unwrap();
        assert_eq!(top.token(), Some("top"));

        let blank: LoginResponse = serde_json::from_str(r#"{"data":{"token":"  "}}"#).unwrap();
        assert_eq!(blank.token(), None);
    }

    #[test]
    fn test_profile_to_auth_user() {
        let profile = LoginProfile {
            first_name: Some("Jane".into()),
            last_name: Some("Okafor".into()),
            role: Some("super_admin".into()),
            ..Default::default()
        };
        let user = profile.to_auth_user("jane@careoneclinics.com");
        assert_eq!(user.email, "jane@careoneclinics.com");
        assert_eq!(user.name, "Jane Okafor");
        assert_eq!(user.role, Role::Admin);

        let plain = LoginProfile {
            name: Some("Sam".into()),
            role: Some("user".into()),
            ..Default::default()
        };
        assert_eq!(plain.to_auth_user("sam@x.io").role, Role::User);

        let empty = LoginProfile::default().to_auth_user("ops@x.io");
        assert_eq!(empty.name, "Admin User");
        assert_eq!(empty.role, Role::Admin);
    }

    #[test]
    fn test_stats_payload_optional_sections() {
        let json = r#"{
            "patients": {"total_patients": 10, "patients_percentage_since_last_week": 5},
            "doctors": {"total_doctors": 2, "doctors_percentage_since_last_week": 0},
            "pending_reviews": {"total_pending_reviews": 1, "pending_reviews_percentage_since_last_week": -50},
            "consultations": {"total_consultations": 7, "consultations_percentage_since_last_week": 10},
            "prescriptions": {"total_prescriptions": 3, "prescriptions_percentage_since_last_week": 0}
        }"#;
        let payload: StatsPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.patients.total_patients, 10);
        assert!(payload.consultation_over_time.is_none());
        assert!(payload.active_doctors_vs_patients.is_none());
    }

    #[test]
    fn test_join_present() {
        assert_eq!(
            join_present(&[Some("Ada"), None, Some(" "), Some("Obi")], " ").as_deref(),
            Some("Ada Obi")
        );
        assert_eq!(join_present(&[None, Some("")], ", "), None);
    }
}
