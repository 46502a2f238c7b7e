//! Dashboard endpoints
//!
//! Typed access to the admin dashboard: stat cards, the recent patients
//! table and the chart sections carried by the stats payload.
//!
//! Stats and patients fail loudly. The chart sections are optional on the
//! server side; with placeholder fallback enabled a failed or absent
//! section is replaced by random placeholder data and a warning is logged.

use std::sync::Arc;

use super::client::ApiClient;
use super::dto::{join_present, non_empty, ApiResponse, PatientRecord, PatientsPayload, StatsPayload};
use super::error::{ApiError, ApiResult};
use super::placeholder;
use crate::models::{ChartDataPoint, DashboardCharts, DashboardData, DashboardStat, PatientStatus, RecentPatient, StatCategory};

pub const STATS_ENDPOINT: &str = "/admin/dashboard/stats";
pub const PATIENTS_ENDPOINT: &str = "/admin/patients";

/// Limit used when a caller does not pick one
pub const DEFAULT_PATIENT_LIMIT: u32 = 10;

/// Dashboard API bound to a client
#[derive(Clone)]
pub struct DashboardApi {
    client: Arc<ApiClient>,
    placeholder_fallback: bool,
}

impl DashboardApi {
    pub fn new(client: Arc<ApiClient>, placeholder_fallback: bool) -> Self {
        Self {
            client,
            placeholder_fallback,
        }
    }

    /// Raw stats payload
    pub async fn fetch_stats_payload(&self) -> ApiResult<StatsPayload> {
        let response: ApiResponse<StatsPayload> = self.client.get(STATS_ENDPOINT).await?;
        Ok(response.data)
    }

    /// The five stat cards
    pub async fn get_stats(&self) -> ApiResult<Vec<DashboardStat>> {
        let payload = self.fetch_stats_payload().await?;
        Ok(stats_from_payload(&payload))
    }

    /// Most recent patient sign-ups
    pub async fn get_recent_patients(&self, limit: u32) -> ApiResult<Vec<RecentPatient>> {
        let endpoint = format!("{}?limit={}", PATIENTS_ENDPOINT, limit);
        let response: ApiResponse<PatientsPayload> = self.client.get(&endpoint).await?;
        Ok(response.data.data.iter().map(recent_patient_from_record).collect())
    }

    pub async fn get_consultation_trend(&self) -> ApiResult<Vec<ChartDataPoint>> {
        let result = self.fetch_stats_payload().await.and_then(|p| consultation_trend(&p));
        self.or_placeholder(result, "consultation trend", placeholder::monthly_series)
    }

    pub async fn get_prescription_trend(&self) -> ApiResult<Vec<ChartDataPoint>> {
        let result = self.fetch_stats_payload().await.and_then(|p| prescription_trend(&p));
        self.or_placeholder(result, "prescription trend", placeholder::monthly_series)
    }

    pub async fn get_doctor_vs_patient(&self) -> ApiResult<Vec<ChartDataPoint>> {
        let result = self.fetch_stats_payload().await.and_then(|p| doctor_vs_patient(&p));
        self.or_placeholder(result, "doctor vs patient", placeholder::doctor_vs_patient)
    }

    pub async fn get_specialties(&self) -> ApiResult<Vec<ChartDataPoint>> {
        let result = self.fetch_stats_payload().await.and_then(|p| specialties(&p));
        self.or_placeholder(result, "specialties", placeholder::specialties)
    }

    /// All chart sections from a single stats request
    pub async fn get_charts(&self) -> ApiResult<DashboardCharts> {
        match self.fetch_stats_payload().await {
            Ok(payload) => self.charts_from_payload(&payload),
            Err(e) if self.placeholder_fallback => {
                tracing::warn!(error = %e, "Stats unavailable, using placeholder charts");
                Ok(placeholder_charts())
            }
            Err(e) => Err(e),
        }
    }

    /// Stats payload and patients fetched concurrently, charts derived from
    /// the one stats payload
    pub async fn get_dashboard_data(&self, limit: u32) -> ApiResult<DashboardData> {
        let (payload, recent_patients) =
            tokio::join!(self.fetch_stats_payload(), self.get_recent_patients(limit));
        let payload = payload?;
        let recent_patients = recent_patients?;
        let charts = self.charts_from_payload(&payload)?;

        Ok(DashboardData {
            stats: stats_from_payload(&payload),
            consultation_trend: charts.consultation_trend,
            prescription_trend: charts.prescription_trend,
            doctor_vs_patient: charts.doctor_vs_patient,
            specialties: charts.specialties,
            recent_patients,
        })
    }

    fn charts_from_payload(&self, payload: &StatsPayload) -> ApiResult<DashboardCharts> {
        Ok(DashboardCharts {
            consultation_trend: self.or_placeholder(
                consultation_trend(payload),
                "consultation trend",
                placeholder::monthly_series,
            )?,
            prescription_trend: self.or_placeholder(
                prescription_trend(payload),
                "prescription trend",
                placeholder::monthly_series,
            )?,
            doctor_vs_patient: self.or_placeholder(
                doctor_vs_patient(payload),
                "doctor vs patient",
                placeholder::doctor_vs_patient,
            )?,
            specialties: self.or_placeholder(
                specialties(payload),
                "specialties",
                placeholder::specialties,
            )?,
        })
    }

    fn or_placeholder(
        &self,
        result: ApiResult<Vec<ChartDataPoint>>,
        section: &str,
        generate: fn() -> Vec<ChartDataPoint>,
    ) -> ApiResult<Vec<ChartDataPoint>> {
        match result {
            Ok(points) => Ok(points),
            Err(e) if self.placeholder_fallback => {
                tracing::warn!(section = %section, error = %e, "Section unavailable, using placeholder data");
                Ok(generate())
            }
            Err(e) => Err(e),
        }
    }
}

// ============================================
// Mapping
// ============================================

fn placeholder_charts() -> DashboardCharts {
    DashboardCharts {
        consultation_trend: placeholder::monthly_series(),
        prescription_trend: placeholder::monthly_series(),
        doctor_vs_patient: placeholder::doctor_vs_patient(),
        specialties: placeholder::specialties(),
    }
}

/// Stat cards in display order
pub fn stats_from_payload(payload: &StatsPayload) -> Vec<DashboardStat> {
    vec![
        DashboardStat::from_percentage(
            "Total Patients",
            payload.patients.total_patients,
            payload.patients.patients_percentage_since_last_week,
            StatCategory::Patients,
        ),
        DashboardStat::from_percentage(
            "Total Doctors",
            payload.doctors.total_doctors,
            payload.doctors.doctors_percentage_since_last_week,
            StatCategory::Doctors,
        ),
        DashboardStat::from_percentage(
            "Pending Reviews",
            payload.pending_reviews.total_pending_reviews,
            payload.pending_reviews.pending_reviews_percentage_since_last_week,
            StatCategory::Reviews,
        ),
        DashboardStat::from_percentage(
            "Total Consultations",
            payload.consultations.total_consultations,
            payload.consultations.consultations_percentage_since_last_week,
            StatCategory::Consultations,
        ),
        DashboardStat::from_percentage(
            "Prescriptions Issued",
            payload.prescriptions.total_prescriptions,
            payload.prescriptions.prescriptions_percentage_since_last_week,
            StatCategory::Prescriptions,
        ),
    ]
}

pub fn consultation_trend(payload: &StatsPayload) -> ApiResult<Vec<ChartDataPoint>> {
    let months = payload
        .consultation_over_time
        .as_ref()
        .ok_or(ApiError::MissingSection("consultationOverTime"))?;
    Ok(months
        .iter()
        .map(|m| ChartDataPoint::new(m.month.clone(), m.count))
        .collect())
}

pub fn prescription_trend(payload: &StatsPayload) -> ApiResult<Vec<ChartDataPoint>> {
    let months = payload
        .prescription_volume_trend
        .as_ref()
        .ok_or(ApiError::MissingSection("prescriptionVolumeTrend"))?;
    Ok(months
        .iter()
        .map(|m| ChartDataPoint::new(m.month.clone(), m.count))
        .collect())
}

/// Categories paired with the first two series; gaps read as zero
pub fn doctor_vs_patient(payload: &StatsPayload) -> ApiResult<Vec<ChartDataPoint>> {
    let breakdown = payload
        .active_doctors_vs_patients
        .as_ref()
        .ok_or(ApiError::MissingSection("active_doctors_vs_patients"))?;

    let series_value = |series: usize, index: usize| -> f64 {
        breakdown
            .series
            .get(series)
            .and_then(|s| s.data.get(index))
            .copied()
            .unwrap_or(0.0)
    };

    Ok(breakdown
        .categories
        .iter()
        .enumerate()
        .map(|(i, category)| ChartDataPoint::paired(category.clone(), series_value(0, i), series_value(1, i)))
        .collect())
}

pub fn specialties(payload: &StatsPayload) -> ApiResult<Vec<ChartDataPoint>> {
    let items = payload
        .top_specialities_in_demand
        .as_ref()
        .ok_or(ApiError::MissingSection("top_specialities_in_demand"))?;
    Ok(items
        .iter()
        .map(|s| ChartDataPoint::new(s.speciality.clone(), s.count))
        .collect())
}

/// Flatten a patient record, preferring its own fields over the nested user
pub fn recent_patient_from_record(record: &PatientRecord) -> RecentPatient {
    let user = record.user.as_ref();

    let name = join_present(
        &[
            record.first_name.as_deref(),
            record.middle_name.as_deref(),
            record.last_name.as_deref(),
        ],
        " ",
    )
    .or_else(|| {
        user.and_then(|u| join_present(&[u.first_name.as_deref(), u.last_name.as_deref()], " "))
    })
    .unwrap_or_else(|| "N/A".to_string());

    let email = non_empty(record.email.as_deref())
        .or_else(|| user.and_then(|u| non_empty(u.email.as_deref())))
        .unwrap_or("N/A")
        .to_string();

    let phone = non_empty(record.phone.as_deref())
        .or_else(|| user.and_then(|u| non_empty(u.phone.as_deref())))
        .unwrap_or("N/A")
        .to_string();

    let location = join_present(&[record.lga.as_deref(), record.state.as_deref()], ", ")
        .or_else(|| user.and_then(|u| join_present(&[u.lga.as_deref(), u.state.as_deref()], ", ")))
        .unwrap_or_else(|| "N/A".to_string());

    let device = user
        .and_then(|u| u.devices.first())
        .and_then(|d| non_empty(d.platform.as_deref()))
        .unwrap_or("Unknown")
        .to_string();

    RecentPatient {
        id: record.id.to_string(),
        sign_up_date: record.created_at.clone(),
        name,
        email,
        phone,
        last_seen: non_empty(record.last_seen.as_deref())
            .unwrap_or("Never")
            .to_string(),
        location,
        device,
        status: PatientStatus::from_api(record.status.as_deref()),
        avatar: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{Device, PatientUser};

    fn payload() -> StatsPayload {
        serde_json::from_value(serde_json::json!({
            "patients": {"total_patients": 1520, "patients_percentage_since_last_week": 12.5},
            "doctors": {"total_doctors": 48, "doctors_percentage_since_last_week": -2},
            "pending_reviews": {"total_pending_reviews": 7, "pending_reviews_percentage_since_last_week": 0},
            "consultations": {"total_consultations": 930, "consultations_percentage_since_last_week": 4},
            "prescriptions": {"total_prescriptions": 611, "prescriptions_percentage_since_last_week": 9.25},
            "consultationOverTime": [{"month": "Jan", "count": 10}, {"month": "Feb", "count": 14}],
            "active_doctors_vs_patients": {
                "categories": ["Jan", "Feb", "Mar"],
                "series": [
                    {"name": "Doctors", "data": [3, 4, 5]},
                    {"name": "Patients", "data": [30, 41]}
                ]
            },
            "top_specialities_in_demand": [{"speciality": "Cardiology", "count": 22}]
        }))
        .unwrap()
    }

    #[test]
    fn test_stats_order_and_trend() {
        let stats = stats_from_payload(&payload());
        let labels: Vec<&str> = stats.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Total Patients",
                "Total Doctors",
                "Pending Reviews",
                "Total Consultations",
                "Prescriptions Issued"
            ]
        );
        assert_eq!(stats[0].value, 1520);
        assert!((stats[0].trend - 0.125).abs() < 1e-9);
        assert!((stats[1].trend + 0.02).abs() < 1e-9);
        assert_eq!(stats[2].category, StatCategory::Reviews);
        assert!(stats.iter().all(|s| s.trend_label == "Since last week"));
    }

    #[test]
    fn test_consultation_trend() {
        let points = consultation_trend(&payload()).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].label, "Feb");
        assert_eq!(points[1].value, 14.0);
    }

    #[test]
    fn test_missing_section() {
        let err = prescription_trend(&payload()).unwrap_err();
        assert!(matches!(err, ApiError::MissingSection("prescriptionVolumeTrend")));
    }

    #[test]
    fn test_doctor_vs_patient_fills_gaps_with_zero() {
        let points = doctor_vs_patient(&payload()).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].value, 3.0);
        assert_eq!(points[0].value2, Some(30.0));
        assert_eq!(points[2].value, 5.0);
        assert_eq!(points[2].value2, Some(0.0));
    }

    #[test]
    fn test_specialties() {
        let points = specialties(&payload()).unwrap();
        assert_eq!(points, vec![ChartDataPoint::new("Cardiology", 22.0)]);
    }

    #[test]
    fn test_patient_own_fields() {
        let record = PatientRecord {
            id: 42,
            created_at: "2025-09-12".into(),
            first_name: Some("Ada".into()),
            middle_name: Some("N.".into()),
            last_name: Some("Obi".into()),
            email: Some("ada@example.com".into()),
            phone: Some("+2348000000000".into()),
            last_seen: Some("2025-09-14 10:00".into()),
            lga: Some("Ikeja".into()),
            state: Some("Lagos".into()),
            status: Some("verified".into()),
            user: Some(PatientUser {
                devices: vec![Device { platform: Some("android".into()) }],
                ..Default::default()
            }),
        };

        let patient = recent_patient_from_record(&record);
        assert_eq!(patient.id, "42");
        assert_eq!(patient.name, "Ada N. Obi");
        assert_eq!(patient.email, "ada@example.com");
        assert_eq!(patient.location, "Ikeja, Lagos");
        assert_eq!(patient.device, "android");
        assert_eq!(patient.status, PatientStatus::Verified);
    }

    #[test]
    fn test_patient_falls_back_to_nested_user() {
        let record = PatientRecord {
            id: 7,
            user: Some(PatientUser {
                first_name: Some("Tunde".into()),
                last_name: Some("Bello".into()),
                email: Some("tunde@example.com".into()),
                phone: None,
                lga: None,
                state: Some("Oyo".into()),
                devices: vec![],
            }),
            ..Default::default()
        };

        let patient = recent_patient_from_record(&record);
        assert_eq!(patient.name, "Tunde Bello");
        assert_eq!(patient.email, "tunde@example.com");
        assert_eq!(patient.phone, "N/A");
        assert_eq!(patient.location, "Oyo");
        assert_eq!(patient.device, "Unknown");
        assert_eq!(patient.last_seen, "Never");
        assert_eq!(patient.status, PatientStatus::Pending);
    }

    #[test]
    fn test_patient_without_any_details() {
        let patient = recent_patient_from_record(&PatientRecord { id: 1, ..Default::default() });
        assert_eq!(patient.name, "N/A");
        assert_eq!(patient.email, "N/A");
        assert_eq!(patient.location, "N/A");
    }
}
