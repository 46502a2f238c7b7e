//! Fixture data served by the mock API

use chrono::{Duration, Utc};

use crate::api::dto::{
    ConsultationTotals, Device, DoctorTotals, MonthlyCount, NamedSeries, PatientRecord,
    PatientTotals, PatientUser, PatientsPayload, PendingReviewTotals, PrescriptionTotals,
    SeriesBreakdown, SpecialityCount, StatsPayload,
};

/// Patients the fixture set contains
pub const PATIENT_COUNT: u32 = 60;

const FIRST_NAMES: [&str; 8] = ["Adaeze", "Tunde", "Chioma", "Ibrahim", "Ngozi", "Emeka", "Aisha", "Segun"];
const LAST_NAMES: [&str; 6] = ["Okafor", "Bello", "Adeyemi", "Musa", "Eze", "Balogun"];
const LOCATIONS: [(&str, &str); 5] = [
    ("Ikeja", "Lagos"),
    ("Wuse", "Abuja"),
    ("Enugu North", "Enugu"),
    ("Ibadan North", "Oyo"),
    ("Port Harcourt", "Rivers"),
];
const PLATFORMS: [&str; 3] = ["android", "ios", "web"];
const STATUSES: [&str; 4] = ["verified", "pending", "verified", "rejected"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Stats payload; `prescriptionVolumeTrend` is left out like on the live API
pub fn stats_payload() -> StatsPayload {
    StatsPayload {
        patients: PatientTotals {
            total_patients: 12_480,
            patients_percentage_since_last_week: 12.5,
        },
        doctors: DoctorTotals {
            total_doctors: 342,
            doctors_percentage_since_last_week: 3.2,
        },
        pending_reviews: PendingReviewTotals {
            total_pending_reviews: 27,
            pending_reviews_percentage_since_last_week: -8.0,
        },
        consultations: ConsultationTotals {
            total_consultations: 8_915,
            consultations_percentage_since_last_week: 6.75,
        },
        prescriptions: PrescriptionTotals {
            total_prescriptions: 6_204,
            prescriptions_percentage_since_last_week: -1.5,
        },
        consultation_over_time: Some(
            MONTHS
                .iter()
                .enumerate()
                .map(|(i, month)| MonthlyCount {
                    month: month.to_string(),
                    count: (40 + i * 13 % 50) as f64,
                })
                .collect(),
        ),
        prescription_volume_trend: None,
        active_doctors_vs_patients: Some(SeriesBreakdown {
            categories: MONTHS[..6].iter().map(|m| m.to_string()).collect(),
            series: vec![
                NamedSeries {
                    name: "Doctors".to_string(),
                    data: vec![12.0, 15.0, 18.0, 17.0, 21.0, 24.0],
                },
                NamedSeries {
                    name: "Patients".to_string(),
                    data: vec![140.0, 162.0, 190.0, 205.0, 231.0, 260.0],
                },
            ],
        }),
        top_specialities_in_demand: Some(vec![
            SpecialityCount {
                speciality: "General Practice".to_string(),
                count: 412.0,
            },
            SpecialityCount {
                speciality: "Pediatrics".to_string(),
                count: 198.0,
            },
            SpecialityCount {
                speciality: "Dermatology".to_string(),
                count: 121.0,
            },
        ]),
    }
}

/// Most recent `limit` patients, newest first
pub fn patients(limit: u32) -> PatientsPayload {
    let count = limit.min(PATIENT_COUNT);
    PatientsPayload {
        data: (0..count).map(patient).collect(),
        current_page: Some(1),
        per_page: Some(limit),
        total: Some(PATIENT_COUNT as u64),
    }
}

/// Every fourth patient only has details on the nested user account
fn patient(i: u32) -> PatientRecord {
    let idx = i as usize;
    let first = FIRST_NAMES[idx % FIRST_NAMES.len()];
    let last = LAST_NAMES[idx % LAST_NAMES.len()];
    let (lga, state) = LOCATIONS[idx % LOCATIONS.len()];
    let email = format!("{}.{}{}@example.com", first.to_lowercase(), last.to_lowercase(), i);
    let phone = format!("+23480{:08}", 10_000_000 + i * 7_919);

    let now = Utc::now();
    let created_at = (now - Duration::days(i as i64)).format("%Y-%m-%d").to_string();
    let last_seen = (now - Duration::hours(i as i64 * 5)).format("%Y-%m-%d %H:%M").to_string();

    let user = PatientUser {
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        email: Some(email.clone()),
        phone: Some(phone.clone()),
        lga: Some(lga.to_string()),
        state: Some(state.to_string()),
        devices: if i % 5 == 4 {
            Vec::new()
        } else {
            vec![Device {
                platform: Some(PLATFORMS[idx % PLATFORMS.len()].to_string()),
            }]
        },
    };

    if i % 4 == 3 {
        return PatientRecord {
            id: 1000 + i as u64,
            created_at,
            status: Some(STATUSES[idx % STATUSES.len()].to_string()),
            user: Some(user),
            ..Default::default()
        };
    }

    PatientRecord {
        id: 1000 + i as u64,
        created_at,
        first_name: Some(first.to_string()),
        middle_name: None,
        last_name: Some(last.to_string()),
        email: Some(email),
        phone: Some(phone),
        last_seen: if i % 6 == 5 { None } else { Some(last_seen) },
        lga: Some(lga.to_string()),
        state: Some(state.to_string()),
        status: Some(STATUSES[idx % STATUSES.len()].to_string()),
        user: Some(user),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dashboard::{recent_patient_from_record, stats_from_payload};

    #[test]
    fn test_patients_respects_limit() {
        assert_eq!(patients(5).data.len(), 5);
        assert_eq!(patients(500).data.len(), PATIENT_COUNT as usize);
        assert_eq!(patients(5).total, Some(60));
    }

    #[test]
    fn test_nested_only_patient_maps_from_user() {
        let record = patient(3);
        assert!(record.first_name.is_none());

        let row = recent_patient_from_record(&record);
        assert_eq!(row.name, "Ibrahim Musa");
        assert_eq!(row.location, "Ibadan North, Oyo");
        assert_eq!(row.last_seen, "Never");
    }

    #[test]
    fn test_stats_fixture_maps() {
        let stats = stats_from_payload(&stats_payload());
        assert_eq!(stats.len(), 5);
        assert_eq!(stats[0].value, 12_480);
    }
}
