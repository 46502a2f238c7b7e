//! Placeholder chart data
//!
//! Served by the trend and breakdown methods when the API cannot provide
//! the section and placeholder fallback is enabled.

use rand::Rng;

use crate::models::ChartDataPoint;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const SPECIALTIES: [&str; 4] = ["Cardiology", "Dermatology", "Pediatrics", "General Practice"];

/// Twelve months of random counts
pub fn monthly_series() -> Vec<ChartDataPoint> {
    let mut rng = rand::thread_rng();
    MONTHS
        .iter()
        .map(|month| ChartDataPoint::new(*month, rng.gen_range(20..=200) as f64))
        .collect()
}

/// Twelve months of paired doctor/patient counts
pub fn doctor_vs_patient() -> Vec<ChartDataPoint> {
    let mut rng = rand::thread_rng();
    MONTHS
        .iter()
        .map(|month| {
            ChartDataPoint::paired(
                *month,
                rng.gen_range(5..=60) as f64,
                rng.gen_range(40..=400) as f64,
            )
        })
        .collect()
}

/// Demand per specialty
pub fn specialties() -> Vec<ChartDataPoint> {
    let mut rng = rand::thread_rng();
    SPECIALTIES
        .iter()
        .map(|name| ChartDataPoint::new(*name, rng.gen_range(10..=100) as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_series_shape() {
        let series = monthly_series();
        assert_eq!(series.len(), 12);
        assert_eq!(series[0].label, "Jan");
        assert!(series.iter().all(|p| (20.0..=200.0).contains(&p.value) && p.value2.is_none()));
    }

    #[test]
    fn test_doctor_vs_patient_is_paired() {
        let series = doctor_vs_patient();
        assert_eq!(series.len(), 12);
        assert!(series.iter().all(|p| p.value2.is_some()));
    }

    #[test]
    fn test_specialties_labels() {
        let labels: Vec<String> = specialties().into_iter().map(|p| p.label).collect();
        assert_eq!(labels, SPECIALTIES.to_vec());
    }
}
