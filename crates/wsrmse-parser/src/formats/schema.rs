use serde::Deserialize;

pub const OBSERVATIONS_KEY: &str = "weatherReports";
pub const FORECASTS_KEY: &str = "weatherForecasts";

/// On-disk layout shared by every batch format. Field names are mapped
/// explicitly; nothing is inferred from the record type.
#[derive(Debug, Deserialize)]
pub(crate) struct BatchDocument {
    #[serde(rename = "weatherReports", default)]
    pub reports: Vec<RawReport>,
    #[serde(rename = "weatherForecasts", default)]
    pub forecasts: Vec<RawForecast>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawReport {
    #[serde(rename = "date")]
    pub timestamp: String,
    #[serde(rename = "windspeed")]
    pub value: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawForecast {
    pub id: i64,
    #[serde(rename = "origin")]
    pub issued_at: String,
    #[serde(rename = "date")]
    pub target_at: String,
    #[serde(rename = "windspeed")]
    pub predicted_value: f64,
    #[serde(rename = "temp")]
    pub auxiliary_value: f64,
}
