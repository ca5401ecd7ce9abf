use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Services offered on the quote form, in the order the form lists them.
pub const SERVICE_TYPES: &[&str] = &[
    "Commercial Cleaning",
    "Office Cleaning",
    "Residential Cleaning",
    "Deep Cleaning",
    "Post-Construction Cleaning",
    "Move-In/Move-Out Cleaning",
];

pub fn is_offered_service(value: &str) -> bool {
    SERVICE_TYPES.iter().any(|s| s.eq_ignore_ascii_case(value.trim()))
}

/// How often the customer wants the cleaning done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Frequency {
    Daily,
    Weekly,
    BiWeekly,
    Fortnightly,
    #[default]
    OneTime,
}

impl Frequency {
    pub const ALL: [Frequency; 5] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::BiWeekly,
        Frequency::Fortnightly,
        Frequency::OneTime,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::BiWeekly => "Bi-Weekly",
            Frequency::Fortnightly => "Fortnightly",
            Frequency::OneTime => "One-time",
        }
    }

    /// Resolve an optional raw label, falling back to one-time when it is
    /// absent, blank or unknown. Returns the value and whether it was recognised.
    pub fn resolve(raw: Option<&str>) -> (Frequency, bool) {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => (Frequency::OneTime, true),
            Some(s) => match s.parse() {
                Ok(f) => (f, true),
                Err(_) => (Frequency::OneTime, false),
            },
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown frequency: {0}")]
pub struct UnknownFrequency(pub String);

impl FromStr for Frequency {
    type Err = UnknownFrequency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | ' ' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" => Ok(Frequency::BiWeekly),
            "fortnightly" => Ok(Frequency::Fortnightly),
            "onetime" => Ok(Frequency::OneTime),
            _ => Err(UnknownFrequency(s.to_string())),
        }
    }
}

impl Serialize for Frequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A customer's cleaning-service inquiry, as it travels from the quote form
/// to the mail relay.
///
/// Only `name`, `email` and `phone` are guaranteed by the relay; the form
/// additionally guarantees `address` and `service_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Trim a value and drop it when nothing is left.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
