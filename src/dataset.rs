//! The read-only snapshot a report is generated from.
//!
//! Everything except the patient's id and name is optional. Maps are ordered
//! so tables always list their rows in the same order.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ReportError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportDataset {
    #[serde(deserialize_with = "deserialize_or_default")]
    pub patient: PatientInfo,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub image: Option<PredictionResult>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub biopsy: Option<PredictionResult>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub risk: Option<PredictionResult>,
    #[serde(deserialize_with = "deserialize_or_default")]
    pub medical: MedicalData,
    #[serde(deserialize_with = "deserialize_or_default")]
    pub treatment: TreatmentInfo,
    /// Advisory text fetched earlier; used instead of calling the service.
    #[serde(deserialize_with = "deserialize_text")]
    pub advisory_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PatientInfo {
    #[serde(deserialize_with = "deserialize_required_text")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_required_text")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub date_of_birth: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PredictionResult {
    #[serde(deserialize_with = "deserialize_text")]
    pub prediction: Option<String>,
    #[serde(deserialize_with = "deserialize_number")]
    pub confidence: Option<f32>,
}

impl PredictionResult {
    /// The prediction label, when it is present and not blank.
    pub fn label(&self) -> Option<&str> {
        non_blank(&self.prediction)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MedicalData {
    #[serde(deserialize_with = "deserialize_number")]
    pub age: Option<u32>,
    #[serde(deserialize_with = "deserialize_text")]
    pub gender: Option<String>,
    #[serde(deserialize_with = "deserialize_flags")]
    pub risk_factors: BTreeMap<String, bool>,
    #[serde(deserialize_with = "deserialize_flags")]
    pub symptoms: BTreeMap<String, bool>,
}

impl MedicalData {
    pub fn has_any_flag(&self) -> bool {
        self.risk_factors.values().chain(self.symptoms.values()).any(|v| *v)
    }
}

/// Optional treatment fields. `medications` and `procedures` hold JSON
/// array text as stored by the records system.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TreatmentInfo {
    #[serde(deserialize_with = "deserialize_text")]
    pub diagnosis: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub treatment_plan: Option<String>,
    #[serde(deserialize_with = "deserialize_list_text")]
    pub medications: Option<String>,
    #[serde(deserialize_with = "deserialize_list_text")]
    pub procedures: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub follow_up_date: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub doctor_notes: Option<String>,
}

impl TreatmentInfo {
    pub fn medication_list(&self) -> Option<Vec<String>> {
        parse_json_list(self.medications.as_deref())
    }

    pub fn procedure_list(&self) -> Option<Vec<String>> {
        parse_json_list(self.procedures.as_deref())
    }

    /// Whether any field would produce visible output.
    pub fn has_any(&self) -> bool {
        [
            &self.diagnosis,
            &self.treatment_plan,
            &self.follow_up_date,
            &self.doctor_notes,
        ]
        .into_iter()
        .any(|f| non_blank(f).is_some())
            || self.medication_list().is_some()
            || self.procedure_list().is_some()
    }
}

impl ReportDataset {
    pub fn from_json(text: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ReportError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks the preconditions for drawing anything at all.
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.patient.id.trim().is_empty() {
            return Err(ReportError::InvalidDataset("patient id is missing".into()));
        }
        if self.patient.name.trim().is_empty() {
            return Err(ReportError::InvalidDataset("patient name is missing".into()));
        }
        Ok(())
    }

    pub fn provided_advisory(&self) -> Option<&str> {
        non_blank(&self.advisory_text)
    }
}

pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parses JSON array text into display strings. Anything that is not a
/// non-empty JSON array counts as absent.
fn parse_json_list(text: Option<&str>) -> Option<Vec<String>> {
    let values: Vec<Value> = serde_json::from_str(text?.trim()).ok()?;
    let items: Vec<String> = values
        .into_iter()
        .filter_map(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::String(_) | Value::Null => None,
            Value::Object(map) => {
                // The name leads, the other details follow in key order.
                let name = map.get("name").and_then(scalar_text);
                let details = map
                    .iter()
                    .filter(|(key, _)| key.as_str() != "name")
                    .filter_map(|(_, v)| scalar_text(v));
                let parts: Vec<String> = name.into_iter().chain(details).collect();
                (!parts.is_empty()).then(|| parts.join(" "))
            }
            other => scalar_text(&other),
        })
        .collect();
    (!items.is_empty()).then_some(items)
}

// Upstream records are loosely typed. A field of the wrong shape is treated
// as absent; only syntactically broken JSON fails the whole dataset.

fn deserialize_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn deserialize_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(deserialize_lenient(deserializer)?.unwrap_or_default())
}

/// Accepts JSON numbers and numeric strings such as `"54"` or `" 0.94 "`.
fn deserialize_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + FromStr,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s.trim().parse().ok(),
        value @ Value::Number(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn deserialize_required_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_text(deserializer)?.unwrap_or_default())
}

/// List fields arrive either as JSON array text or as an inline array.
fn deserialize_list_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        value @ Value::Array(_) => Some(value.to_string()),
        _ => None,
    })
}

/// Keeps entries whose value reads as a boolean; a non-object is an empty map.
fn deserialize_flags<'de, D>(deserializer: D) -> Result<BTreeMap<String, bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(map) = Value::deserialize(deserializer)? else {
        return Ok(BTreeMap::new());
    };
    Ok(map
        .into_iter()
        .filter_map(|(key, value)| flag_value(&value).map(|flag| (key, flag)))
        .collect())
}

fn flag_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `family_history` becomes `Family History`.
pub fn humanize_key(key: &str) -> String {
    key.split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
