//! Advisory text for the precautions section.
//!
//! The text comes from an external generation service behind
//! [`AdvisoryProvider`]. When the service fails, [`FALLBACK_PRECAUTIONS`] is
//! rendered instead through the same markdown renderer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::dataset::{ReportDataset, humanize_key};
use crate::error::AdvisoryError;

/// Precautions shown when no generated text is available.
pub const FALLBACK_PRECAUTIONS: &str = "\
### General Precautions
These general recommendations apply while personalised advice is unavailable. \
Discuss them with your **healthcare provider** before making changes.

#### Lifestyle
1. **Avoid Smoking** Stop smoking and avoid second-hand smoke, dust and chemical fumes.
2. **Stay Active** Aim for light exercise such as walking on most days, as tolerated.
3. **Eat Well** Prefer fresh fruit, vegetables and whole grains; limit processed food.

#### Monitoring
- **Symptoms:** Keep a diary of cough, breathlessness, chest pain or weight loss.
- **Appointments:** Attend every scheduled follow-up and screening.
- Seek urgent care if you cough up blood or have sudden difficulty breathing.

#### Support
- Ask your care team about counselling and support groups.
- Keep a list of your current medications and share it at each visit.
";

/// Source of generated advisory text.
#[async_trait]
pub trait AdvisoryProvider: Send + Sync {
    /// Generates markdown advisory text for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, AdvisoryError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

/// Calls a text-generation endpoint that takes `{model, prompt, stream}`
/// and answers `{response}`.
#[derive(Debug, Clone)]
pub struct HttpAdvisoryProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl HttpAdvisoryProvider {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AdvisoryProvider for HttpAdvisoryProvider {
    async fn generate(&self, prompt: &str) -> Result<String, AdvisoryError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };
        log::debug!("Requesting advisory text from {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisoryError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| AdvisoryError::Malformed(e.to_string()))?;
        let text = parsed
            .response
            .ok_or_else(|| AdvisoryError::Malformed("missing `response` field".into()))?;
        let text = text.trim();
        if text.is_empty() {
            return Err(AdvisoryError::Empty);
        }
        Ok(text.to_string())
    }
}

/// Builds the free-text prompt summarizing the dataset.
pub fn build_prompt(dataset: &ReportDataset) -> String {
    let mut prompt = String::from(
        "You are assisting a physician. Write concise precautions and recommendations \
         for the patient described below. Use '### ' for the main heading, '#### ' for \
         sub-headings, numbered items of the form '1. **Title** explanation' and bullets \
         of the form '- **Label:** text'. Do not give a diagnosis.\n\n",
    );

    let medical = &dataset.medical;
    if let Some(age) = medical.age {
        let _ = writeln!(prompt, "Age: {age}");
    }
    if let Some(gender) = medical.gender.as_deref() {
        let _ = writeln!(prompt, "Gender: {gender}");
    }
    for (name, result) in [
        ("Image analysis", &dataset.image),
        ("Biopsy", &dataset.biopsy),
        ("Risk assessment", &dataset.risk),
    ] {
        if let Some(label) = result.as_ref().and_then(|r| r.label()) {
            let _ = writeln!(prompt, "{name}: {label}");
        }
    }

    let flagged = |map: &std::collections::BTreeMap<String, bool>| {
        map.iter()
            .filter(|(_, v)| **v)
            .map(|(k, _)| humanize_key(k))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let risk_factors = flagged(&medical.risk_factors);
    if !risk_factors.is_empty() {
        let _ = writeln!(prompt, "Risk factors: {risk_factors}");
    }
    let symptoms = flagged(&medical.symptoms);
    if !symptoms.is_empty() {
        let _ = writeln!(prompt, "Symptoms: {symptoms}");
    }
    prompt
}
