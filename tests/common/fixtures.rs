use medreport::ReportDataset;
use serde_json::{Value, json};

/// A complete dataset where every finding is benign.
pub fn benign_json() -> Value {
    json!({
        "patient": {
            "id": "P-1001",
            "name": "Ann Lee",
            "email": "ann.lee@example.com",
            "phone": "+1 555 0100"
        },
        "image": { "prediction": "Non-cancerous", "confidence": 0.94 },
        "biopsy": { "prediction": "Benign", "confidence": 0.88 },
        "risk": { "prediction": "Low Risk", "confidence": 0.81 },
        "medical": {
            "age": 54,
            "gender": "Female",
            "risk_factors": { "smoking": false, "family_history": true },
            "symptoms": { "persistent_cough": true, "chest_pain": false }
        },
        "treatment": {
            "diagnosis": "Chronic bronchitis",
            "medications": "[\"Albuterol\", \"Fluticasone\"]",
            "procedures": "{not valid json"
        }
    })
}

pub fn benign_dataset() -> ReportDataset {
    serde_json::from_value(benign_json()).expect("fixture deserializes")
}

/// The reference clear-result case: every finding is non-adverse.
pub fn clear_findings_dataset() -> ReportDataset {
    let mut value = benign_json();
    value["image"] = json!({ "prediction": "Non Cancer", "confidence": 0.94 });
    value["biopsy"] = json!({ "prediction": "Normal" });
    value["risk"] = json!({ "prediction": "Low Risk" });
    serde_json::from_value(value).expect("fixture deserializes")
}

/// The benign dataset without a biopsy result.
pub fn missing_biopsy_dataset() -> ReportDataset {
    let mut value = benign_json();
    value.as_object_mut().expect("object").remove("biopsy");
    serde_json::from_value(value).expect("fixture deserializes")
}

/// Advisory text long enough to fill several pages.
pub fn long_advisory(items: usize) -> String {
    let mut text = String::from("### Personal Precautions\n");
    for i in 1..=items {
        text.push_str(&format!(
            "{i}. **Step {i}** Follow the agreed plan for this step and report any change \
             in breathing, appetite or sleep to the care team.\n"
        ));
    }
    text
}
