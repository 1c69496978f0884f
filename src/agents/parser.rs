use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CLASSIFIER_OUTPUT_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["description", "severity_score"],
        "properties": {
            "description": { "type": ["string", "null"] },
            "severity_score": { "type": "integer", "minimum": 0, "maximum": 100 }
        }
    })
});

/// Decoded model output for one specialist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedOutput {
    Success {
        description: Option<String>,
        severity_score: u8,
    },
    ParseFailure {
        raw: String,
        reason: String,
    },
}

/// Remove Markdown code-fence markers the model tends to wrap JSON in.
pub fn strip_code_fences(text: &str) -> String {
    text.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

pub fn parse_classifier_output(raw: &str) -> ParsedOutput {
    let failure = |reason: String| ParsedOutput::ParseFailure {
        raw: raw.to_string(),
        reason,
    };

    let cleaned = strip_code_fences(raw);
    let value: Value = match serde_json::from_str(&cleaned) {
        Ok(v) => v,
        Err(e) => return failure(format!("invalid JSON: {}", e)),
    };

    let compiled = match jsonschema::JSONSchema::compile(&CLASSIFIER_OUTPUT_SCHEMA) {
        Ok(c) => c,
        Err(e) => return failure(format!("schema compilation error: {}", e)),
    };
    if let Err(errors) = compiled.validate(&value) {
        let messages: Vec<String> = errors
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect();
        return failure(messages.join("; "));
    }

    // The schema admits integral floats such as 40.0
    let score = value["severity_score"]
        .as_u64()
        .or_else(|| value["severity_score"].as_f64().map(|f| f as u64))
        .unwrap_or(0);

    ParsedOutput::Success {
        description: value["description"].as_str().map(str::to_string),
        severity_score: score.min(100) as u8,
    }
}
