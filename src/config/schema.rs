use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "llm": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "model": { "type": "string", "minLength": 1 },
                    "summary_model": { "type": "string", "minLength": 1 },
                    "api_key": { "type": "string" },
                    "base_url": { "type": "string", "pattern": "^https?://" }
                }
            },
            "server": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "host": { "type": "string" },
                    "port": { "type": "integer", "minimum": 1, "maximum": 65535 },
                    "upload_dir": { "type": "string", "minLength": 1 },
                    "max_upload_bytes": { "type": "integer", "minimum": 1024 }
                }
            },
            "analysis": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "classifier_timeout_secs": { "type": "integer", "minimum": 1 },
                    "prompts_dir": { "type": "string" }
                }
            }
        }
    })
});
