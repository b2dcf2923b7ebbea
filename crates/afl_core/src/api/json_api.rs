use serde::{Deserialize, Serialize};

use crate::engine::config::EngineConfig;
use crate::engine::simulate_match;
use crate::engine::sink::NullSink;
use crate::error::{MatchError, Result};
use crate::models::{MatchResult, MatchSetup};

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchRequest {
    pub schema_version: u8,
    #[serde(flatten)]
    pub setup: MatchSetup,
    /// Full or partial engine config; omitted fields keep their defaults.
    /// Without it the `AFL_CONFIG_PROFILE` preset (or the default) is used.
    #[serde(default)]
    pub config: Option<EngineConfig>,
}

impl MatchRequest {
    pub fn new(setup: MatchSetup) -> Self {
        Self { schema_version: SCHEMA_VERSION, setup, config: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResponse {
    pub schema_version: u8,
    pub engine_version: String,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// Run one match from a JSON request and return the JSON response.
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    if request.schema_version != SCHEMA_VERSION {
        return Err(MatchError::UnsupportedSchemaVersion(request.schema_version));
    }

    let config = request.config.unwrap_or_else(EngineConfig::from_env_or_default);
    let result = simulate_match(&request.setup, &config, &mut NullSink)?;
    let response = MatchResponse {
        schema_version: SCHEMA_VERSION,
        engine_version: crate::VERSION.to_string(),
        result,
    };
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::{equal_setup, short_config};

    fn request_json(seed: u64) -> String {
        let mut request = MatchRequest::new(equal_setup(seed));
        request.config = Some(short_config());
        serde_json::to_string(&request).unwrap()
    }

    #[test]
    fn test_simulate_match_json() {
        let response = simulate_match_json(&request_json(42)).unwrap();
        let parsed: MatchResponse = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed.schema_version, 1);
        assert!(parsed.result.completed);
        assert_eq!(parsed.result.seed, 42);
        assert_eq!(parsed.result.quarters.len(), 4);
    }

    #[test]
    fn test_json_responses_are_byte_identical() {
        let request = request_json(9);
        assert_eq!(simulate_match_json(&request).unwrap(), simulate_match_json(&request).unwrap());
    }

    #[test]
    fn test_partial_config_in_request() {
        let mut value = serde_json::to_value(MatchRequest::new(equal_setup(1))).unwrap();
        value["config"] = serde_json::json!({ "match": { "quarter_length_secs": 120 } });
        let response = simulate_match_json(&value.to_string()).unwrap();
        let parsed: MatchResponse = serde_json::from_str(&response).unwrap();
        assert!(parsed.result.quarters.iter().all(|q| q.elapsed_ms == 120_000));
    }

    #[test]
    fn test_unsupported_schema_version() {
        let mut request = MatchRequest::new(equal_setup(1));
        request.schema_version = 2;
        let json = serde_json::to_string(&request).unwrap();
        assert!(matches!(simulate_match_json(&json), Err(MatchError::UnsupportedSchemaVersion(2))));
    }

    #[test]
    fn test_malformed_request() {
        assert!(matches!(simulate_match_json("{\"schema_version\": 1}"), Err(MatchError::Serialization(_))));
    }

    #[test]
    fn test_invalid_roster_reported() {
        let mut request = MatchRequest::new(equal_setup(1));
        request.setup.home.on_field.truncate(12);
        let json = serde_json::to_string(&request).unwrap();
        let err = simulate_match_json(&json).unwrap_err();
        assert!(err.is_configuration());
    }
}
