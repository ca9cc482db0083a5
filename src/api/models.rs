use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, PartialEq)]
pub struct GenerateRequest {
    pub input: String,
    pub system_prompt: Option<String>,
}

impl GenerateRequest {
    /// `None` unless the body is a JSON object with a non-empty string `input`.
    /// A `systemPrompt` that is not a string is ignored.
    pub fn from_json(body: &[u8]) -> Option<Self> {
        let value: Value = serde_json::from_slice(body).ok()?;
        let input = value
            .get("input")?
            .as_str()
            .filter(|input| !input.is_empty())?
            .to_string();
        let system_prompt = value
            .get("systemPrompt")
            .and_then(Value::as_str)
            .map(str::to_string);

        Some(Self {
            input,
            system_prompt,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScriptResponse {
    pub script: String,
    pub metadata: ScriptMetadata,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptMetadata {
    pub generated_at: String,
    pub model: String,
    /// Provider usage record, passed through as-is. Omitted when the provider sent none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Either body the relay can answer with, for callers decoding a response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerateResult {
    Script(ScriptResponse),
    Error(ErrorResponse),
}

impl GenerateResult {
    pub fn into_result(self) -> Result<ScriptResponse, ErrorResponse> {
        match self {
            Self::Script(script) => Ok(script),
            Self::Error(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_must_be_a_non_empty_string() {
        let bodies: [&[u8]; 6] = [b"{}", br#"{"input":""}"#, br#"{"input":42}"#, b"[]", b"not json", b""];
        for body in bodies {
            assert_eq!(GenerateRequest::from_json(body), None);
        }
    }

    #[test]
    fn whitespace_input_is_kept_verbatim() {
        let request = GenerateRequest::from_json(br#"{"input":"   "}"#).unwrap();
        assert_eq!(request.input, "   ");
    }

    #[test]
    fn non_string_system_prompt_is_ignored() {
        let request = GenerateRequest::from_json(br#"{"input":"my story","systemPrompt":5}"#).unwrap();
        assert_eq!(
            request,
            GenerateRequest {
                input: "my story".to_string(),
                system_prompt: None,
            }
        );

        let request =
            GenerateRequest::from_json(br#"{"input":"my story","systemPrompt":"Be brief."}"#).unwrap();
        assert_eq!(request.system_prompt.as_deref(), Some("Be brief."));
    }
}
