use serde::{Deserialize, Serialize};

/// Body of `/process`
#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// Named LLM provider, the first configured one when absent
    #[serde(default)]
    pub provider: Option<String>,
}

/// Response of `/process`
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub text_response: Reply,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Reply {
    pub reply: String,
}
