use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OneMoreQuery {
    /// Id of the item currently on screen; it will not be served again
    /// unless it is the only eligible item.
    pub exclude: Option<String>,
}

/// Body of `POST /api/submit`.
///
/// `text` is kept as raw JSON so that a non-string value is reported as a
/// validation failure instead of a deserialization rejection.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitRequest {
    #[serde(default)]
    #[schema(value_type = String, example = "I lied when I said I was fine.")]
    pub text: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
