use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TransformError;

/// The parts of an S3 Object Lambda invocation this function reads.
///
/// The rest of the envelope (`userRequest`, `configuration`, ...) is ignored.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ObjectLambdaEvent {
    pub x_amz_request_id: Option<String>,
    pub get_object_context: Option<RawGetObjectContext>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawGetObjectContext {
    pub output_route: Option<String>,
    pub output_token: Option<String>,
    pub input_s3_url: Option<String>,
}

/// Routing data for one GetObject interception, with every field present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetObjectContext {
    pub output_route: String,
    pub output_token: String,
    pub input_s3_url: String,
}

/// Value handed back to the Lambda runtime, separate from the delivered body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObjectLambdaResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl ObjectLambdaEvent {
    pub fn from_value(payload: Value) -> Result<Self, TransformError> {
        serde_json::from_value(payload).map_err(|e| TransformError::MalformedEvent(e.to_string()))
    }

    pub fn get_object_context(&self) -> Result<GetObjectContext, TransformError> {
        let raw = self
            .get_object_context
            .as_ref()
            .ok_or_else(|| TransformError::MalformedEvent("missing getObjectContext".to_string()))?;
        Ok(GetObjectContext {
            output_route: required(raw.output_route.as_deref(), "outputRoute")?,
            output_token: required(raw.output_token.as_deref(), "outputToken")?,
            input_s3_url: required(raw.input_s3_url.as_deref(), "inputS3Url")?,
        })
    }
}

fn required(field: Option<&str>, name: &str) -> Result<String, TransformError> {
    match field {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        Some(_) => Err(TransformError::MalformedEvent(format!(
            "getObjectContext.{name} is empty"
        ))),
        None => Err(TransformError::MalformedEvent(format!(
            "missing getObjectContext.{name}"
        ))),
    }
}
