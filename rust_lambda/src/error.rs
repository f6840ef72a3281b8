use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::write_get_object_response::WriteGetObjectResponseError;
use thiserror::Error;

/// Everything that can abort a single CSV-to-JSON invocation.
///
/// None of these are recovered from: the handler returns them to the Lambda
/// runtime, which reports the invocation as failed.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("malformed event: {0}")]
    MalformedEvent(String),
    #[error("failed to fetch original object: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("original object is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),
    #[error("failed to parse CSV: {0}")]
    Parse(#[from] csv::Error),
    #[error("failed to serialize JSON: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write GetObject response: {0}")]
    Delivery(#[from] SdkError<WriteGetObjectResponseError>),
}
