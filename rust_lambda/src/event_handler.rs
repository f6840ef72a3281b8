use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{tracing, Error, LambdaEvent};
use serde_json::Value;

use crate::convert::csv_to_json;
use crate::error::TransformError;
use crate::event::{GetObjectContext, ObjectLambdaEvent, ObjectLambdaResponse};

/// Downloads the original object through its pre-signed URL and decodes it as UTF-8.
///
/// Any non-2xx status is treated as a fetch failure.
async fn fetch_original_object(
    http_client: &reqwest::Client,
    input_s3_url: &str,
) -> Result<String, TransformError> {
    let response = http_client
        .get(input_s3_url)
        .send()
        .await?
        .error_for_status()?;
    let bytes = response.bytes().await?;
    tracing::info!(bytes = bytes.len(), "Fetched original object");
    Ok(std::str::from_utf8(&bytes)?.to_string())
}

/// The response route and token are single use, so the SDK must not resend
/// `WriteGetObjectResponse` on its own.
pub(crate) fn without_retries(
    builder: aws_sdk_s3::config::Builder,
) -> aws_sdk_s3::config::Builder {
    builder.retry_config(RetryConfig::disabled())
}

async fn write_get_object_response(
    s3_client: &S3Client,
    context: &GetObjectContext,
    body: &str,
) -> Result<(), TransformError> {
    s3_client
        .write_get_object_response()
        .request_route(&context.output_route)
        .request_token(&context.output_token)
        .body(ByteStream::from(body.as_bytes().to_vec()))
        .send()
        .await?;
    Ok(())
}

async fn transform(
    payload: Value,
    s3_client: &S3Client,
    http_client: &reqwest::Client,
) -> Result<ObjectLambdaResponse, TransformError> {
    let event = ObjectLambdaEvent::from_value(payload)?;
    let context = event.get_object_context()?;
    tracing::info!(
        request_id = event.x_amz_request_id.as_deref().unwrap_or_default(),
        output_route = %context.output_route,
        "Received GetObject request"
    );

    let original = fetch_original_object(http_client, &context.input_s3_url).await?;
    let json_object = csv_to_json(&original)?;
    tracing::debug!(body = %json_object, "Converted CSV to JSON");

    write_get_object_response(s3_client, &context, &json_object).await?;
    tracing::info!("Wrote GetObject response to {}", context.output_route);

    Ok(ObjectLambdaResponse {
        status_code: 200,
        body: serde_json::to_string(&json_object)?,
    })
}

pub(crate) async fn function_handler(
    event: LambdaEvent<Value>,
    s3_client: &S3Client,
    http_client: &reqwest::Client,
) -> Result<ObjectLambdaResponse, Error> {
    transform(event.payload, s3_client, http_client)
        .await
        .map_err(|e| {
            tracing::error!("Transform failed: {}", e);
            Error::from(e)
        })
}
