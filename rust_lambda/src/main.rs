use aws_config::BehaviorVersion;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{run, service_fn, tracing, Error};
mod convert;
mod error;
mod event;
mod event_handler;
use event_handler::{function_handler, without_retries};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::subscriber::fmt()
        .json()
        .with_target(false)
        .without_time()
        .init();
    let shared_config = aws_config::load_defaults(BehaviorVersion::v2025_01_17()).await;
    let s3_client = S3Client::from_conf(
        without_retries(aws_sdk_s3::config::Builder::from(&shared_config)).build(),
    );
    let http_client = reqwest::Client::builder().build()?;
    run(service_fn(|event| {
        function_handler(event, &s3_client, &http_client)
    }))
    .await
}
