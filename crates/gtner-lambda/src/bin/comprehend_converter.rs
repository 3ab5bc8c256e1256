//! Lambda entry point: export an uploaded manifest as a Comprehend dataset.

use gtner_core::{LogFormat, init_tracing};
use gtner_lambda::{ComprehendHandler, ComprehendResponse, InvocationContext, S3Event};
use gtner_store::S3Store;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing(LogFormat::LAMBDA)?;

    let handler = ComprehendHandler::new(S3Store::from_env().await);
    let handler = &handler;

    run(service_fn(move |event: LambdaEvent<S3Event>| async move {
        let ctx = InvocationContext::from_env(event.context.request_id.clone());
        let response: ComprehendResponse = handler.handle(&event.payload, &ctx).await?;
        Ok::<_, Error>(response)
    }))
    .await
}
