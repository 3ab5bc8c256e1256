//! Lambda entry point: convert an uploaded manifest to CoNLL-2003.
//!
//! `GTNER_CODEC` selects the tagging scheme (`bilou` by default) and
//! `GTNER_ATTR` the labeling attribute (`ner` by default).

use std::env;

use gtner_core::{ConverterConfig, DEFAULT_ATTR, LogFormat, init_tracing};
use gtner_lambda::{ConllHandler, ConllResponse, InvocationContext, S3Event};
use gtner_store::S3Store;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing(LogFormat::LAMBDA)?;

    let config = ConverterConfig::new()
        .with_codec(env::var("GTNER_CODEC").unwrap_or_else(|_| "bilou".to_string()))
        .with_attr(env::var("GTNER_ATTR").unwrap_or_else(|_| DEFAULT_ATTR.to_string()));
    let handler = ConllHandler::new(S3Store::from_env().await, config)?;
    let handler = &handler;

    run(service_fn(move |event: LambdaEvent<S3Event>| async move {
        let ctx = InvocationContext::from_env(event.context.request_id.clone());
        let response: ConllResponse = handler.handle(&event.payload, &ctx).await?;
        Ok::<_, Error>(response)
    }))
    .await
}
