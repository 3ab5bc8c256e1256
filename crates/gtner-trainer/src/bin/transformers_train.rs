use anyhow::{Context, Result};
use gtner_core::{LogFormat, init_tracing};
use gtner_trainer::TransformersArgs;

fn main() -> Result<()> {
    init_tracing(LogFormat::CONTAINER).context("failed to install tracing subscriber")?;

    let (args, passthrough) = TransformersArgs::parse_known();
    args.trainer()
        .run(&passthrough, args.train_help)
        .context("transformers training failed")?;
    Ok(())
}
