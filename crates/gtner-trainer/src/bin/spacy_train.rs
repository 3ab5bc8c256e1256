use anyhow::{Context, Result};
use gtner_core::{LogFormat, init_tracing};
use gtner_trainer::SpacyArgs;

fn main() -> Result<()> {
    init_tracing(LogFormat::CONTAINER).context("failed to install tracing subscriber")?;

    let (args, hyperparameters) = SpacyArgs::parse_known();
    args.trainer()
        .run(&hyperparameters)
        .context("spacy training failed")?;
    Ok(())
}
