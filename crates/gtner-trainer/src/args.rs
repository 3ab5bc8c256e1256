//! Splitting a command line into launcher flags and pass-through arguments.
//!
//! Launchers accept a handful of their own flags and forward everything else
//! to the training routine, so the command line is partitioned before clap
//! sees it.

/// A flag owned by the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownFlag {
    pub name: &'static str,
    pub takes_value: bool,
}

impl KnownFlag {
    pub const fn value(name: &'static str) -> Self {
        Self {
            name,
            takes_value: true,
        }
    }

    pub const fn switch(name: &'static str) -> Self {
        Self {
            name,
            takes_value: false,
        }
    }
}

/// Split `args` (program name first) into the launcher's own arguments and
/// the rest, preserving order in both.
///
/// Known flags may be written `--flag value` or `--flag=value`. The program
/// name stays at the head of the first list.
///
/// ```
/// use gtner_trainer::args::{KnownFlag, partition_args};
///
/// let known = [KnownFlag::value("--train")];
/// let (own, rest) = partition_args(["prog", "--train", "data", "--epochs", "3"], &known);
/// assert_eq!(own, ["prog", "--train", "data"]);
/// assert_eq!(rest, ["--epochs", "3"]);
/// ```
pub fn partition_args<I, S>(args: I, known: &[KnownFlag]) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut own: Vec<String> = args.next().into_iter().collect();
    let mut rest = Vec::new();

    while let Some(arg) = args.next() {
        let name = arg.split_once('=').map_or(arg.as_str(), |(name, _)| name);
        match known.iter().find(|flag| flag.name == name) {
            Some(flag) if flag.takes_value && !arg.contains('=') => {
                own.push(arg);
                own.extend(args.next());
            }
            Some(_) => own.push(arg),
            None => rest.push(arg),
        }
    }

    (own, rest)
}
