use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use tracing::{debug, trace};

/// Print the token stream of Gherkin feature files.
#[derive(Debug, clap::Parser)]
#[clap(name = "gherkin-tokens")]
pub struct Cli {
    /// Emit each file's token list as pretty-printed JSON instead of the
    /// plain text format.
    #[clap(long)]
    pub json: bool,

    /// Feature files, tokenized and printed in the order given.
    pub paths: Vec<PathBuf>,
}

impl Cli {
    /// One open-read-scan-print cycle per path, in order. Any failure aborts
    /// the run; already-printed output stays printed.
    pub fn run(&self, w: &mut impl Write) -> anyhow::Result<()> {
        for path in &self.paths {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            trace!(path = %path.display(), source_len = source.len(), "read input file");

            if self.json {
                let tokens = crate::scan_tokens(&source)
                    .with_context(|| format!("failed to tokenize {}", path.display()))?;
                debug!(path = %path.display(), tokens = tokens.len(), "tokenized input file");
                writeln!(w, "{}", serde_json::to_string_pretty(&tokens)?)?;
            } else {
                let output = crate::format_tokens(&source)
                    .with_context(|| format!("failed to tokenize {}", path.display()))?;
                write!(w, "{output}")?;
            }
        }
        Ok(())
    }
}
