use crate::options::Args;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

mod options {
    use std::path::PathBuf;

    #[derive(Debug, clap::Parser)]
    #[clap(name = "ttool", about = "A tool to help dealing with tuition price data")]
    pub enum Args {
        /// Reconcile master program rosters against a price collection CSV and write
        /// one priced row per program variant to standard output.
        Reconcile {
            /// The master roster CSV files, primary first. The primary roster is
            /// required; later ones (for instance the next academic year) are
            /// skipped with a note when missing.
            #[clap(long, short = 'm', required = true)]
            master: Vec<PathBuf>,
            /// The price collection CSV file.
            #[clap(long, short = 'p')]
            prices: PathBuf,
            /// A RON file overriding the built-in normalization rules.
            #[clap(long, short = 'r')]
            rules: Option<PathBuf>,
        },
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = options::Args::parse();
    match args {
        Args::Reconcile {
            master,
            prices,
            rules,
        } => {
            let rules = rules
                .map(|path| {
                    ttool::rules::Rules::from_path(&path)
                        .with_context(|| format!("Could not load rules from '{}'", path.display()))
                })
                .transpose()?
                .unwrap_or_default();
            let outcome = ttool::reconcile(
                into_read(master)?,
                std::io::Cursor::new(std::fs::read(&prices).with_context(|| {
                    format!("Could not read price collection at '{}'", prices.display())
                })?),
                std::io::BufWriter::new(std::io::stdout()),
                ttool::reconcile::Options { rules },
            )?;

            info!(
                master_rows = outcome.master_rows,
                price_rows = outcome.price_rows,
                price_keys = outcome.price_keys,
                "loaded input data"
            );
            info!(
                matched = outcome.matched,
                unmatched = outcome.unmatched,
                duplicate_variants = outcome.duplicate_variants,
                public_skipped = outcome.public_skipped,
                "reconciliation complete"
            );
            for (pct, count) in &outcome.scholarship_distribution {
                info!("scholarship {}%: {} programs", pct, count);
            }
        }
    };
    Ok(())
}

/// Read all roster files upfront. The first one is required; any later roster that
/// cannot be read is skipped so the pipeline can run with a subset of years.
fn into_read(file_paths: Vec<PathBuf>) -> anyhow::Result<impl Iterator<Item = impl std::io::Read>> {
    let mut sources = Vec::new();
    for (index, path) in file_paths.iter().enumerate() {
        match std::fs::read(path) {
            Ok(data) => sources.push(data),
            Err(err) if index > 0 => {
                info!("skipping master roster at '{}': {}", path.display(), err);
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Could not read from CSV file at '{}'", path.display())
                });
            }
        }
    }
    Ok(sources.into_iter().map(std::io::Cursor::new))
}
