use anyhow::{Context, Result};
use clap::Parser;
use orbit_map::{orbit, CliArgs, Question};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let orbit_map = orbit::read_orbits(&args.file).with_context(|| {
        format!(
            "Failed to read orbit map from given file({}).",
            args.file.display()
        )
    })?;

    let answer = match args.question {
        Question::A => orbit_map.count_orbits(),
        Question::B => orbit_map
            .transfers_between(&args.from, &args.to)
            .with_context(|| {
                format!(
                    "Failed to count orbital transfers from {} to {}.",
                    args.from, args.to
                )
            })?,
    };
    println!("{}", answer);

    Ok(())
}
