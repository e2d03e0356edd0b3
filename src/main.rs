use anyhow::Context;
use chrono::Local;
use clap::Parser;
use log::info;
use plugin_details::{
    config::{self, Config},
    fetch::GithubFetcher,
    pipeline,
    report::ReportWriter,
    repos,
};
use std::{fs::File, io::BufWriter, path::PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Newline-delimited list of repository URLs
    #[arg(short, long, default_value = config::DEFAULT_INPUT)]
    input: PathBuf,

    /// Directory the dated CSV report is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// GraphQL endpoint
    #[arg(long, default_value = config::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Repositories per query
    #[arg(long, default_value_t = config::DEFAULT_BATCH_SIZE as u64, value_parser = clap::value_parser!(u64).range(1..=100))]
    batch_size: u64,

    /// Environment variable holding the bearer token
    #[arg(long, default_value = config::DEFAULT_TOKEN_VAR)]
    token_var: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Cli::parse();

    let token = Config::token_from(&args.token_var, |var| std::env::var(var).ok())?;
    let config = Config {
        input: args.input,
        output_dir: args.output_dir,
        endpoint: args.endpoint,
        batch_size: args.batch_size as usize,
        ..Config::new(token)
    };

    let repos = repos::load(&config.input)
        .with_context(|| format!("Failed to read {}", config.input.display()))?;
    info!(
        "Loaded {} repositories from {}",
        repos.len(),
        config.input.display()
    );

    let fetcher = GithubFetcher::new(&config.endpoint, &config.token)?;
    let out_path = config.output_path(Local::now().date_naive());
    let file = File::create(&out_path)
        .with_context(|| format!("Failed to create {}", out_path.display()))?;
    let mut writer = ReportWriter::new(BufWriter::new(file))?;

    let rows = pipeline::run(&repos, config.batch_size, &fetcher, &mut writer).await?;
    writer.flush()?;
    info!("Wrote {rows} rows");

    println!("Done. See {}", out_path.display());
    Ok(())
}
