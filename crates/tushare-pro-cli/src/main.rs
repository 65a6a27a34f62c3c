/*
[INPUT]:  CLI arguments, YAML configuration file, TUSHARE_TOKEN
[OUTPUT]: One query result rendered to stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or the query flow
*/

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tushare_pro_adapter::{AsyncDataApi, ClientConfig, Query};
use tushare_pro_cli::config::TOKEN_ENV;
use tushare_pro_cli::{CliConfig, OutputFormat, parse_param, render};

#[derive(Parser, Debug)]
#[command(name = "tushare-pro", version, about = "Tushare Pro data query client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "token", value_name = "TOKEN")]
    token: Option<String>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Query one endpoint and print the result table
    Query(QueryArgs),
}

#[derive(Args, Debug)]
struct QueryArgs {
    /// Endpoint name, e.g. stock_basic or daily
    api_name: String,
    /// Comma-delimited columns to return (all when empty)
    #[arg(long, default_value = "")]
    fields: String,
    /// Endpoint parameter, `key=value` or `key:=json`
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    params: Vec<(String, Value)>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    /// Print the request envelope without sending it
    #[arg(long = "dry-run")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = CliConfig::load(args.config_path.as_deref()).context("load config")?;
    let env_token = std::env::var(TOKEN_ENV).ok();
    let token = config.resolve_token(args.token.as_deref(), env_token.as_deref())?;
    let client_config = config.client_config()?;
    debug!(base_url = %client_config.base_url, timeout = ?client_config.timeout, "configuration loaded");

    match args.command {
        Command::Query(query_args) => run_query(token, client_config, query_args).await,
    }
}

async fn run_query(
    token: String,
    client_config: ClientConfig,
    args: QueryArgs,
) -> Result<()> {
    let query = args
        .params
        .into_iter()
        .fold(Query::new(args.api_name).fields(args.fields), |query, (key, value)| {
            query.param(key, value)
        });

    if args.dry_run {
        let envelope = query.to_envelope("<redacted>");
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    let api_name = query.api_name().to_string();
    let api = AsyncDataApi::with_config(token, client_config).context("create client")?;
    let table = api
        .scope(|api| Box::pin(async move { api.execute(&query).await }))
        .await
        .with_context(|| format!("query {api_name}"))?;
    info!(rows = table.len(), columns = table.width(), "query finished");

    let rendered = render(&table, args.format)?;
    println!("{}", rendered.trim_end_matches('\n'));
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}
