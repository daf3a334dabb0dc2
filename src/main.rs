use anyhow::Result;
use clap::Parser;
use log::error;
use pvx::application::{self, FetchOptions};
use pvx::playvox::{Credentials, Playvox};

/// pvx - Playvox API data fetcher
///
/// Fetch paginated resources from the Playvox REST API.
///
/// Credentials can be passed as flags or via the PVX_DOMAIN, PVX_API_KEY and
/// PVX_API_SECRET environment variables.
///
/// Examples:
///   pvx fetch users                  # First page of the users resource
///   pvx fetch evaluations --page 2   # Second page
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Playvox workspace subdomain, as in https://{domain}.playvox.com
    #[arg(long, env = "PVX_DOMAIN", value_name = "DOMAIN", global = true)]
    pub domain: Option<String>,

    /// API key id
    #[arg(long, env = "PVX_API_KEY", value_name = "KEY", global = true)]
    pub api_key: Option<String>,

    /// API key secret
    #[arg(
        long,
        env = "PVX_API_SECRET",
        value_name = "SECRET",
        global = true,
        hide_env_values = true
    )]
    pub api_secret: Option<String>,

    /// API base URL (defaults to https://{domain}.playvox.com/api/v1)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch one page of a resource and print it as JSON
    Fetch(FetchArgs),
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    /// Endpoint path below the API root, e.g. "users"
    #[arg(value_name = "ENDPOINT")]
    pub endpoint: String,

    /// Resource name used in logs and errors (defaults to the endpoint)
    #[arg(long, value_name = "NAME")]
    pub resource: Option<String>,

    /// 1-based page number
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub page: u32,

    /// Free-text filter forwarded as the `query` parameter
    #[arg(long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Page size (defaults to 2000)
    #[arg(long = "per-page", value_name = "N")]
    pub per_page: Option<u32>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let credentials = Credentials::new(cli.domain, cli.api_key, cli.api_secret)?;
    let client = reqwest::Client::builder().user_agent("pvx-cli").build()?;

    let mut api = Playvox::new(client, credentials);
    if let Some(url) = cli.api_url {
        api = api.with_api_url(url);
    }

    match cli.command {
        Commands::Fetch(args) => {
            if let Some(per_page) = args.per_page {
                api = api.with_per_page(per_page);
            }
            let options = FetchOptions {
                endpoint: args.endpoint,
                resource: args.resource,
                page: args.page,
                query: args.query,
            };
            let value = application::fetch_page(&api, &options).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}
