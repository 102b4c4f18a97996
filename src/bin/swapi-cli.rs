use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "swapi-cli")]
#[command(about = "Query a running SWAPI gateway", long_about = None)]
struct Cli {
    #[arg(short, long, env = "SWAPI_GATEWAY_URL", default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a resource collection by name
    Search { resource: String, name: String },
    /// List one page of a resource collection
    List {
        resource: String,
        #[arg(short, long, default_value_t = 1)]
        page: u64,
    },
    /// Fetch a single entity by id
    Get { resource: String, id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match &cli.command {
        Commands::Search { resource, name } => client
            .get(format!("{}/api/{}/search", base, resource))
            .query(&[("name", name)]),
        Commands::List { resource, page } => client
            .get(format!("{}/api/pagination/{}", base, resource))
            .query(&[("page", page)]),
        Commands::Get { resource, id } => client.get(format!("{}/api/{}/{}", base, resource, id)),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if !status.is_success() {
        eprintln!("{}", rendered);
        return Err(format!("gateway returned status {}", status).into());
    }

    println!("{}", rendered);
    Ok(())
}
