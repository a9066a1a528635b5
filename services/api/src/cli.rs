use crate::server;
use clap::{Args, Parser, Subcommand};
use mentoria::config::AppConfig;
use mentoria::error::AppError;
use mentoria::workflows::mentorship::{mask_phone, HttpFormService};

#[derive(Parser, Debug)]
#[command(
    name = "Mentoria",
    about = "Serve the mentorship landing page and exercise its form helpers from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print a phone number the way the form masks it
    Phone(PhoneArgs),
    /// List city suggestions from the configured municipality directory
    Cities(CitiesArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct PhoneArgs {
    /// Raw input, punctuation allowed
    raw: String,
}

#[derive(Args, Debug)]
pub(crate) struct CitiesArgs {
    /// City prefix as typed in the form
    query: String,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Phone(args) => {
            println!("{}", mask_phone(&args.raw));
            Ok(())
        }
        Command::Cities(args) => run_city_lookup(args).await,
    }
}

async fn run_city_lookup(args: CitiesArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = HttpFormService::from_config(&config.mentorship)?;

    let suggestions = service.cities().suggest(&args.query).await;
    if suggestions.is_empty() {
        println!("No suggestions for '{}'", args.query);
    } else {
        for city in suggestions {
            println!("- {city}");
        }
    }

    Ok(())
}
