use anyhow::Context;
use std::io::Write;
use clap::{Args, Parser, Subcommand};
use inquire::{InquireError, Password, Text};
use wxcheck_core::{
    Config, LocationQuery, UnitSystem, WeatherProvider, check, provider_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wxcheck", version, about = "Current weather for a city, from OpenWeather")]
pub struct Cli {
    /// Defaults to an interactive `check` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store an OpenWeather API key in the config file.
    Configure,

    /// Check current weather. Prompts for locations unless one is given.
    Check(CheckArgs),
}

#[derive(Debug, Default, Args)]
pub struct CheckArgs {
    /// City name, e.g. "San Diego".
    #[arg(long, requires_all = ["region", "country"])]
    pub city: Option<String>,

    /// State or region code, e.g. "CA".
    #[arg(long, requires_all = ["city", "country"])]
    pub region: Option<String>,

    /// Country code, e.g. "US".
    #[arg(long, requires_all = ["city", "region"])]
    pub country: Option<String>,

    /// Units requested from the API: "imperial" or "standard" (Kelvin).
    #[arg(long, value_parser = parse_units)]
    pub units: Option<UnitSystem>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Check(args)) => args.run().await,
            None => CheckArgs::default().run().await,
        }
    }
}

impl CheckArgs {
    async fn run(self) -> anyhow::Result<()> {
        let config = Config::from_environment()?;
        let provider = provider_from_config(&config)?;
        let units = self.units.unwrap_or(config.units);

        tracing::debug!(%units, base_url = %config.base_url, "Starting weather check");

        match self.single_query() {
            Some(query) => println!("{}", check(provider.as_ref(), &query, units).await),
            None => {
                interactive(provider.as_ref(), units, &mut InquirePrompter, &mut std::io::stdout())
                    .await?
            }
        }

        Ok(())
    }

    fn single_query(&self) -> Option<LocationQuery> {
        match (&self.city, &self.region, &self.country) {
            (Some(city), Some(region), Some(country)) => {
                Some(LocationQuery::new(city, region, country))
            }
            _ => None,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = match Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
    {
        Ok(key) => key,
        Err(e) if is_cancel(&e) => return Ok(()),
        Err(e) => return Err(e).context("Failed to read API key"),
    };

    config.set_api_key(key);
    config.credential()?;

    let path = config.save()?;
    println!("API key saved to {}", path.display());

    Ok(())
}

/// Where the interactive loop gets its answers.
trait Prompter {
    /// `None` when the user cancels.
    fn location(&mut self) -> anyhow::Result<Option<LocationQuery>>;

    fn another(&mut self) -> anyhow::Result<bool>;
}

struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn location(&mut self) -> anyhow::Result<Option<LocationQuery>> {
        prompt_query()
    }

    fn another(&mut self) -> anyhow::Result<bool> {
        prompt_continue()
    }
}

async fn interactive<P, W>(
    provider: &dyn WeatherProvider,
    units: UnitSystem,
    prompter: &mut P,
    out: &mut W,
) -> anyhow::Result<()>
where
    P: Prompter,
    W: Write,
{
    while let Some(query) = prompter.location()? {
        writeln!(out)?;
        writeln!(out, "{}", check(provider, &query, units).await)?;
        writeln!(out)?;

        if !prompter.another()? {
            break;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", closing_banner())?;
    writeln!(out)?;

    Ok(())
}

/// `None` when the user cancels a prompt.
fn prompt_query() -> anyhow::Result<Option<LocationQuery>> {
    let prompts = [
        "Enter a city (e.g. San Diego):",
        "Enter a state (e.g. CA):",
        "Enter a country (e.g. US):",
    ];

    let mut answers = Vec::with_capacity(prompts.len());
    for message in prompts {
        match Text::new(message).prompt() {
            Ok(answer) => answers.push(answer),
            Err(e) if is_cancel(&e) => return Ok(None),
            Err(e) => return Err(e).context("Failed to read location"),
        }
    }

    let [city, region, country]: [String; 3] = answers
        .try_into()
        .map_err(|_| anyhow::anyhow!("Expected three location answers"))?;

    Ok(Some(LocationQuery::new(city, region, country)))
}

fn prompt_continue() -> anyhow::Result<bool> {
    match Text::new("Would you like to check the weather for another location?")
        .with_help_message("Enter Y to continue, any other key to exit")
        .prompt()
    {
        Ok(answer) => Ok(wants_another(&answer)),
        Err(e) if is_cancel(&e) => Ok(false),
        Err(e) => Err(e).context("Failed to read answer"),
    }
}

fn wants_another(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

fn is_cancel(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

fn closing_banner() -> String {
    let rule = "-".repeat(25);
    format!("{rule}\nWeather check complete!\n{rule}")
}

fn parse_units(value: &str) -> Result<UnitSystem, String> {
    UnitSystem::try_from(value).map_err(|e| e.to_string())
}
