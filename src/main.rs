mod cli;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use skycast_core::Config;
use skycast_dashboard::{render, Dashboard, RenderOptions};
use skycast_weather::{IpLocator, WeatherProvider};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match Config::load_validated(cli.config.as_deref()) {
        Ok((config, validation)) => {
            skycast_core::init(&config.logging.level)?;
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
            config
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Some(units) = cli.units {
        config.weather.units = units;
    }

    let provider = match WeatherProvider::new(&config.weather) {
        Ok(provider) => provider,
        Err(e) => {
            tracing::error!("Failed to create weather client: {}", e);
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };
    let locator = match IpLocator::new(&config.location.lookup_url) {
        Ok(locator) => locator,
        Err(e) => {
            tracing::error!("Failed to create location client: {}", e);
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut dashboard = Dashboard::new(provider, locator);
    let options = RenderOptions {
        units: dashboard.units(),
        icon_base_url: config.weather.icon_base_url.clone(),
    };

    tracing::info!("Skycast started (units: {})", options.units.as_query());

    if cli.here {
        dashboard.use_current_location();
    } else {
        let location = cli
            .location
            .as_deref()
            .unwrap_or(&config.weather.default_location);
        if !dashboard.submit(location) {
            tracing::warn!("No initial location to load");
        }
    }
    dashboard.settle().await;
    print!("{}", render(dashboard.model(), &options));

    if cli.interactive {
        run_interactive(&mut dashboard, &options).await?;
    }

    Ok(ExitCode::SUCCESS)
}

async fn run_interactive(dashboard: &mut Dashboard, options: &RenderOptions) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\nLocation (:here, :quit)> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Command::parse(&line) {
            Command::Skip => continue,
            Command::Quit => break,
            Command::Here => dashboard.use_current_location(),
            Command::Search(text) => {
                dashboard.submit(text);
            }
        }

        dashboard.settle().await;
        print!("{}", render(dashboard.model(), options));
    }

    tracing::info!("Skycast exiting");
    Ok(())
}
