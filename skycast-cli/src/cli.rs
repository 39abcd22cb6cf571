use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{Password, Select, Text};

use skycast_core::{Config, Dashboard, Event, FileStore, WeatherClient};

use crate::locator::IpLocator;
use crate::view::TerminalView;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather dashboard for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key used by the other commands.
    Configure,

    /// Show current conditions and the 5-day outlook for a city, then exit.
    Show {
        /// City name, e.g. "London".
        city: String,
    },

    /// Open the interactive dashboard.
    Dashboard,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => {
                let mut dashboard = build_dashboard()?;
                dashboard.handle(Event::Search(city)).await;
                Ok(())
            }
            Command::Dashboard => run_dashboard().await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:").without_confirmation().prompt()?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn build_dashboard() -> Result<Dashboard<FileStore, IpLocator, TerminalView>> {
    let config = Config::load()?;
    let client = WeatherClient::new(config.api_key()?.to_string());
    let store = FileStore::open()?;

    Ok(Dashboard::new(client, store, IpLocator::new(), TerminalView::new()))
}

const SEARCH: &str = "Search city";
const MY_LOCATION: &str = "Use my location";
const FAVORITE: &str = "Add to favorites";
const UNFAVORITE: &str = "Remove from favorites";
const OPEN_FAVORITE: &str = "Open a favorite";
const REMOVE_FAVORITE: &str = "Remove a favorite";
const TOGGLE_UNIT: &str = "Toggle \u{b0}C/\u{b0}F";
const TOGGLE_THEME: &str = "Toggle light/dark theme";
const QUIT: &str = "Quit";

async fn run_dashboard() -> Result<()> {
    let mut dashboard = build_dashboard()?;
    dashboard.start().await;

    loop {
        let mut actions = vec![SEARCH, MY_LOCATION];
        if dashboard.has_weather() {
            actions.push(if dashboard.is_current_favorite() { UNFAVORITE } else { FAVORITE });
        }
        if !dashboard.favorites().is_empty() {
            actions.push(OPEN_FAVORITE);
            actions.push(REMOVE_FAVORITE);
        }
        actions.extend([TOGGLE_UNIT, TOGGLE_THEME, QUIT]);

        match Select::new("What next?", actions).prompt()? {
            SEARCH => {
                let city = Text::new("City:").prompt()?;
                dashboard.handle(Event::Search(city)).await;
            }
            MY_LOCATION => dashboard.handle(Event::UseGeolocation).await,
            FAVORITE | UNFAVORITE => dashboard.handle(Event::ToggleFavorite).await,
            OPEN_FAVORITE => {
                let city = Select::new("Open favorite:", dashboard.favorites().to_vec()).prompt()?;
                dashboard.handle(Event::SelectFavorite(city)).await;
            }
            REMOVE_FAVORITE => {
                let city =
                    Select::new("Remove favorite:", dashboard.favorites().to_vec()).prompt()?;
                dashboard.handle(Event::RemoveFavorite(city)).await;
            }
            TOGGLE_UNIT => dashboard.handle(Event::ToggleUnit).await,
            TOGGLE_THEME => dashboard.handle(Event::ToggleTheme).await,
            QUIT => return Ok(()),
            _ => {}
        }
    }
}
