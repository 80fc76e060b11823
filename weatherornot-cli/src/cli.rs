use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};

use weatherornot_core::{
    Client, Config,
    location::{self, LocationQuery},
    model::{DisplayMode, Units},
};

use crate::display::{charts::ChartDisplay, neofetch::NeofetchDisplay, widget::WidgetDisplay};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weatherornot",
    version,
    about = "A terminal weather forecast tool",
    long_about = "weatherornot displays current conditions, hourly forecasts and daily \
                  forecasts in the terminal.\n\n\
                  Location can be specified as:\n  \
                  - ZIP code: 10001 or 10001,US\n  \
                  - City: \"San Francisco\", \"San Francisco,CA\" or \"San Francisco,CA,US\"\n  \
                  - Coordinates: \"37.7749,-122.4194\"\n  \
                  - Favorite: use -f/--favorite\n\n\
                  With no location argument, default_location from the config is used.",
    after_help = "Examples:\n  \
                  weatherornot 90210\n  \
                  weatherornot \"New York,NY\"\n  \
                  weatherornot \"40.7128,-74.0060\"\n  \
                  weatherornot -f home\n  \
                  weatherornot --mode neofetch \"London,GB\""
)]
pub struct Cli {
    /// Location: ZIP code, city name, or "lat,lon" coordinates.
    pub location: Option<String>,

    /// Display mode: "widget" or "neofetch" (default from config).
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Units: "metric", "imperial" or "standard" (default from config).
    #[arg(short, long)]
    pub units: Option<String>,

    /// Use a favorite location from config.
    #[arg(short, long)]
    pub favorite: Option<String>,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Skip the hourly temperature chart.
    #[arg(long)]
    pub no_graph: bool,

    /// Number of hourly forecast entries to show.
    #[arg(long, default_value_t = 12)]
    pub hours: usize,

    /// Number of daily forecast entries to show.
    #[arg(long, default_value_t = 5)]
    pub days: usize,

    /// Hide the location name in the output.
    #[arg(long)]
    pub hide_location: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// View and manage the configuration file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Initialize the configuration file interactively.
    Init,

    /// Set a configuration value.
    Set {
        /// One of: api_key, default_location, units, display_mode, show_colors.
        key: String,
        value: String,
    },

    /// Show the current configuration.
    Show,

    /// Show the configuration file path.
    Path,

    /// Manage favorite locations.
    #[command(subcommand)]
    Favorite(FavoriteCommand),
}

#[derive(Debug, Subcommand)]
pub enum FavoriteCommand {
    /// Add a favorite location.
    Add { name: String, location: String },

    /// Remove a favorite location.
    Remove { name: String },

    /// List all favorite locations.
    List,
}

impl Cli {
    pub async fn run(mut self) -> Result<()> {
        if let Some(Command::Config(cmd)) = self.command.take() {
            return run_config(cmd);
        }
        self.run_weather().await
    }

    async fn run_weather(&self) -> Result<()> {
        let mut cfg = Config::load()?;

        if cfg.api_key.is_empty() {
            bail!(
                "No API key configured.\n\
                 Hint: run `weatherornot config init` or `weatherornot config set api_key <key>` first."
            );
        }

        // Priority: explicit favorite, then the positional argument, then the
        // configured default.
        let raw = if let Some(name) = &self.favorite {
            cfg.favorite(name)
                .ok_or_else(|| anyhow!("Favorite '{name}' not found"))?
                .to_string()
        } else if let Some(location) = &self.location {
            location.clone()
        } else if !cfg.default_location.is_empty() {
            cfg.default_location.clone()
        } else {
            bail!(
                "No location specified and no default location configured.\n\
                 Hint: pass a location argument or run \
                 `weatherornot config set default_location <location>`."
            );
        };

        let query = location::classify(&raw).context("Failed to parse location")?;

        // Command-line flags override the stored config for this run.
        if let Some(units) = &self.units {
            cfg.units = Units::try_from(units.as_str())?;
        }
        if let Some(mode) = &self.mode {
            cfg.display_mode = DisplayMode::try_from(mode.as_str())?;
        }
        if self.no_color {
            cfg.show_colors = false;
        }

        let client = Client::new(cfg.api_key.clone(), cfg.units)?;

        let data = match &query {
            LocationQuery::PostalCode { code, country_code } => {
                client.weather_by_zip(code, country_code).await
            }
            LocationQuery::CityName {
                city,
                state,
                country,
            } => {
                client
                    .weather_by_city(city, state.as_deref(), country.as_deref())
                    .await
            }
            LocationQuery::Coordinates {
                latitude,
                longitude,
            } => client.weather_by_coords(*latitude, *longitude).await,
        }
        .with_context(|| format!("Failed to fetch weather data for {query}"))?;

        let show_location = !self.hide_location;

        match cfg.display_mode {
            DisplayMode::Neofetch => {
                let renderer = NeofetchDisplay::new(cfg.show_colors, cfg.units);
                print!("{}", renderer.render(&data, show_location));
            }
            DisplayMode::Widget => {
                let renderer = WidgetDisplay::new(cfg.show_colors, cfg.units);
                print!(
                    "{}",
                    renderer.render(&data, show_location, self.hours, self.days)
                );
            }
        }

        if !self.no_graph {
            let charts = ChartDisplay::new(cfg.units);

            let trend = charts.render_hourly_temp_chart(&data, self.hours);
            if !trend.is_empty() {
                println!("{trend}");
            }

            let ranges = charts.render_daily_temp_range(&data, self.days);
            if !ranges.is_empty() {
                println!("{ranges}");
            }
        }

        Ok(())
    }
}

fn run_config(cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Init => {
            let mut cfg = Config::load()?;

            cfg.api_key = inquire::Text::new("OpenWeatherMap API key:")
                .prompt()
                .context("Failed to read API key")?;

            cfg.default_location = inquire::Text::new("Default location:")
                .with_help_message("e.g. 10001 or San Francisco,CA; leave empty for none")
                .prompt()
                .context("Failed to read default location")?;

            cfg.save()?;
            println!(
                "Configuration file created at: {}",
                Config::config_file_path()?.display()
            );
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = Config::load()?;
            cfg.set(&key, &value)?;
            cfg.save()?;
            println!("Set {key} = {value}");
        }

        ConfigCommand::Show => {
            let cfg = Config::load()?;

            println!("API Key:          {}", mask_api_key(&cfg.api_key));
            println!("Default Location: {}", cfg.default_location);
            println!("Units:            {}", cfg.units);
            println!("Display Mode:     {}", cfg.display_mode);
            println!("Show Colors:      {}", cfg.show_colors);

            if !cfg.favorites.is_empty() {
                println!("\nFavorites:");
                let mut names: Vec<&String> = cfg.favorites.keys().collect();
                names.sort();
                for name in names {
                    println!("  {name}: {}", cfg.favorites[name]);
                }
            }
        }

        ConfigCommand::Path => {
            println!("{}", Config::config_file_path()?.display());
        }

        ConfigCommand::Favorite(cmd) => run_favorite(cmd)?,
    }

    Ok(())
}

fn run_favorite(cmd: FavoriteCommand) -> Result<()> {
    match cmd {
        FavoriteCommand::Add { name, location } => {
            let mut cfg = Config::load()?;
            cfg.add_favorite(name.clone(), location.clone());
            cfg.save()?;
            println!("Added favorite: {name} = {location}");
        }

        FavoriteCommand::Remove { name } => {
            let mut cfg = Config::load()?;
            cfg.remove_favorite(&name)?;
            cfg.save()?;
            println!("Removed favorite: {name}");
        }

        FavoriteCommand::List => {
            let cfg = Config::load()?;

            if cfg.favorites.is_empty() {
                println!("No favorites configured");
                return Ok(());
            }

            println!("Favorite Locations:");
            let mut names: Vec<&String> = cfg.favorites.keys().collect();
            names.sort();
            for name in names {
                println!("  {name}: {}", cfg.favorites[name]);
            }
        }
    }

    Ok(())
}

/// Keep the first and last four characters, star out the middle.
fn mask_api_key(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 8))
}
