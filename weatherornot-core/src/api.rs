//! OpenWeatherMap HTTP client.
//!
//! Every lookup fetches current conditions first, then the 5-day/3-hour
//! forecast using the coordinates echoed back by the current-conditions
//! response, and merges both into a single [`WeatherData`].

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::model::{
    CurrentWeather, DailyForecast, HourlyForecast, Location, Units, WeatherData,
};

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Forecast entries arrive in 3-hour steps; 16 of them cover 48 hours.
const MAX_HOURLY_ENTRIES: usize = 16;
const MAX_DAILY_ENTRIES: usize = 5;

#[derive(Debug, Clone)]
pub struct Client {
    api_key: String,
    units: Units,
    http: reqwest::Client,
}

impl Client {
    pub fn new(api_key: String, units: Units) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to construct HTTP client")?;

        Ok(Self {
            api_key,
            units,
            http,
        })
    }

    /// Fetch weather by postal code and 2-letter country code.
    pub async fn weather_by_zip(&self, zip: &str, country_code: &str) -> Result<WeatherData> {
        let query = format!("{zip},{country_code}");
        self.fetch(&[("zip".to_string(), query)]).await
    }

    /// Fetch weather by city name with optional state and country.
    pub async fn weather_by_city(
        &self,
        city: &str,
        state: Option<&str>,
        country: Option<&str>,
    ) -> Result<WeatherData> {
        let mut query = city.to_string();
        if let Some(state) = state {
            query.push(',');
            query.push_str(state);
        }
        if let Some(country) = country {
            query.push(',');
            query.push_str(country);
        }

        self.fetch(&[("q".to_string(), query)]).await
    }

    /// Fetch weather by geographic coordinates.
    pub async fn weather_by_coords(&self, latitude: f64, longitude: f64) -> Result<WeatherData> {
        self.fetch(&[
            ("lat".to_string(), latitude.to_string()),
            ("lon".to_string(), longitude.to_string()),
        ])
        .await
    }

    async fn fetch(&self, params: &[(String, String)]) -> Result<WeatherData> {
        let current = self.fetch_current(params).await?;
        let (location, current) = parse_current(current);

        let forecast = self
            .fetch_forecast(location.latitude, location.longitude)
            .await?;
        let (hourly, daily) = parse_forecast(forecast);

        Ok(WeatherData {
            location,
            current,
            hourly,
            daily,
        })
    }

    async fn fetch_current(&self, params: &[(String, String)]) -> Result<OwCurrentResponse> {
        let url = format!("{BASE_URL}/weather");

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str()), ("units", self.units.as_str())])
            .send()
            .await
            .context("Failed to send request to OpenWeatherMap (current weather)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read current weather response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Current weather request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).context("Failed to parse current weather JSON")
    }

    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<OwForecastResponse> {
        let url = format!("{BASE_URL}/forecast");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", self.units.as_str().to_string()),
            ])
            .send()
            .await
            .context("Failed to send request to OpenWeatherMap (forecast)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).context("Failed to parse forecast JSON")
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u16,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: u32,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: u16,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
    #[serde(default)]
    sunrise: i64,
    #[serde(default)]
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    coord: OwCoord,
    weather: Vec<OwWeather>,
    main: OwMain,
    #[serde(default)]
    visibility: u32,
    wind: OwWind,
    clouds: OwClouds,
    dt: i64,
    sys: OwSys,
    timezone: i32,
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    pop: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn condition_of(weather: &[OwWeather]) -> (String, u16, String) {
    weather
        .first()
        .map(|w| (w.description.clone(), w.id, w.icon.clone()))
        .unwrap_or_else(|| ("Unknown".to_string(), 0, String::new()))
}

fn parse_current(resp: OwCurrentResponse) -> (Location, CurrentWeather) {
    let (condition, condition_code, icon) = condition_of(&resp.weather);

    let location = Location {
        name: resp.name,
        country: resp.sys.country,
        latitude: resp.coord.lat,
        longitude: resp.coord.lon,
        timezone: format!("UTC{:+}", resp.timezone / 3600),
    };

    let current = CurrentWeather {
        temperature: resp.main.temp,
        feels_like: resp.main.feels_like,
        humidity: resp.main.humidity,
        pressure_hpa: resp.main.pressure,
        wind_speed: resp.wind.speed,
        wind_degree: resp.wind.deg,
        visibility_m: resp.visibility,
        cloud_cover: resp.clouds.all,
        condition,
        condition_code,
        icon,
        sunrise: unix_to_utc(resp.sys.sunrise),
        sunset: unix_to_utc(resp.sys.sunset),
        observation_time: unix_to_utc(resp.dt),
    };

    (location, current)
}

fn parse_forecast(resp: OwForecastResponse) -> (Vec<HourlyForecast>, Vec<DailyForecast>) {
    let hourly = resp
        .list
        .iter()
        .take(MAX_HOURLY_ENTRIES)
        .map(|entry| {
            let (condition, condition_code, icon) = condition_of(&entry.weather);
            HourlyForecast {
                time: unix_to_utc(entry.dt),
                temperature: entry.main.temp,
                feels_like: entry.main.feels_like,
                humidity: entry.main.humidity,
                wind_speed: entry.wind.speed,
                condition,
                condition_code,
                icon,
                precip_chance: pop_to_percent(entry.pop),
            }
        })
        .collect();

    // Aggregate 3-hour steps into calendar days. BTreeMap keeps dates sorted.
    let mut by_day: BTreeMap<NaiveDate, DailyForecast> = BTreeMap::new();

    for entry in &resp.list {
        let date = unix_to_utc(entry.dt).date_naive();
        let precip_chance = pop_to_percent(entry.pop);

        match by_day.get_mut(&date) {
            Some(day) => {
                day.temp_max = day.temp_max.max(entry.main.temp_max);
                day.temp_min = day.temp_min.min(entry.main.temp_min);
                day.precip_chance = day.precip_chance.max(precip_chance);
            }
            None => {
                let (condition, condition_code, icon) = condition_of(&entry.weather);
                by_day.insert(
                    date,
                    DailyForecast {
                        date,
                        temp_max: entry.main.temp_max,
                        temp_min: entry.main.temp_min,
                        humidity: entry.main.humidity,
                        wind_speed: entry.wind.speed,
                        condition,
                        condition_code,
                        icon,
                        precip_chance,
                    },
                );
            }
        }
    }

    let mut daily: Vec<DailyForecast> = by_day.into_values().collect();
    daily.truncate(MAX_DAILY_ENTRIES);

    (hourly, daily)
}

fn pop_to_percent(pop: f64) -> u8 {
    (pop.clamp(0.0, 1.0) * 100.0) as u8
}

fn unix_to_utc(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap_or_else(Utc::now)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Cut on a char boundary; error bodies are not guaranteed to be ASCII.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
