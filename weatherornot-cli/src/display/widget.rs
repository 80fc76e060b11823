//! Widget-style rendering: current conditions, hourly and daily forecasts,
//! each in a rounded bordered box.

use chrono::{Local, Timelike};
use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;
use weatherornot_core::model::{Units, WeatherData};

use super::charts::sparkline;
use super::{icons, is_night, title_case};

pub struct WidgetDisplay {
    use_colors: bool,
    units: Units,
}

impl WidgetDisplay {
    pub fn new(use_colors: bool, units: Units) -> Self {
        Self { use_colors, units }
    }

    pub fn render(
        &self,
        data: &WeatherData,
        show_location: bool,
        hours: usize,
        days: usize,
    ) -> String {
        let mut out = String::new();

        if show_location {
            out.push_str(&self.render_location_header(data));
            out.push_str("\n\n");
        }

        out.push_str(&self.render_current(data));
        out.push_str("\n\n");

        if hours > 0 && !data.hourly.is_empty() {
            out.push_str(&self.render_hourly(data, hours));
            out.push_str("\n\n");
        }

        if days > 0 && !data.daily.is_empty() {
            out.push_str(&self.render_daily(data, days));
            out.push('\n');
        }

        out
    }

    fn render_location_header(&self, data: &WeatherData) -> String {
        format!("  {}", self.paint(&data.location.label(), Color::BrightBlue, true))
    }

    fn render_current(&self, data: &WeatherData) -> String {
        let night = is_night(Local::now().hour());
        let emoji = icons::glyph(data.current.condition_code, night);
        let temp = self.units.temp_suffix();
        let wind = self.units.wind_suffix();

        let mut content = String::new();
        content.push_str(&format!("{emoji}  {}\n\n", title_case(&data.current.condition)));
        content.push_str(&format!(
            "Temperature:  {:.1}{temp} (feels like {:.1}{temp})\n",
            data.current.temperature, data.current.feels_like
        ));
        content.push_str(&format!("Humidity:     {}%\n", data.current.humidity));
        content.push_str(&format!("Wind:         {:.1} {wind}\n", data.current.wind_speed));
        content.push_str(&format!("Pressure:     {} hPa\n", data.current.pressure_hpa));
        content.push_str(&format!("Clouds:       {}%\n", data.current.cloud_cover));
        content.push_str(&format!(
            "Visibility:   {:.1} km",
            f64::from(data.current.visibility_m) / 1000.0
        ));

        self.render_box("Current Weather", &content, Color::BrightCyan)
    }

    fn render_hourly(&self, data: &WeatherData, hours: usize) -> String {
        let temp = self.units.temp_suffix();
        let shown = hours.min(data.hourly.len());

        let mut content = String::new();
        for (i, hour) in data.hourly.iter().take(shown).enumerate() {
            if i > 0 {
                content.push('\n');
            }
            content.push_str(&format!(
                "{}  {}  {:.1}{temp}  {}",
                hour.time.with_timezone(&Local).format("%H:%M"),
                icons::glyph(hour.condition_code, false),
                hour.temperature,
                title_case(&hour.condition),
            ));
        }

        let temps: Vec<f64> = data
            .hourly
            .iter()
            .take(shown)
            .map(|h| h.temperature)
            .collect();
        content.push_str(&format!("\n\nTrend: {}", sparkline(&temps)));

        self.render_box("Hourly Forecast", &content, Color::BrightYellow)
    }

    fn render_daily(&self, data: &WeatherData, days: usize) -> String {
        let temp = self.units.temp_suffix();
        let shown = days.min(data.daily.len());

        let mut content = String::new();
        for (i, day) in data.daily.iter().take(shown).enumerate() {
            if i > 0 {
                content.push('\n');
            }
            content.push_str(&format!(
                "{}  {}  {:.0}{temp} / {:.0}{temp}  {}",
                day.date.format("%a, %b %d"),
                icons::glyph(day.condition_code, false),
                day.temp_max,
                day.temp_min,
                title_case(&day.condition),
            ));
        }

        self.render_box(&format!("{shown}-Day Forecast"), &content, Color::BrightMagenta)
    }

    /// Rounded-border box with one blank row and two columns of padding,
    /// title above the frame.
    fn render_box(&self, title: &str, content: &str, color: Color) -> String {
        let lines: Vec<&str> = content.lines().collect();
        // Display width, not char count: emoji glyphs occupy two columns.
        let inner = lines.iter().map(|l| l.width()).max().unwrap_or(0);

        let vertical = self.paint("│", color, false);
        let blank = format!("{vertical}{}{vertical}", " ".repeat(inner + 4));

        let mut out = String::new();
        out.push_str(&format!(" {}\n", self.paint(title, color, true)));
        out.push_str(&self.paint(&format!("╭{}╮", "─".repeat(inner + 4)), color, false));
        out.push('\n');
        out.push_str(&blank);
        out.push('\n');

        for line in &lines {
            let pad = inner - line.width();
            out.push_str(&format!("{vertical}  {line}{}  {vertical}\n", " ".repeat(pad)));
        }

        out.push_str(&blank);
        out.push('\n');
        out.push_str(&self.paint(&format!("╰{}╯", "─".repeat(inner + 4)), color, false));
        out
    }

    fn paint(&self, text: &str, color: Color, bold: bool) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        let colored = text.color(color);
        if bold {
            colored.bold().to_string()
        } else {
            colored.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use weatherornot_core::model::{
        CurrentWeather, DailyForecast, HourlyForecast, Location,
    };

    fn sample_data() -> WeatherData {
        let now = Utc::now();
        WeatherData {
            location: Location {
                name: "New York".to_string(),
                country: "US".to_string(),
                latitude: 40.7,
                longitude: -74.0,
                timezone: "UTC-4".to_string(),
            },
            current: CurrentWeather {
                temperature: 72.5,
                feels_like: 73.1,
                humidity: 64,
                pressure_hpa: 1015,
                wind_speed: 8.1,
                wind_degree: 240,
                visibility_m: 10000,
                cloud_cover: 75,
                condition: "broken clouds".to_string(),
                condition_code: 803,
                icon: "04d".to_string(),
                sunrise: now,
                sunset: now,
                observation_time: now,
            },
            hourly: vec![HourlyForecast {
                time: now,
                temperature: 71.0,
                feels_like: 71.0,
                humidity: 60,
                wind_speed: 7.0,
                condition: "scattered clouds".to_string(),
                condition_code: 802,
                icon: "03d".to_string(),
                precip_chance: 10,
            }],
            daily: vec![DailyForecast {
                date: NaiveDate::from_ymd_opt(2026, 8, 28).unwrap(),
                temp_max: 78.0,
                temp_min: 64.0,
                humidity: 58,
                wind_speed: 6.5,
                condition: "light rain".to_string(),
                condition_code: 500,
                icon: "10d".to_string(),
                precip_chance: 40,
            }],
        }
    }

    #[test]
    fn render_contains_all_sections() {
        let out = WidgetDisplay::new(false, Units::Imperial).render(&sample_data(), true, 12, 5);

        assert!(out.contains("New York, US"));
        assert!(out.contains("Current Weather"));
        assert!(out.contains("Temperature:  72.5°F (feels like 73.1°F)"));
        assert!(out.contains("Humidity:     64%"));
        assert!(out.contains("Visibility:   10.0 km"));
        assert!(out.contains("Hourly Forecast"));
        assert!(out.contains("Trend:"));
        assert!(out.contains("1-Day Forecast"));
        assert!(out.contains("78°F / 64°F"));
        assert!(out.contains("Light Rain"));
    }

    #[test]
    fn hide_location_suppresses_header() {
        let out = WidgetDisplay::new(false, Units::Imperial).render(&sample_data(), false, 12, 5);
        assert!(!out.contains("New York, US"));
    }

    #[test]
    fn zero_hours_and_days_hide_forecast_boxes() {
        let out = WidgetDisplay::new(false, Units::Imperial).render(&sample_data(), true, 0, 0);
        assert!(!out.contains("Hourly Forecast"));
        assert!(!out.contains("Forecast"));
    }

    #[test]
    fn box_lines_share_one_width() {
        let display = WidgetDisplay::new(false, Units::Metric);
        let boxed = display.render_box("Title", "short\na much longer line", Color::BrightCyan);

        let widths: Vec<usize> = boxed
            .lines()
            .skip(1) // title row
            .map(UnicodeWidthStr::width)
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{widths:?}");
    }

    #[test]
    fn box_alignment_survives_wide_glyphs() {
        let display = WidgetDisplay::new(false, Units::Metric);
        // The emoji row and the plain row must end at the same column.
        let boxed = display.render_box("Title", "☀️  Clear Sky\nHumidity: 64%", Color::BrightCyan);

        let widths: Vec<usize> = boxed
            .lines()
            .skip(1)
            .map(UnicodeWidthStr::width)
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{widths:?}");
    }
}
