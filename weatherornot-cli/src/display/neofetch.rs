//! Neofetch-style rendering: condition art on the left, labeled stats on the
//! right.

use chrono::{Local, Timelike};
use colored::{Color, Colorize};
use weatherornot_core::model::{Units, WeatherData};

use super::{icons, is_night, title_case};

pub struct NeofetchDisplay {
    use_colors: bool,
    units: Units,
}

impl NeofetchDisplay {
    pub fn new(use_colors: bool, units: Units) -> Self {
        Self { use_colors, units }
    }

    pub fn render(&self, data: &WeatherData, show_location: bool) -> String {
        let night = is_night(Local::now().hour());
        let art = icons::ascii_art(data.current.condition_code, night);
        let info = self.info_lines(data, show_location);

        let mut out = String::new();
        for i in 0..art.len().max(info.len()) {
            let art_line = match art.get(i) {
                Some(line) => (*line).to_string(),
                None => " ".repeat(icons::ART_WIDTH),
            };

            out.push_str(&art_line);
            out.push_str("  ");
            if let Some(info_line) = info.get(i) {
                out.push_str(info_line);
            }
            out.push('\n');
        }

        out
    }

    fn info_lines(&self, data: &WeatherData, show_location: bool) -> Vec<String> {
        let temp = self.units.temp_suffix();
        let wind = self.units.wind_suffix();
        let current = &data.current;

        let mut lines = Vec::new();

        if show_location {
            let label = data.location.label();
            let underline = "-".repeat(label.chars().count());
            lines.push(self.colorize(&label, Color::Cyan, true));
            lines.push(self.colorize(&underline, Color::Cyan, false));
        }

        let mut stat = |name: &str, value: String| {
            lines.push(format!("{} {value}", self.colorize(name, Color::Blue, true)));
        };

        stat("Weather:", title_case(&current.condition));
        stat("Temp:", format!("{:.1}{temp}", current.temperature));
        stat("Feels like:", format!("{:.1}{temp}", current.feels_like));
        stat("Humidity:", format!("{}%", current.humidity));
        stat("Wind:", format!("{:.1} {wind}", current.wind_speed));
        stat("Pressure:", format!("{} hPa", current.pressure_hpa));
        stat(
            "Visibility:",
            format!("{:.1} km", f64::from(current.visibility_m) / 1000.0),
        );
        stat("Clouds:", format!("{}%", current.cloud_cover));

        lines
    }

    fn colorize(&self, text: &str, color: Color, bold: bool) -> String {
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
