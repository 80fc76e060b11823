//! ASCII temperature charts: a line plot of the hourly trend and a compact
//! block-character sparkline.

use weatherornot_core::model::{Units, WeatherData};

const PLOT_HEIGHT: usize = 10;

pub struct ChartDisplay {
    units: Units,
}

impl ChartDisplay {
    pub fn new(units: Units) -> Self {
        Self { units }
    }

    /// Line plot of upcoming hourly temperatures, with a min-max footer.
    /// Empty forecast data renders as an empty string.
    pub fn render_hourly_temp_chart(&self, data: &WeatherData, hours: usize) -> String {
        let temps: Vec<f64> = data
            .hourly
            .iter()
            .take(hours)
            .map(|h| h.temperature)
            .collect();
        if temps.is_empty() {
            return String::new();
        }

        let min = temps.iter().copied().fold(f64::INFINITY, f64::min);
        let max = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let suffix = self.units.temp_suffix();

        let mut out = String::from("\n");
        out.push_str(&plot(&temps, PLOT_HEIGHT));
        out.push_str(&format!(
            "\n         Temperature Trend (Next {} Entries)\n",
            temps.len()
        ));
        out.push_str(&format!("Range: {min:.1}{suffix} - {max:.1}{suffix}\n"));
        out
    }

    /// Per-day min/max spread as a proportional block bar: date, low,
    /// bar, high. A 20-degree spread fills the full bar width.
    pub fn render_daily_temp_range(&self, data: &WeatherData, days: usize) -> String {
        let shown = days.min(data.daily.len());
        if shown == 0 {
            return String::new();
        }

        const BAR_WIDTH: f64 = 30.0;
        const FULL_SPREAD: f64 = 20.0;
        let suffix = self.units.temp_suffix();

        let mut out = String::from("\nDaily Temperature Range:\n");
        out.push_str(&"─".repeat(50));
        out.push('\n');

        for day in data.daily.iter().take(shown) {
            let spread = day.temp_max - day.temp_min;
            let blocks = if spread > 0.0 {
                ((spread / FULL_SPREAD) * BAR_WIDTH) as usize
            } else {
                0
            };

            out.push_str(&format!(
                "{}  {:.0}{suffix} {} {:.0}{suffix}\n",
                day.date.format("%a %m/%d"),
                day.temp_min,
                "█".repeat(blocks),
                day.temp_max,
            ));
        }

        out
    }
}

/// Plot a series as a line chart, `height + 1` rows tall, one column per
/// sample, with a value label on every row.
fn plot(series: &[f64], height: usize) -> String {
    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let flat = max <= min;

    // Row 0 is the top of the chart; a sample's level counts up from the
    // bottom, so its row is `height - level`.
    let level = |v: f64| -> usize {
        if flat {
            0
        } else {
            (((v - min) / (max - min)) * height as f64).round() as usize
        }
    };

    let mut grid = vec![vec![' '; series.len()]; height + 1];
    let mut prev = level(series[0]);
    grid[height - prev][0] = '─';

    for (i, &value) in series.iter().enumerate().skip(1) {
        let cur = level(value);

        match cur.cmp(&prev) {
            std::cmp::Ordering::Equal => grid[height - cur][i] = '─',
            std::cmp::Ordering::Greater => {
                // Rising edge: corner at the top, corner at the bottom,
                // vertical run in between.
                grid[height - cur][i] = '╭';
                grid[height - prev][i] = '╯';
                for row in (height - cur + 1)..(height - prev) {
                    grid[row][i] = '│';
                }
            }
            std::cmp::Ordering::Less => {
                grid[height - prev][i] = '╮';
                grid[height - cur][i] = '╰';
                for row in (height - prev + 1)..(height - cur) {
                    grid[row][i] = '│';
                }
            }
        }

        prev = cur;
    }

    let mut out = String::new();
    for (row_idx, row) in grid.iter().enumerate() {
        let label = if flat {
            min
        } else {
            max - row_idx as f64 * (max - min) / height as f64
        };

        let line: String = row.iter().collect();
        out.push_str(&format!("{label:>7.1} ┤{}\n", line.trim_end()));
    }
    out
}

/// One block character per sample, scaled to the series range.
pub fn sparkline(values: &[f64]) -> String {
    const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

    if values.is_empty() {
        return String::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    values
        .iter()
        .map(|&v| {
            let idx = if max > min {
                (((v - min) / (max - min)) * 7.0).round() as usize
            } else {
                0
            };
            BLOCKS[idx.min(7)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use weatherornot_core::model::{CurrentWeather, DailyForecast, HourlyForecast, Location};

    fn data_with_temps(temps: &[f64]) -> WeatherData {
        let now = Utc::now();
        let hourly = temps
            .iter()
            .map(|&t| HourlyForecast {
                time: now,
                temperature: t,
                feels_like: t,
                humidity: 50,
                wind_speed: 3.0,
                condition: "clear sky".to_string(),
                condition_code: 800,
                icon: "01d".to_string(),
                precip_chance: 0,
            })
            .collect();

        WeatherData {
            location: Location {
                name: "Testville".to_string(),
                country: "US".to_string(),
                latitude: 0.0,
                longitude: 0.0,
                timezone: "UTC+0".to_string(),
            },
            current: CurrentWeather {
                temperature: temps.first().copied().unwrap_or(0.0),
                feels_like: 0.0,
                humidity: 50,
                pressure_hpa: 1013,
                wind_speed: 3.0,
                wind_degree: 0,
                visibility_m: 10000,
                cloud_cover: 0,
                condition: "clear sky".to_string(),
                condition_code: 800,
                icon: "01d".to_string(),
                sunrise: now,
                sunset: now,
                observation_time: now,
            },
            hourly,
            daily: Vec::new(),
        }
    }

    fn with_daily(mut data: WeatherData, ranges: &[(f64, f64)]) -> WeatherData {
        data.daily = ranges
            .iter()
            .enumerate()
            .map(|(i, &(temp_min, temp_max))| DailyForecast {
                date: NaiveDate::from_ymd_opt(2026, 8, 28).unwrap() + chrono::Days::new(i as u64),
                temp_max,
                temp_min,
                humidity: 50,
                wind_speed: 3.0,
                condition: "clear sky".to_string(),
                condition_code: 800,
                icon: "01d".to_string(),
                precip_chance: 0,
            })
            .collect();
        data
    }

    #[test]
    fn empty_forecast_renders_nothing() {
        let chart = ChartDisplay::new(Units::Imperial);
        assert_eq!(chart.render_hourly_temp_chart(&data_with_temps(&[]), 12), "");
    }

    #[test]
    fn chart_includes_range_footer_with_units() {
        let chart = ChartDisplay::new(Units::Metric);
        let out = chart.render_hourly_temp_chart(&data_with_temps(&[10.0, 12.5, 11.0]), 12);

        assert!(out.contains("Range: 10.0°C - 12.5°C"));
        assert!(out.contains("Temperature Trend"));
    }

    #[test]
    fn chart_honors_hour_cap() {
        let chart = ChartDisplay::new(Units::Imperial);
        let out = chart.render_hourly_temp_chart(&data_with_temps(&[60.0, 70.0, 80.0, 90.0]), 2);

        // Only the first two samples should contribute to the range.
        assert!(out.contains("Range: 60.0°F - 70.0°F"));
    }

    #[test]
    fn plot_has_expected_row_count() {
        let out = plot(&[1.0, 2.0, 3.0, 2.0], 10);
        assert_eq!(out.lines().count(), 11);
        // Highest value sits on the top row.
        assert!(out.lines().next().unwrap().starts_with("    3.0"));
    }

    #[test]
    fn plot_of_flat_series_is_single_line() {
        let out = plot(&[5.0, 5.0, 5.0], 4);
        let non_empty: Vec<&str> = out
            .lines()
            .filter(|l| l.chars().any(|c| "─╭╮╰╯│".contains(c)))
            .collect();
        assert_eq!(non_empty.len(), 1);
    }

    #[test]
    fn daily_range_bars_scale_with_spread() {
        let chart = ChartDisplay::new(Units::Imperial);
        let data = with_daily(data_with_temps(&[70.0]), &[(60.0, 70.0), (65.0, 65.0)]);

        let out = chart.render_daily_temp_range(&data, 5);
        assert!(out.contains("Daily Temperature Range:"));

        let rows: Vec<&str> = out.lines().filter(|l| l.contains("°F")).collect();
        assert_eq!(rows.len(), 2);

        // 10-degree spread fills half of the 30-block bar.
        assert!(rows[0].contains("60°F"));
        assert!(rows[0].contains(&"█".repeat(15)));
        assert!(!rows[0].contains(&"█".repeat(16)));
        assert!(rows[0].contains("70°F"));

        // Zero spread draws no bar.
        assert!(!rows[1].contains('█'));
    }

    #[test]
    fn daily_range_honors_day_cap_and_empty_data() {
        let chart = ChartDisplay::new(Units::Metric);
        let data = with_daily(
            data_with_temps(&[20.0]),
            &[(10.0, 20.0), (11.0, 21.0), (12.0, 22.0)],
        );

        let out = chart.render_daily_temp_range(&data, 2);
        assert_eq!(out.lines().filter(|l| l.contains("°C")).count(), 2);

        assert_eq!(chart.render_daily_temp_range(&data_with_temps(&[20.0]), 5), "");
        assert_eq!(chart.render_daily_temp_range(&data, 0), "");
    }

    #[test]
    fn sparkline_tracks_extremes() {
        let line = sparkline(&[0.0, 50.0, 100.0]);
        let chars: Vec<char> = line.chars().collect();
        assert_eq!(chars.first(), Some(&'▁'));
        assert_eq!(chars.last(), Some(&'█'));
        assert_eq!(chars.len(), 3);
    }

    #[test]
    fn sparkline_of_flat_series_uses_lowest_block() {
        assert_eq!(sparkline(&[7.0, 7.0]), "▁▁");
        assert_eq!(sparkline(&[]), "");
    }
}
