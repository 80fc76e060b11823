//! Terminal rendering: widget boxes, neofetch layout, icons and charts.

pub mod charts;
pub mod icons;
pub mod neofetch;
pub mod widget;

/// Capitalize the first letter of every whitespace-separated word, as
/// OpenWeatherMap condition descriptions arrive all-lowercase.
pub(crate) fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Night is anything outside 06:00..=18:00 local time; it only picks the
/// icon variant for clear skies.
pub(crate) fn is_night(hour: u32) -> bool {
    !(6..=18).contains(&hour)
}
