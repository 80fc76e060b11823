//! ASCII art and emoji glyphs for OpenWeatherMap condition codes.
//!
//! Code buckets: 2xx thunderstorm, 3xx drizzle, 5xx rain, 6xx snow,
//! 7xx atmosphere (fog, mist), 800 clear, 801+ clouds.

/// Every art block is 5 lines of exactly [`ART_WIDTH`] characters.
pub const ART_WIDTH: usize = 13;

pub fn ascii_art(condition_code: u16, is_night: bool) -> [&'static str; 5] {
    match condition_code {
        200..=299 => THUNDERSTORM,
        300..=399 => DRIZZLE,
        500..=599 => RAIN,
        600..=699 => SNOW,
        700..=799 => FOG,
        800 => {
            if is_night {
                CLEAR_NIGHT
            } else {
                CLEAR_DAY
            }
        }
        801..=802 => PARTLY_CLOUDY,
        803..=899 => CLOUDY,
        _ => UNKNOWN,
    }
}

/// Single-glyph variant used in the compact forecast rows.
pub fn glyph(condition_code: u16, is_night: bool) -> &'static str {
    match condition_code {
        200..=299 => "⛈️ ",
        300..=399 => "🌦️ ",
        500..=599 => "🌧️ ",
        600..=699 => "❄️ ",
        700..=799 => "🌫️ ",
        800 => {
            if is_night {
                "🌙"
            } else {
                "☀️ "
            }
        }
        801..=802 => "⛅",
        803..=899 => "☁️ ",
        _ => "🌡️ ",
    }
}

const CLEAR_DAY: [&str; 5] = [
    r"    \   /    ",
    r"     .-.     ",
    r"  - (   ) -  ",
    r"     `-'     ",
    r"    /   \    ",
];

const CLEAR_NIGHT: [&str; 5] = [
    r"    .-.      ",
    r"   (   )     ",
    r"  (  .  )    ",
    r"   (___)     ",
    r"             ",
];

const PARTLY_CLOUDY: [&str; 5] = [
    "   \\  /      ",
    " _ /\"\".-.    ",
    "   \\_(   ).  ",
    "   /(___(__) ",
    "             ",
];

const CLOUDY: [&str; 5] = [
    r"             ",
    r"     .--.    ",
    r"  .-(    ).  ",
    r" (___.__)__) ",
    r"             ",
];

const RAIN: [&str; 5] = [
    r"     .-.     ",
    r"    (   ).   ",
    r"   (___(__)  ",
    r"    ' ' ' '  ",
    r"   ' ' ' '   ",
];

const DRIZZLE: [&str; 5] = [
    r"     .-.     ",
    r"    (   ).   ",
    r"   (___(__)  ",
    r"     ' ' '   ",
    r"    ' ' '    ",
];

const THUNDERSTORM: [&str; 5] = [
    r"     .-.     ",
    r"    (   ).   ",
    r"   (___(__)  ",
    r"    /_ /_    ",
    r"     /  /    ",
];

const SNOW: [&str; 5] = [
    r"     .-.     ",
    r"    (   ).   ",
    r"   (___(__)  ",
    r"   * * * *   ",
    r"  * * * *    ",
];

const FOG: [&str; 5] = [
    r"             ",
    r" _ - _ - _ - ",
    r"  _ - _ - _  ",
    r" _ - _ - _ - ",
    r"             ",
];

const UNKNOWN: [&str; 5] = [
    r"             ",
    r"    .-.      ",
    r"   (   )     ",
    r"    `-'      ",
    r"             ",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_select_expected_art() {
        assert_eq!(ascii_art(211, false), THUNDERSTORM);
        assert_eq!(ascii_art(301, false), DRIZZLE);
        assert_eq!(ascii_art(502, false), RAIN);
        assert_eq!(ascii_art(601, false), SNOW);
        assert_eq!(ascii_art(741, false), FOG);
        assert_eq!(ascii_art(800, false), CLEAR_DAY);
        assert_eq!(ascii_art(800, true), CLEAR_NIGHT);
        assert_eq!(ascii_art(801, false), PARTLY_CLOUDY);
        assert_eq!(ascii_art(804, false), CLOUDY);
        assert_eq!(ascii_art(0, false), UNKNOWN);
    }

    #[test]
    fn art_lines_have_uniform_width() {
        for code in [211, 301, 502, 601, 741, 800, 801, 804, 0] {
            for variant in [false, true] {
                for line in ascii_art(code, variant) {
                    assert_eq!(line.chars().count(), ART_WIDTH, "code {code} line {line:?}");
                }
            }
        }
    }

    #[test]
    fn clear_glyph_depends_on_time_of_day() {
        assert_eq!(glyph(800, false), "☀️ ");
        assert_eq!(glyph(800, true), "🌙");
    }
}
