//! Human-friendly text output.

use std::fmt::Write;

use weather_core::{IconCategory, LookupState, WeatherReport};

pub fn glyph(category: IconCategory) -> &'static str {
    match category {
        IconCategory::Clear => "☀",
        IconCategory::PartlyCloudy => "⛅",
        IconCategory::Cloudy => "☁",
        IconCategory::Rain => "🌧",
        IconCategory::Snow => "❄",
        IconCategory::Thunderstorm => "⛈",
        IconCategory::Fog => "🌫",
        IconCategory::Unknown => "?",
    }
}

/// Whole degrees, without a "-0" for small negative readings.
pub fn temperature(celsius: f64) -> String {
    let rounded = celsius.round();
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}°C")
}

pub fn state(state: &LookupState) -> String {
    match state {
        LookupState::Idle => String::new(),
        LookupState::Loading => "Loading weather data...".to_string(),
        LookupState::Success(report) => report_text(report),
        LookupState::Error { message, .. } => format!("Error: {message}"),
    }
}

pub fn report_text(report: &WeatherReport) -> String {
    let mut out = String::new();
    write_report(&mut out, report).expect("writing to a String cannot fail");
    out
}

fn write_report(out: &mut String, report: &WeatherReport) -> std::fmt::Result {
    let current = &report.current;

    writeln!(out, "{}", current.location)?;
    writeln!(
        out,
        "  {} {}  {}",
        glyph(current.icon_category),
        temperature(current.temperature_c),
        current.description
    )?;
    writeln!(out, "  Humidity:   {}%", current.humidity_pct)?;
    writeln!(out, "  Wind:       {:.1} m/s", current.wind_speed_mps)?;
    writeln!(out, "  Pressure:   {} hPa", current.pressure_hpa)?;
    writeln!(out, "  Visibility: {} km", current.visibility_m / 1000.0)?;

    if !report.forecast.is_empty() {
        writeln!(out, "\n{}-Day Forecast", report.forecast.len())?;
        for day in &report.forecast {
            writeln!(
                out,
                "  {:<6} {} {:>5}  {}",
                day.label,
                glyph(day.icon_category),
                temperature(day.temperature_c),
                day.description
            )?;
        }
    }

    write!(out, "\nSource: {}", report.source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::{CurrentWeather, ForecastDay, ForecastSeries, ProviderId, WeatherError};

    fn report() -> WeatherReport {
        let mut forecast = ForecastSeries::new();
        forecast.try_push(ForecastDay {
            label: "Today".into(),
            temperature_c: 12.5,
            icon_category: IconCategory::Rain,
            description: "light rain".into(),
        });

        WeatherReport {
            source: ProviderId::Wttr,
            current: CurrentWeather {
                location: "Kuala Lumpur".into(),
                temperature_c: 28.4,
                humidity_pct: 75,
                pressure_hpa: 1013.0,
                wind_speed_mps: 5.2,
                visibility_m: 10_000.0,
                description: "Partly cloudy".into(),
                icon_category: IconCategory::Cloudy,
            },
            forecast,
        }
    }

    #[test]
    fn temperature_rounds_to_whole_degrees() {
        assert_eq!(temperature(28.4), "28°C");
        assert_eq!(temperature(12.5), "13°C");
        assert_eq!(temperature(-0.3), "0°C");
        assert_eq!(temperature(-3.6), "-4°C");
    }

    #[test]
    fn report_lists_details_and_forecast() {
        let text = report_text(&report());

        assert!(text.starts_with("Kuala Lumpur"));
        assert!(text.contains("Humidity:   75%"));
        assert!(text.contains("Wind:       5.2 m/s"));
        assert!(text.contains("Visibility: 10 km"));
        assert!(text.contains("1-Day Forecast"));
        assert!(text.contains("Today"));
        assert!(text.contains("Source: wttr"));
    }

    #[test]
    fn error_state_shows_message_only() {
        let text = state(&LookupState::from(WeatherError::CityNotFound));
        assert!(text.starts_with("Error: City not found"));
        assert!(!text.contains("Humidity"));
    }
}
