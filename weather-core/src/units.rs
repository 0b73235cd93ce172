//! Unit conversions for the fallback provider's readings.

pub fn kmh_to_mps(kmh: f64) -> f64 {
    kmh / 3.6
}

pub fn km_to_meters(km: f64) -> f64 {
    km * 1000.0
}
