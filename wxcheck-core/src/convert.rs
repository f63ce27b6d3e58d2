use chrono::DateTime;

/// Kelvin to Fahrenheit.
pub fn k_to_f(kelvin: f64) -> f64 {
    (kelvin - 273.15) * 1.8 + 32.0
}

/// Wall-clock time (`hh:mm AM/PM`) at a location `utc_offset_secs` away from UTC.
///
/// Works purely on the numeric offset, so the result does not depend on the
/// process locale or timezone database.
pub fn local_clock_time(epoch_secs: i64, utc_offset_secs: i64) -> Option<String> {
    let shifted = epoch_secs.checked_add(utc_offset_secs)?;
    DateTime::from_timestamp(shifted, 0).map(|dt| dt.format("%I:%M %p").to_string())
}
