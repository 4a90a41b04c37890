use log::debug;

/// Smallest temperature used by the softmax. Anything below is raised to it.
pub const TEMPERATURE_FLOOR: f64 = 1e-6;

/// Raise `temperature` to [`TEMPERATURE_FLOOR`] when it is smaller or not a number.
///
/// Higher temperatures produce flatter distributions, lower temperatures
/// sharpen them. The clamp is silent: zero and negative values are corrected,
/// never rejected.
pub fn clamp_temperature(temperature: f64) -> f64 {
    if temperature >= TEMPERATURE_FLOOR {
        temperature
    } else {
        debug!("temperature {temperature} raised to floor {TEMPERATURE_FLOOR}");
        TEMPERATURE_FLOOR
    }
}
