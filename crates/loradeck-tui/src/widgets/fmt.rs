//! Small display formatters shared across screens.

/// Format a distance estimate for a gateway card.
pub fn fmt_distance(meters: f64) -> String {
    if meters >= 10_000.0 {
        format!("{:.0} km", meters / 1000.0)
    } else if meters >= 1000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{meters:.0} m")
    }
}

/// Format a coordinate pair for display.
pub fn fmt_coords(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.4}, {longitude:.4}")
}

/// Format signal quality: RSSI in dBm and SNR in dB.
pub fn fmt_signal(rssi: f64, snr: f64) -> String {
    format!("{rssi:.0} dBm / {snr:.1} dB")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_scales_units() {
        assert_eq!(fmt_distance(0.0), "0 m");
        assert_eq!(fmt_distance(830.4), "830 m");
        assert_eq!(fmt_distance(1234.0), "1.2 km");
        assert_eq!(fmt_distance(25_600.0), "26 km");
    }

    #[test]
    fn coords_are_four_decimals() {
        assert_eq!(fmt_coords(52.37305, 4.89997), "52.3731, 4.9000");
    }

    #[test]
    fn signal_combines_rssi_and_snr() {
        assert_eq!(fmt_signal(-97.0, 7.25), "-97 dBm / 7.2 dB");
    }
}
