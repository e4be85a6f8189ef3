//! Human-readable durations for anchor ETAs and poll timings.

/// `45s`, `2m 5s`, `3h 10m`, `2d 4h`.
pub fn format_eta(secs: u64) -> String {
    match secs {
        0..=59 => format!("{secs}s"),
        60..=3_599 => format!("{}m {}s", secs / 60, secs % 60),
        3_600..=86_399 => format!("{}h {}m", secs / 3_600, (secs % 3_600) / 60),
        _ => format!("{}d {}h", secs / 86_400, (secs % 86_400) / 3_600),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_boundaries() {
        assert_eq!(format_eta(0), "0s");
        assert_eq!(format_eta(59), "59s");
        assert_eq!(format_eta(125), "2m 5s");
        assert_eq!(format_eta(3_600), "1h 0m");
        assert_eq!(format_eta(86_400 * 2 + 3_600 * 4), "2d 4h");
    }
}
