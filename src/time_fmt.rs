use std::time::Duration;

/// `mm:ss`
pub fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `mm:ss.t`, tenths truncated.
pub fn format_clock_tenths(elapsed: Duration) -> String {
    let tenths = elapsed.subsec_millis() / 100;
    format!("{}.{tenths}", format_clock(elapsed))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{format_clock, format_clock_tenths};

    #[test]
    fn clock() {
        assert_eq!(format_clock(Duration::ZERO), "00:00");
        assert_eq!(format_clock(Duration::from_millis(59_999)), "00:59");
        assert_eq!(format_clock(Duration::from_secs(61)), "01:01");
        assert_eq!(format_clock(Duration::from_secs(100 * 60 + 5)), "100:05");
    }

    #[test]
    fn clock_tenths() {
        assert_eq!(format_clock_tenths(Duration::ZERO), "00:00.0");
        assert_eq!(format_clock_tenths(Duration::from_millis(1_999)), "00:01.9");
        assert_eq!(format_clock_tenths(Duration::from_millis(754_310)), "12:34.3");
    }
}
