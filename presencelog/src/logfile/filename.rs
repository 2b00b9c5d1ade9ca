//! Logfile name assembly.
//!
//! Logfiles are named `<base>-<stamp>.csv` where the stamp is the local
//! wall-clock time at construction, formatted as a fixed-width 12-digit
//! string (YYMMDDHHMMSS). The name is computed exactly once per run.

use chrono::{DateTime, Local};

/// Logfile extension, including the dot.
pub const LOGFILE_EXTENSION: &str = ".csv";

/// Format a local time as a fixed-width 12-digit string (YYMMDDHHMMSS).
pub fn local_twelve_digit_string(time: DateTime<Local>) -> String {
    time.format("%y%m%d%H%M%S").to_string()
}

/// Assemble a logfile name from a base name and a local timestamp.
pub fn logfile_name(base: &str, time: DateTime<Local>) -> String {
    format!("{}-{}{}", base, local_twelve_digit_string(time), LOGFILE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn test_twelve_digit_format() {
        let time = Local.with_ymd_and_hms(2016, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(local_twelve_digit_string(time), "160102030405");
    }

    #[test]
    fn test_logfile_name_assembly() {
        let time = Local.with_ymd_and_hms(2016, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(logfile_name("eventlog", time), "eventlog-160102030405.csv");
    }

    proptest! {
        /// The stamp is always exactly 12 ASCII digits, whatever the time.
        #[test]
        fn test_stamp_is_always_twelve_digits(secs in 0i64..4_102_444_800) {
            let time = Local.timestamp_opt(secs, 0).unwrap();
            let stamp = local_twelve_digit_string(time);
            prop_assert_eq!(stamp.len(), 12);
            prop_assert!(stamp.bytes().all(|b| b.is_ascii_digit()));
        }
    }
}
