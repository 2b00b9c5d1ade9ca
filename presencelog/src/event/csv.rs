//! CSV encoding of detection events.
//!
//! One row per event: category, event time in milliseconds since the epoch,
//! the transmitting device's identifier, and the strongest decoding's
//! receiver and RSSI (empty columns when the event has no decodings).

use super::DetectionEvent;

/// Header row for event logfiles, without line terminator.
pub const CSV_HEADER: &str = "event,time,deviceId,receiverId,rssi";

/// Serialize an event to a CSV row, without line terminator.
///
/// Returns `None` when the event cannot be represented as a row; callers
/// must treat that as "no write".
pub fn to_csv_row(event: &DetectionEvent) -> Option<String> {
    let (receiver, rssi) = match event.tiraid.strongest_decoding() {
        Some(decoding) => (decoding.identifier.value.as_str(), decoding.rssi.to_string()),
        None => ("", String::new()),
    };

    Some(format!(
        "{},{},{},{},{}",
        event.category, event.time, event.tiraid.identifier.value, receiver, rssi
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventCategory, Identifier, RadioDecoding, Tiraid};

    #[test]
    fn test_header_columns() {
        assert_eq!(CSV_HEADER.split(',').count(), 5);
    }

    #[test]
    fn test_row_uses_strongest_decoding() {
        let tiraid = Tiraid::new(Identifier::eui64("fee150bada55"))
            .with_decoding(RadioDecoding::new(Identifier::eui64("r1"), -80))
            .with_decoding(RadioDecoding::new(Identifier::eui64("r2"), -60));
        let event = DetectionEvent::new(EventCategory::Appearance, 1_451_606_400_000, tiraid);

        let row = to_csv_row(&event).unwrap();
        assert_eq!(row, "appearance,1451606400000,fee150bada55,r2,-60");
    }

    #[test]
    fn test_row_without_decodings_has_empty_columns() {
        let event = DetectionEvent::new(
            EventCategory::Disappearance,
            1_451_606_400_000,
            Tiraid::new(Identifier::eui64("fee150bada55")),
        );

        let row = to_csv_row(&event).unwrap();
        assert_eq!(row, "disappearance,1451606400000,fee150bada55,,");
    }

    #[test]
    fn test_row_column_count_matches_header() {
        let event = DetectionEvent::new(
            EventCategory::KeepAlive,
            1,
            Tiraid::new(Identifier::eui64("aa"))
                .with_decoding(RadioDecoding::new(Identifier::eui64("r1"), -70)),
        );
        let row = to_csv_row(&event).unwrap();
        assert_eq!(row.split(',').count(), CSV_HEADER.split(',').count());
    }
}
