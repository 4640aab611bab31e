/// Body of the alert sent when the calendar shows open slots.
pub fn appointment_found(entry_url: &str) -> String {
    format!("Found an Appointment, check {entry_url}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_points_at_entry_page() {
        assert_eq!(
            appointment_found("https://service.berlin.de/dienstleistung/351180/"),
            "Found an Appointment, check https://service.berlin.de/dienstleistung/351180/"
        );
    }
}
