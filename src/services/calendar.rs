use chrono::Duration;

use crate::models::{TourBooking, TourStatus};

const TOUR_LENGTH_MINUTES: i64 = 60;
const MAX_LINE_OCTETS: usize = 75;

pub fn generate_ics(tour: &TourBooking, property_label: &str) -> String {
    let start = tour.tour_date.and_time(tour.tour_time.start_time());
    let dtstart = start.format("%Y%m%dT%H%M%S").to_string();
    let dtend = (start + Duration::minutes(TOUR_LENGTH_MINUTES))
        .format("%Y%m%dT%H%M%S")
        .to_string();
    let dtstamp = tour.created_at.format("%Y%m%dT%H%M%SZ").to_string();
    let uid = format!("tour-{}@tourbook", tour.id);

    let summary = escape_text(&format!("Property tour: {property_label}"));
    let description = if tour.message.trim().is_empty() {
        "No additional notes".to_string()
    } else {
        escape_text(&tour.message)
    };
    let status = match tour.status {
        TourStatus::Pending => "TENTATIVE",
        TourStatus::Confirmed => "CONFIRMED",
        TourStatus::Cancelled => "CANCELLED",
    };

    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//Tourbook//Tour Booking//EN".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{uid}"),
        format!("DTSTAMP:{dtstamp}"),
        format!("DTSTART:{dtstart}"),
        format!("DTEND:{dtend}"),
        format!("SUMMARY:{summary}"),
        format!("DESCRIPTION:{description}"),
        format!("STATUS:{status}"),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];

    let mut ics = String::new();
    for line in &lines {
        fold_line(line, &mut ics);
    }
    ics
}

// Content lines are capped at 75 octets; continuations start with one space.
fn fold_line(line: &str, out: &mut String) {
    let mut width = 0;
    for ch in line.chars() {
        let len = ch.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(ch);
        width += len;
    }
    out.push_str("\r\n");
}

// RFC 5545 TEXT escaping
fn escape_text(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
}
