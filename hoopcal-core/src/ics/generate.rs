//! ICS file generation.

use super::{compact_utc, CalendarDocument, CalendarEvent};
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger};
use tracing::debug;

/// Generate .ics content for a document
pub fn generate_ics(document: &CalendarDocument) -> String {
    let mut cal = Calendar::new();
    cal.append_property(Property::new("METHOD", "PUBLISH"));

    for event in &document.events {
        cal.push(to_ics_event(event));
    }

    let cal = cal.done();

    let output = normalize_ics(&cal.to_string(), &document.prodid);
    debug!(events = document.events.len(), bytes = output.len(), "generated ics");

    output
}

fn to_ics_event(event: &CalendarEvent) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);

    // DTSTAMP is the creation time, so it changes on every export
    ics_event.add_property("DTSTAMP", compact_utc(&event.stamp));
    ics_event.add_property("DTSTART", compact_utc(&event.start));
    ics_event.add_property("DTEND", compact_utc(&event.end));

    ics_event.summary(&event.summary);
    ics_event.description(&event.description);
    ics_event.location(&event.location);

    if let Some(ref alarm) = event.alarm {
        let minutes = i64::from(alarm.minutes_before);
        // Alarm::display requires a trigger. Its TRIGGER line is then replaced
        // so the offset stays in minutes (-PT60M) instead of the crate's normalized form
        let trigger = Trigger::before_start(chrono::Duration::minutes(minutes));
        let mut valarm = Alarm::display(&alarm.description, trigger);
        valarm.add_property("TRIGGER", format!("-PT{minutes}M"));
        ics_event.alarm(valarm);
    }

    ics_event.done()
}

/// Clean up ICS output from the icalendar crate
/// - Replace the crate's PRODID with ours
/// - Remove DTSTAMP and UID inside VALARM sections (not required by RFC 5545)
fn normalize_ics(ics: &str, prodid: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_valarm = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(prodid);
            result.push_str("\r\n");
            continue;
        }

        if line == "BEGIN:VALARM" {
            in_valarm = true;
        } else if line == "END:VALARM" {
            in_valarm = false;
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
