//! Deep links that open a pre-filled "new event" form in web calendars.
//!
//! Pure URL construction; nothing here touches the network.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use url::Url;

use crate::game::GameRecord;
use crate::ics::{compact_utc, CalendarDocumentBuilder};

const GOOGLE_RENDER_URL: &str = "https://www.google.com/calendar/render";
const OUTLOOK_COMPOSE_URL: &str = "https://outlook.live.com/calendar/0/deeplink/compose";

/// Google Calendar's "import .ics" settings page
pub const GOOGLE_IMPORT_URL: &str = "https://calendar.google.com/calendar/u/0/r/settings/import";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CalendarProvider {
    Google,
    Outlook,
}

impl fmt::Display for CalendarProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarProvider::Google => write!(f, "Google Calendar"),
            CalendarProvider::Outlook => write!(f, "Outlook (web)"),
        }
    }
}

/// Full ISO-8601 with milliseconds, as Outlook expects: 2024-01-06T19:00:00.000Z
fn iso_millis(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl CalendarDocumentBuilder {
    /// Deep link for every supported provider
    pub fn build_external_links(&self, game: &GameRecord) -> BTreeMap<CalendarProvider, String> {
        [CalendarProvider::Google, CalendarProvider::Outlook]
            .into_iter()
            .map(|provider| (provider, self.external_link(provider, game)))
            .collect()
    }

    /// Deep link for a single provider.
    ///
    /// Uses the same flattened title, times, location and description as the
    /// .ics event, so missing venue/channel show up as "TBD".
    pub fn external_link(&self, provider: CalendarProvider, game: &GameRecord) -> String {
        let event = self.build_event(game, None);

        let url = match provider {
            CalendarProvider::Google => {
                let dates = format!("{}/{}", compact_utc(&event.start), compact_utc(&event.end));
                Url::parse_with_params(
                    GOOGLE_RENDER_URL,
                    &[
                        ("action", "TEMPLATE"),
                        ("text", event.summary.as_str()),
                        ("dates", dates.as_str()),
                        ("details", event.description.as_str()),
                        ("location", event.location.as_str()),
                        ("sf", "true"),
                        ("output", "xml"),
                    ],
                )
            }
            CalendarProvider::Outlook => {
                let start = iso_millis(&event.start);
                let end = iso_millis(&event.end);
                Url::parse_with_params(
                    OUTLOOK_COMPOSE_URL,
                    &[
                        ("subject", event.summary.as_str()),
                        ("startdt", start.as_str()),
                        ("enddt", end.as_str()),
                        ("body", event.description.as_str()),
                        ("location", event.location.as_str()),
                    ],
                )
            }
        };

        // Both bases are constant, valid URLs
        url.map(String::from)
            .unwrap_or_else(|e| unreachable!("invalid calendar base url: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::kentucky;
    use std::collections::HashMap;

    fn params(link: &str) -> HashMap<String, String> {
        Url::parse(link).unwrap().query_pairs().into_owned().collect()
    }

    #[test]
    fn google_link() {
        let links = CalendarDocumentBuilder::default().build_external_links(&kentucky());
        let google = &links[&CalendarProvider::Google];

        assert!(google.starts_with("https://www.google.com/calendar/render?"), "{google}");
        let params = params(google);
        assert_eq!(params["action"], "TEMPLATE");
        assert_eq!(params["text"], "Florida Gators vs Kentucky");
        assert_eq!(params["dates"], "20240106T190000Z/20240106T210000Z");
        assert_eq!(params["details"], "TV: ESPN — Auto-generated from Gator Hoops");
        assert_eq!(params["location"], "O'Connell Center");
        assert_eq!(params["sf"], "true");
        assert_eq!(params["output"], "xml");
    }

    #[test]
    fn outlook_link() {
        let links = CalendarDocumentBuilder::default().build_external_links(&kentucky());
        let outlook = &links[&CalendarProvider::Outlook];

        assert!(
            outlook.starts_with("https://outlook.live.com/calendar/0/deeplink/compose?"),
            "{outlook}"
        );
        let params = params(outlook);
        assert_eq!(params["subject"], "Florida Gators vs Kentucky");
        assert_eq!(params["startdt"], "2024-01-06T19:00:00.000Z");
        assert_eq!(params["enddt"], "2024-01-06T21:00:00.000Z");
        assert_eq!(params["body"], "TV: ESPN — Auto-generated from Gator Hoops");
        assert_eq!(params["location"], "O'Connell Center");
    }

    #[test]
    fn values_are_form_encoded() {
        let link =
            CalendarDocumentBuilder::default().external_link(CalendarProvider::Google, &kentucky());
        assert!(link.contains("text=Florida+Gators+vs+Kentucky"), "{link}");
    }

    #[test]
    fn missing_details_fall_back_to_tbd() {
        let game = GameRecord {
            venue: None,
            broadcast_channel: None,
            ..kentucky()
        };
        let link =
            CalendarDocumentBuilder::default().external_link(CalendarProvider::Outlook, &game);
        let params = params(&link);

        assert_eq!(params["location"], "TBD");
        assert_eq!(params["body"], "TV: TBD — Auto-generated from Gator Hoops");
    }
}
