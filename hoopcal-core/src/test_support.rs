use chrono::{TimeZone, Utc};

use crate::game::GameRecord;

/// Home game against Kentucky, 2024-01-06 19:00 UTC
pub(crate) fn kentucky() -> GameRecord {
    GameRecord {
        id: "401".to_string(),
        opponent_name: "Kentucky".to_string(),
        is_home: true,
        start_time: Utc.with_ymd_and_hms(2024, 1, 6, 19, 0, 0).unwrap(),
        venue: Some("O'Connell Center".to_string()),
        broadcast_channel: Some("ESPN".to_string()),
    }
}
