#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::Local;
use chrono::SecondsFormat;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use uuid::Uuid;

use super::Author;

fn create_id() -> String {
    return Uuid::new_v4()
        .to_string()
        .split('-')
        .enumerate()
        .filter_map(|(idx, str)| {
            if idx > 1 {
                return None;
            }
            return Some(str);
        })
        .collect::<Vec<&str>>()
        .join("-");
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub author: Author,
    pub text: String,
    pub timestamp: String,
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message {
            id: create_id(),
            author,
            text: text.to_string().replace('\t', "  "),
            timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
        };
    }
}
