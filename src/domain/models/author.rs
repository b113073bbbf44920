use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Author {
    Student,
    Assistant,
}

impl ToString for Author {
    fn to_string(&self) -> String {
        match self {
            Author::Student => {
                let username = Config::get(ConfigKey::Username);
                if username.is_empty() {
                    return String::from("Student");
                }
                return username;
            }
            Author::Assistant => return String::from("Penpal"),
        }
    }
}
