use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lenient;

// Write-only record left by the contact form
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContactMessage {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ContactForm {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub email: String,
    #[serde(deserialize_with = "lenient::text")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::text")]
    pub message: String,
}

impl ContactForm {
    pub fn into_message(self, id: Uuid) -> ContactMessage {
        ContactMessage {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            message: self.message,
        }
    }
}
