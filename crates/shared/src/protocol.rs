use serde::{Deserialize, Serialize};

use crate::domain::FormValues;

pub const CONTACT_PATH: &str = "/contact";

/// Body of `POST {base}/contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl From<&FormValues> for ContactRequest {
    fn from(values: &FormValues) -> Self {
        Self {
            name: values.name.clone(),
            email: values.email.clone(),
            subject: values.subject.clone(),
            message: values.message.clone(),
        }
    }
}

/// Reply from the contact endpoint. Only `status: true` counts as accepted;
/// an absent field or `false` is a rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

impl ContactResponse {
    pub fn is_accepted(&self) -> bool {
        self.status == Some(true)
    }
}
