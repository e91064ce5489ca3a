use serde::Deserialize;

use crate::domain::{MessageStatus, StatusGroup};

/// `status` object shared by send responses and delivery reports.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusJson {
    #[serde(default)]
    group_id: Option<i32>,
    #[serde(default)]
    group_name: Option<String>,
    #[serde(default)]
    id: Option<i32>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl From<StatusJson> for MessageStatus {
    fn from(value: StatusJson) -> Self {
        MessageStatus {
            group: value
                .group_name
                .as_deref()
                .map(StatusGroup::from_name)
                .unwrap_or_default(),
            group_id: value.group_id,
            id: value.id,
            name: value.name,
            description: value.description,
        }
    }
}

/// Missing `status` objects decode to an unknown status.
pub fn status_or_unknown(status: Option<StatusJson>) -> MessageStatus {
    status.unwrap_or_default().into()
}
