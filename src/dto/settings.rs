use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct SettingsMap {
    pub settings: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertSettingRequest {
    pub value: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RecordVisitRequest {
    pub page: Option<String>,
    pub referer: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VisitCount {
    pub page: String,
    pub count: u64,
}
