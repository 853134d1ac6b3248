use serde::{Deserialize, Serialize};

use crate::models::{analyticsmodel::DashboardStats, usermodel::Professional};

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponseDto {
    #[serde(default)]
    pub all_pros: Option<Vec<Professional>>,
    #[serde(default)]
    pub stats: Option<DashboardStats>,
}

impl DashboardResponseDto {
    pub fn into_parts(self) -> (Vec<Professional>, DashboardStats) {
        (
            self.all_pros.unwrap_or_default(),
            self.stats.unwrap_or_default(),
        )
    }
}
