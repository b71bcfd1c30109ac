//! Wire types for the `getStatsData` JSON response.
//!
//! Only the parts the pipeline consumes are modelled. The API collapses
//! single-element lists into a bare object, so every list goes through
//! [`OneOrMany`].

use serde::Deserialize;

use crate::error::AppError;

/// A JSON value that is either a list or a single bare element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => std::slice::from_ref(item),
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EstatResponse {
    #[serde(rename = "GET_STATS_DATA")]
    pub get_stats_data: GetStatsData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetStatsData {
    #[serde(rename = "RESULT")]
    pub result: ApiResult,
    /// Absent when `RESULT.STATUS` is non-zero.
    #[serde(rename = "STATISTICAL_DATA", default)]
    pub statistical_data: Option<StatisticalData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiResult {
    #[serde(rename = "STATUS")]
    pub status: i64,
    #[serde(rename = "ERROR_MSG", default)]
    pub error_msg: Option<String>,
    #[serde(rename = "DATE", default)]
    pub date: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatisticalData {
    #[serde(rename = "CLASS_INF", default)]
    pub class_inf: ClassInf,
    #[serde(rename = "DATA_INF", default)]
    pub data_inf: DataInf,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassInf {
    #[serde(rename = "CLASS_OBJ", default)]
    pub class_obj: OneOrMany<ClassObj>,
}

/// One classification axis (`time`, `cat01`, `cat03`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct ClassObj {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@name", default)]
    pub name: Option<String>,
    #[serde(rename = "CLASS", default)]
    pub class: OneOrMany<ClassEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassEntry {
    #[serde(rename = "@code")]
    pub code: String,
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@level", default)]
    pub level: Option<String>,
    #[serde(rename = "@parentCode", default)]
    pub parent_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataInf {
    #[serde(rename = "VALUE", default)]
    pub value: OneOrMany<RawStatRecord>,
}

/// One element of `DATA_INF.VALUE`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawStatRecord {
    #[serde(rename = "@time")]
    pub time: String,
    #[serde(rename = "@cat01")]
    pub cat01: String,
    #[serde(rename = "@cat02", default)]
    pub cat02: Option<String>,
    #[serde(rename = "@cat03", default)]
    pub cat03: Option<String>,
    #[serde(rename = "@unit", default)]
    pub unit: String,
    #[serde(rename = "$")]
    pub value: String,
}

impl EstatResponse {
    pub fn from_json_str(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw).map_err(|e| AppError::transport(format!("Failed to parse e-Stat response: {e}")))
    }

    pub fn status(&self) -> i64 {
        self.get_stats_data.result.status
    }

    /// Split a successful response into its data date and statistical section.
    ///
    /// A non-zero `STATUS` is an API-level error (exit code 3). A successful
    /// response without `STATISTICAL_DATA` yields an empty section.
    pub fn into_success(self) -> Result<(String, StatisticalData), AppError> {
        let GetStatsData {
            result,
            statistical_data,
        } = self.get_stats_data;

        if result.status != 0 {
            let msg = result.error_msg.as_deref().unwrap_or("Unknown error");
            return Err(AppError::api(format!("e-Stat API error (status {}): {msg}", result.status)));
        }

        Ok((result.date, statistical_data.unwrap_or_default()))
    }
}
