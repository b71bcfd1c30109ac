//! e-Stat `getStatsData` API integration.

use reqwest::blocking::Client;
use tracing::{info, warn};

use crate::data::response::EstatResponse;
use crate::domain::StatsQuery;
use crate::error::AppError;

const BASE_URL: &str = "http://api.e-stat.go.jp/rest/3.0/app/json/getStatsData";
const APP_ID_VAR: &str = "ESTAT_APP_ID";

pub struct EstatClient {
    client: Client,
    app_id: String,
}

impl EstatClient {
    /// Build a client using `ESTAT_APP_ID` from the environment (or `.env`).
    ///
    /// A missing id is not fatal here; the API rejects the request and the
    /// run fails on its reported status instead.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let app_id = std::env::var(APP_ID_VAR).unwrap_or_else(|_| {
            warn!(var = APP_ID_VAR, "application id not set; request will be unauthenticated");
            String::new()
        });
        Self::new(app_id)
    }

    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            app_id: app_id.into(),
        }
    }

    pub fn fetch(&self, query: &StatsQuery) -> Result<EstatResponse, AppError> {
        info!(stats_data_id = %query.stats_data_id, "fetching data from e-Stat");

        let resp = self
            .client
            .get(BASE_URL)
            .query(&query_params(query, &self.app_id))
            .send()
            .map_err(|e| AppError::transport(format!("e-Stat request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::transport(format!("e-Stat request failed with status {}.", resp.status())));
        }

        let body: EstatResponse = resp
            .json()
            .map_err(|e| AppError::transport(format!("Failed to parse e-Stat response: {e}")))?;

        info!(status = body.status(), "e-Stat responded");
        Ok(body)
    }
}

fn query_params(query: &StatsQuery, app_id: &str) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("cdCat01", query.cat01.join(",")),
        ("cdCat02", query.cat02.clone()),
    ];
    if let Some(cat03) = &query.cat03 {
        params.push(("cdCat03", cat03.clone()));
    }
    params.extend([
        ("appId", app_id.to_string()),
        ("lang", query.lang.clone()),
        ("statsDataId", query.stats_data_id.clone()),
        ("metaGetFlg", "Y".to_string()),
        ("cntGetFlg", "N".to_string()),
        ("explanationGetFlg", "Y".to_string()),
        ("annotationGetFlg", "Y".to_string()),
        ("sectionHeaderFlg", "1".to_string()),
        ("replaceSpChars", "0".to_string()),
    ]);
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(cat03: Option<&str>) -> StatsQuery {
        StatsQuery {
            stats_data_id: "0003449073".to_string(),
            cat01: vec!["100000".to_string(), "300000".to_string()],
            cat02: "60".to_string(),
            cat03: cat03.map(str::to_string),
            lang: "J".to_string(),
        }
    }

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn params_join_categories_and_omit_branch_filter() {
        let params = query_params(&query(None), "secret");
        assert_eq!(param(&params, "cdCat01"), Some("100000,300000"));
        assert_eq!(param(&params, "cdCat02"), Some("60"));
        assert_eq!(param(&params, "cdCat03"), None);
        assert_eq!(param(&params, "appId"), Some("secret"));
        assert_eq!(param(&params, "metaGetFlg"), Some("Y"));
        assert_eq!(param(&params, "sectionHeaderFlg"), Some("1"));
    }

    #[test]
    fn params_include_branch_filter_when_set() {
        let params = query_params(&query(Some("101170")), "");
        assert_eq!(param(&params, "cdCat03"), Some("101170"));
        assert_eq!(param(&params, "appId"), Some(""));
    }
}
