//! Eastmoney convertible-bond list endpoint.

use std::path::Path;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::USER_AGENT;
use tracing::info;

use crate::domain::SortOrder;
use crate::error::AppError;

/// Convertible-bond list ordered by subscription start date.
///
/// `js` asks the server to wrap the result as `{data:(x),font:(font)}`, which is
/// where the bare `data` / `font` keys in the response come from.
pub const KZZ_URL: &str = "http://dcfm.eastmoney.com/em_mutisvcexpandinterface/api/js/get?type=KZZ_LB2.0&token=70f12f2f4f091e459a279469fe49eca5&cmd=&st=STARTDATE&js={data:(x),font:(font)}";

const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 6.0; Nexus 5 Build/MRA58N) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/79.0.3945.117 Mobile Safari/537.36";

pub struct KzzClient {
    client: Client,
    url: String,
}

impl KzzClient {
    pub fn new() -> Self {
        Self::with_url(KZZ_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    fn request(&self, order: SortOrder) -> RequestBuilder {
        let req = self.client.get(&self.url).header(USER_AGENT, MOBILE_USER_AGENT);
        match sort_param(order) {
            Some((key, value)) => req.query(&[(key, value)]),
            None => req,
        }
    }

    /// Fetch the raw (still obfuscated) response body.
    pub fn fetch_raw(&self, order: SortOrder) -> Result<String, AppError> {
        let req = self
            .request(order)
            .build()
            .map_err(|e| AppError::network(format!("Invalid request URL '{}': {e}", self.url)))?;
        info!(url = %req.url(), "requesting bond list");

        let resp = self
            .client
            .execute(req)
            .map_err(|e| AppError::network(format!("Bond list request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::network(format!(
                "Bond list request failed with status {}.",
                resp.status()
            )));
        }

        resp.text()
            .map_err(|e| AppError::network(format!("Failed to read bond list response: {e}")))
    }
}

impl Default for KzzClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Query parameter selecting the sort direction. Ascending is the server default.
pub fn sort_param(order: SortOrder) -> Option<(&'static str, &'static str)> {
    match order {
        SortOrder::Desc => Some(("sr", "-1")),
        SortOrder::Asc => None,
    }
}

/// Load a previously saved raw response.
pub fn read_raw(path: &Path) -> Result<String, AppError> {
    info!(path = %path.display(), "replaying saved response");
    std::fs::read_to_string(path).map_err(|e| {
        AppError::io(format!("Failed to read raw response '{}': {e}", path.display()))
    })
}
