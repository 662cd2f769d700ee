use std::time::Duration;

use crate::types::FetchError;

pub const SOURCE_URL: &str = "https://superkts.com/cal/";

// The directory serves a stripped page to unknown clients; present a
// browser user agent like the site expects.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

fn request_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(err)
    }
}

/// One bounded GET against the directory page. No retries: a failure here
/// aborts the whole run, and the next trigger is the recovery path.
pub async fn fetch_directory() -> Result<String, FetchError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(FetchError::Network)?;

    let res = client
        .get(SOURCE_URL)
        .send()
        .await
        .map_err(request_error)?;

    if !res.status().is_success() {
        return Err(FetchError::Http(res.status()));
    }

    res.text().await.map_err(request_error)
}
