use std::collections::HashMap;
use url::{Url, form_urlencoded};

pub const CONTINUATION_TOKEN_PARAM: &str = "continuationToken";

/// Rewrites the `continuationToken` query parameter of `request_uri` (a
/// path with optional query) and returns the relative URL of the next page.
/// Other query parameters keep their order.
pub fn next_page_url(request_uri: &str, token: &str) -> Result<String, url::ParseError> {
    let mut url = Url::parse("http://localhost/")?.join(request_uri)?;

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != CONTINUATION_TOKEN_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(CONTINUATION_TOKEN_PARAM, token);

    Ok(format!("{}?{}", url.path(), url.query().unwrap_or("")))
}

/// Decodes a raw query string, keeping the first value of a repeated key.
pub fn first_query_values(raw: Option<&str>) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
        values
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    values
}
