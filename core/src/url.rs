//! URL building from host, endpoint and query parameters.

use crate::query::QueryParams;

/// Joins host and endpoint into `host/endpoint/`.
pub fn format_url(host: &str, endpoint: &str) -> String {
    format!("{host}/{endpoint}/")
}

/// Appends query parameters to a formatted URL.
///
/// A lone `id` parameter becomes a path segment (`.../endpoint/42`). Any
/// other non-empty set becomes a query string with the trailing slash
/// removed. Values are inserted verbatim, without percent-encoding.
pub fn set_query_parameters(url: &str, query_params: &QueryParams) -> String {
    let mut new_url = url.to_string();

    if query_params.length() == 1 {
        if let Some(id) = query_params.get("id") {
            new_url.push_str(id);
            return new_url;
        }
    }

    if !query_params.empty() {
        if new_url.ends_with('/') {
            new_url.pop();
        }
        new_url.push('?');
        for (key, value) in query_params.iter() {
            new_url.push_str(key);
            new_url.push('=');
            new_url.push_str(value);
            new_url.push('&');
        }
        new_url.pop();
    }

    new_url
}
