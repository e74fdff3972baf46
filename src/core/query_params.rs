use std::collections::HashMap;

/// Parse query parameters from a URI string
///
/// Handles URL decoding (including `+` as space) and returns a HashMap of
/// parameter key-value pairs. Only the last value of a repeated key is kept.
///
/// # Example
/// ```
/// use social::core::query_params::parse_query_params;
/// let params = parse_query_params("/explore?q=street+art&tab=media");
/// assert_eq!(params.get("q"), Some(&"street art".to_string()));
/// assert_eq!(params.get("tab"), Some(&"media".to_string()));
/// ```
pub fn parse_query_params(uri: &str) -> HashMap<String, String> {
    match uri.find('?') {
        Some(query_start) => parse_pairs(&uri[query_start + 1..]),
        None => HashMap::new(),
    }
}

/// Parse an `application/x-www-form-urlencoded` request body.
pub fn parse_form(body: &[u8]) -> HashMap<String, String> {
    parse_pairs(&String::from_utf8_lossy(body))
}

fn parse_pairs(encoded: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();

    for param in encoded.split('&').filter(|p| !p.is_empty()) {
        match param.split_once('=') {
            Some((key, value)) => {
                params.insert(decode(key), decode(value));
            }
            // Flag parameter without value
            None => {
                params.insert(decode(param), String::new());
            }
        }
    }

    params
}

/// Percent-decode one component; undecodable input is kept as-is.
pub fn decode(component: &str) -> String {
    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(spaced)
}

/// Get a trimmed, non-empty string parameter
pub fn get_non_blank(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params
        .get(key)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
