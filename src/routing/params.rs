//! Query parameters the router looks at.
//!
//! Values are form-decoded (`+` is a space) and the first occurrence of a
//! name wins. Empty values are kept; the router decides what empty means.

use url::form_urlencoded;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub url: Option<String>,
    pub format: Option<String>,
    pub source: Option<String>,
    pub prefix: Option<String>,
}

impl QueryParams {
    pub fn parse(query: Option<&str>) -> Self {
        let mut params = Self::default();
        let Some(query) = query else {
            return params;
        };

        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match name.as_ref() {
                "url" => &mut params.url,
                "format" => &mut params.format,
                "source" => &mut params.source,
                "prefix" => &mut params.prefix,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_query() {
        assert_eq!(QueryParams::parse(None), QueryParams::default());
        assert_eq!(QueryParams::parse(Some("")), QueryParams::default());
    }

    #[test]
    fn test_first_value_wins() {
        let p = QueryParams::parse(Some("format=1&format=2&source=jin18"));
        assert_eq!(p.format.as_deref(), Some("1"));
        assert_eq!(p.source.as_deref(), Some("jin18"));
        assert_eq!(p.url, None);
    }

    #[test]
    fn test_empty_values_are_present() {
        let p = QueryParams::parse(Some("format=&prefix="));
        assert_eq!(p.format.as_deref(), Some(""));
        assert_eq!(p.prefix.as_deref(), Some(""));

        let p = QueryParams::parse(Some("format"));
        assert_eq!(p.format.as_deref(), Some(""));
    }

    #[test]
    fn test_values_are_decoded() {
        let p = QueryParams::parse(Some("prefix=https%3A%2F%2Fp.example%2F%3Furl%3D&url=a+b"));
        assert_eq!(p.prefix.as_deref(), Some("https://p.example/?url="));
        assert_eq!(p.url.as_deref(), Some("a b"));
    }

    #[test]
    fn test_url_value_stops_at_ampersand() {
        let p = QueryParams::parse(Some("url=https://a.example/?x=1&y=2"));
        assert_eq!(p.url.as_deref(), Some("https://a.example/?x=1"));
    }
}
