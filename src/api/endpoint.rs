use http::Method;
use reqwest::Url;

use crate::errors::ApiError;

/// A logical operation bound to an HTTP verb and a path template.
///
/// Path segments written as `{name}` are replaced by the matching parameter
/// and percent-encoded. A trailing slash in the template is kept.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
}

impl Endpoint {
    pub const fn new(method: Method, path: &'static str) -> Self {
        Self { method, path }
    }

    /// Expand the template against `base`, then append the non-empty query
    /// parameters.
    pub fn url(
        &self,
        base: &Url,
        params: &[(&str, &str)],
        query: &[(&str, String)],
    ) -> Result<Url, ApiError> {
        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::Template(format!("{} cannot be a base url", base)))?;
            segments.pop_if_empty();
            for segment in self.path.trim_start_matches('/').split('/') {
                match placeholder(segment) {
                    Some(name) => {
                        let value = params
                            .iter()
                            .find(|(key, _)| *key == name)
                            .map(|(_, value)| *value)
                            .ok_or_else(|| {
                                ApiError::Template(format!(
                                    "missing parameter '{}' for {}",
                                    name, self.path
                                ))
                            })?;
                        segments.push(value);
                    }
                    None => {
                        segments.push(segment);
                    }
                }
            }
        }

        let query: Vec<_> = query.iter().filter(|(_, v)| !v.is_empty()).collect();
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{').and_then(|s| s.strip_suffix('}'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://localhost:5000").unwrap()
    }

    #[test]
    fn test_placeholder_substitution() {
        let endpoint = Endpoint::new(Method::PATCH, "/api/photos/{id}/title");
        let url = endpoint.url(&base(), &[("id", "12")], &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/photos/12/title");
    }

    #[test]
    fn test_trailing_slash_and_query() {
        let endpoint = Endpoint::new(Method::GET, "/api/photos/");
        let url = endpoint
            .url(
                &base(),
                &[],
                &[
                    ("page", "2".to_string()),
                    ("q", String::new()),
                    ("orderBy", "votes".to_string()),
                ],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/photos/?page=2&orderBy=votes"
        );
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let base = Url::parse("http://example.com/gallery/").unwrap();
        let endpoint = Endpoint::new(Method::GET, "/api/tags/");
        let url = endpoint.url(&base, &[], &[]).unwrap();
        assert_eq!(url.as_str(), "http://example.com/gallery/api/tags/");
    }

    #[test]
    fn test_parameter_is_encoded() {
        let endpoint = Endpoint::new(Method::GET, "/api/photos/{id}");
        let url = endpoint.url(&base(), &[("id", "a/b c")], &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/photos/a%2Fb%20c");
    }

    #[test]
    fn test_missing_parameter_fails() {
        let endpoint = Endpoint::new(Method::GET, "/api/photos/{id}");
        let result = endpoint.url(&base(), &[], &[]);
        assert!(matches!(result, Err(ApiError::Template(_))));
    }
}
