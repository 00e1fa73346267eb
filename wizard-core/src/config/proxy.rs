use reqwest::Url;

pub const API_PREFIX: &str = "/api";
pub const DEV_BACKEND_ORIGIN: &str = "http://localhost:8000";

/// Forwarding rule used by the local dev server: requests under `prefix`
/// go to `target` with the path left as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRule {
    pub prefix: String,
    pub target: String,
    pub change_origin: bool,
}

impl Default for ProxyRule {
    fn default() -> Self {
        Self::dev_default()
    }
}

impl ProxyRule {
    pub fn dev_default() -> Self {
        Self {
            prefix: API_PREFIX.to_string(),
            target: DEV_BACKEND_ORIGIN.to_string(),
            change_origin: true,
        }
    }

    /// True for the prefix itself and anything below it on a segment
    /// boundary, so `/api` and `/api/translate` match but `/apis` does not.
    pub fn matches(&self, path: &str) -> bool {
        let prefix = self.prefix.trim_end_matches('/');
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
            None => false,
        }
    }

    pub fn forward_url(&self, path: &str) -> Option<String> {
        if !self.matches(path) {
            return None;
        }
        Some(format!("{}{}", self.target.trim_end_matches('/'), path))
    }

    /// `host[:port]` of the target, sent as the Host header when
    /// `change_origin` is set.
    pub fn host_header(&self) -> Option<String> {
        if !self.change_origin {
            return None;
        }
        let url = Url::parse(&self.target).ok()?;
        let host = url.host_str()?;
        Some(match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        })
    }

    /// Base URL a client outside the dev server should use to reach the
    /// same backend directly.
    pub fn direct_base_url(&self) -> String {
        format!(
            "{}{}",
            self.target.trim_end_matches('/'),
            self.prefix.trim_end_matches('/')
        )
    }
}
