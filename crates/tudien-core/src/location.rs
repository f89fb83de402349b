use url::form_urlencoded;

/// Query parameter mirroring the current search
pub const SEARCH_PARAM: &str = "search";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamMode {
    /// Set the parameter and keep every other one
    Merge,
    /// Discard the existing query string and keep only this parameter
    Replace,
}

/// Address-bar capability handed to the search controller.
///
/// Values are the logical (decoded) parameter values, the same thing
/// `URLSearchParams::get` would return in a browser.
pub trait LocationBar: Send {
    fn read_query_param(&self, name: &str) -> Option<String>;

    fn set_query_param(&mut self, name: &str, value: &str, mode: ParamMode);

    /// Remove a parameter, falling back to the bare path when nothing remains
    fn remove_query_param(&mut self, name: &str);

    /// Current location as path plus query string
    fn href(&self) -> String;
}

/// In-process location with a push history
#[derive(Debug, Clone, Default)]
pub struct MemoryLocation {
    path: String,
    params: Vec<(String, String)>,
    history: Vec<String>,
}

impl MemoryLocation {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Parse `"/path?a=b"`, `"?a=b"` or a bare path
    pub fn parse(href: &str) -> Self {
        let (path, query) = match href.split_once('?') {
            Some((path, query)) => (path, query),
            None => (href, ""),
        };
        let path = if path.is_empty() { "/" } else { path };

        let params = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();

        Self {
            path: path.to_string(),
            params,
            history: Vec::new(),
        }
    }

    /// Every location pushed since creation, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
    }

    fn push(&mut self) {
        let href = self.href();
        tracing::debug!("Location pushed: {}", href);
        self.history.push(href);
    }
}

impl LocationBar for MemoryLocation {
    fn read_query_param(&self, name: &str) -> Option<String> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    fn set_query_param(&mut self, name: &str, value: &str, mode: ParamMode) {
        match mode {
            ParamMode::Replace => {
                self.params = vec![(name.to_string(), value.to_string())];
            }
            ParamMode::Merge => {
                match self.params.iter().position(|(key, _)| key == name) {
                    Some(idx) => {
                        self.params[idx].1 = value.to_string();
                        let mut seen = 0;
                        self.params.retain(|(key, _)| {
                            if key != name {
                                return true;
                            }
                            seen += 1;
                            seen == 1
                        });
                    }
                    None => self.params.push((name.to_string(), value.to_string())),
                }
            }
        }
        self.push();
    }

    fn remove_query_param(&mut self, name: &str) {
        self.params.retain(|(key, _)| key != name);
        self.push();
    }

    fn href(&self) -> String {
        if self.params.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_read() {
        let location = MemoryLocation::parse("/?search=h%25E1%25BB%258Dc&tab=2");

        assert_eq!(
            location.read_query_param(SEARCH_PARAM).as_deref(),
            Some("h%E1%BB%8Dc")
        );
        assert_eq!(location.read_query_param("tab").as_deref(), Some("2"));
        assert_eq!(location.read_query_param("missing"), None);
    }

    #[test]
    fn test_merge_keeps_other_params() {
        let mut location = MemoryLocation::parse("/?lang=vi");
        location.set_query_param(SEARCH_PARAM, "tau", ParamMode::Merge);

        assert_eq!(location.href(), "/?lang=vi&search=tau");

        location.set_query_param(SEARCH_PARAM, "hoc", ParamMode::Merge);
        assert_eq!(location.href(), "/?lang=vi&search=hoc");
        assert_eq!(location.history().len(), 2);
    }

    #[test]
    fn test_replace_drops_other_params() {
        let mut location = MemoryLocation::parse("/?lang=vi&search=tau");
        location.set_query_param(SEARCH_PARAM, "tàu", ParamMode::Replace);

        assert_eq!(location.read_query_param("lang"), None);
        assert_eq!(location.read_query_param(SEARCH_PARAM).as_deref(), Some("tàu"));
    }

    #[test]
    fn test_remove_falls_back_to_path() {
        let mut location = MemoryLocation::parse("/dict?search=tau");
        location.remove_query_param(SEARCH_PARAM);
        assert_eq!(location.href(), "/dict");

        let mut location = MemoryLocation::parse("/?search=tau&lang=vi");
        location.remove_query_param(SEARCH_PARAM);
        assert_eq!(location.href(), "/?lang=vi");
    }

    #[test]
    fn test_percent_encoded_value_survives_round_trip() {
        let mut location = MemoryLocation::new("/");
        location.set_query_param(SEARCH_PARAM, "h%E1%BB%8Dc%20sinh", ParamMode::Merge);

        let reparsed = MemoryLocation::parse(&location.href());
        assert_eq!(
            reparsed.read_query_param(SEARCH_PARAM).as_deref(),
            Some("h%E1%BB%8Dc%20sinh")
        );
    }
}
