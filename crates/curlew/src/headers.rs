//! Header map and raw header line parsing

/// Ordered map of HTTP header fields.
///
/// Lookup and duplicate detection ignore ASCII case; the spelling used by
/// the first insertion is preserved. Inserting a name that is already
/// present replaces its value (last write wins).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    /// Create an empty header map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, replacing the value of an existing name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Look up a header value by name, ignoring ASCII case
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whether a header with the given name is present
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of header fields in the map
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no header fields
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over header fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Parse one raw header line from the wire and insert it.
    ///
    /// Lines without a colon (the status line, the blank terminator) are
    /// discarded.
    pub(crate) fn insert_raw_line(&mut self, line: &str) {
        if let Some((name, value)) = parse_header_line(line) {
            self.insert(name, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HeaderMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

/// Split a raw header line on the first colon.
///
/// The left side is the field name; the right side, stripped of leading and
/// trailing whitespace (including the trailing CRLF), is the value. Returns
/// `None` for lines without a colon.
pub(crate) fn parse_header_line(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    Some((name, value.trim()))
}
