//! Multipart form bodies

use std::path::PathBuf;

use crate::error::HttpError;

/// A multipart/form-data request body built from named text parts and named
/// file parts.
#[derive(Debug, Default, Clone)]
pub struct Form {
    parts: Vec<Part>,
}

#[derive(Debug, Clone)]
struct Part {
    name: String,
    data: PartData,
}

#[derive(Debug, Clone)]
enum PartData {
    Text(String),
    File(PathBuf),
}

impl Form {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text part
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(Part {
            name: name.into(),
            data: PartData::Text(value.into()),
        });
        self
    }

    /// Add a file part; the file is read by the transport when the request
    /// is sent
    pub fn file(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.parts.push(Part {
            name: name.into(),
            data: PartData::File(path.into()),
        });
        self
    }

    /// Number of parts in the form
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the form holds no parts
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Lower the form into a libcurl form, part by part
    pub(crate) fn to_curl_form(&self) -> Result<curl::easy::Form, HttpError> {
        let mut form = curl::easy::Form::new();
        for part in &self.parts {
            match &part.data {
                PartData::Text(value) => {
                    form.part(&part.name).contents(value.as_bytes()).add()?;
                }
                PartData::File(path) => {
                    form.part(&part.name).file(path.as_path()).add()?;
                }
            }
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form() {
        let form = Form::new();
        assert!(form.is_empty());
        assert_eq!(form.len(), 0);
    }

    #[test]
    fn test_parts_accumulate() {
        let form = Form::new()
            .text("name", "value")
            .text("other", "123")
            .file("upload", "/tmp/payload.bin");
        assert_eq!(form.len(), 3);
        assert!(!form.is_empty());
    }

    #[test]
    fn test_text_parts_lower_to_curl_form() {
        let form = Form::new().text("a", "1").text("b", "2");
        assert!(form.to_curl_form().is_ok());
    }
}
