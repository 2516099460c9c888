// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON file reader and writer.
//!
//! Only documents wrapped in an object or an array are accepted, both when
//! reading and when writing. Bare scalars such as `1`, `true` or `null` are
//! valid JSON but are rejected here.

use crate::domain::{Result, UtilError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Reads and writes JSON documents on disk.
///
/// # Examples
///
/// ```rust
/// use sitekit::adapters::JsonFile;
/// use serde_json::json;
///
/// # fn main() -> sitekit::domain::Result<()> {
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("site.json");
///
/// let json = JsonFile::new();
/// json.write_to_file(&json!({"name": "demo"}), &path)?;
///
/// let mapping = json.read_mapping(&path)?;
/// assert_eq!(mapping["name"], "demo");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFile {
    pretty: bool,
}

impl JsonFile {
    /// Creates a codec that writes compact JSON.
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Switches the codec to indented output.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Returns `true` if something exists at `path`.
    pub fn file_exists<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().exists()
    }

    /// Returns `true` if `text` parses as JSON and is wrapped in `{}` or `[]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sitekit::adapters::JsonFile;
    ///
    /// let json = JsonFile::new();
    /// assert!(json.validate(r#"{"test": ""}"#));
    /// assert!(!json.validate(r#"{ "test": }"#));
    /// assert!(!json.validate("1"));
    /// assert!(!json.validate("true"));
    /// ```
    pub fn validate(&self, text: &str) -> bool {
        serde_json::from_str::<Value>(text).is_ok() && Self::is_wrapped(text)
    }

    fn is_wrapped(text: &str) -> bool {
        let trimmed = text.trim();
        (trimmed.starts_with('{') || trimmed.starts_with('['))
            && (trimmed.ends_with('}') || trimmed.ends_with(']'))
    }

    /// Reads `path` as a JSON document tree.
    ///
    /// Fails with, in order of checking: `FileNotFound`, `EmptyFile`,
    /// `FileOpen`, `InvalidJson`.
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<Value> {
        let path = path.as_ref();
        let text = Self::read_text(path)?;

        let value: Value = serde_json::from_str(&text)
            .map_err(|e| UtilError::from_json_error(path.display().to_string(), e))?;
        if !Self::is_wrapped(&text) {
            return Err(UtilError::not_wrapped(path.display().to_string()));
        }

        tracing::debug!("Read JSON document from {}", path.display());
        Ok(value)
    }

    /// Reads `path` as an ordered mapping.
    ///
    /// Object members keep their file order. A top-level array becomes a
    /// mapping keyed by element index (`"0"`, `"1"`, ...).
    pub fn read_mapping<P: AsRef<Path>>(&self, path: P) -> Result<Map<String, Value>> {
        match self.read_file(path.as_ref())? {
            Value::Object(map) => Ok(map),
            Value::Array(items) => Ok(items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect()),
            // read_file only lets objects and arrays through
            _ => Err(UtilError::not_wrapped(path.as_ref().display().to_string())),
        }
    }

    /// Reads `path` and deserializes it into `T`.
    pub fn read_as<T, P>(&self, path: P) -> Result<T>
    where
        T: DeserializeOwned,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let value = self.read_file(path)?;
        serde_json::from_value(value)
            .map_err(|e| UtilError::from_json_error(path.display().to_string(), e))
    }

    /// Serializes `data` and writes it to `path`, replacing any existing file.
    ///
    /// `data` must encode to an object or array; anything else fails with
    /// `InvalidJson` before the file is touched. Fails with `FileOpen` if the
    /// destination cannot be created.
    pub fn write_to_file<T, P>(&self, data: &T, path: P) -> Result<()>
    where
        T: Serialize + ?Sized,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let encoded = if self.pretty {
            serde_json::to_string_pretty(data)
        } else {
            serde_json::to_string(data)
        }
        .map_err(|e| UtilError::from_json_error("Failed to encode data", e))?;

        if !Self::is_wrapped(&encoded) {
            return Err(UtilError::not_wrapped(encoded));
        }

        let mut file = fs::File::create(path).map_err(|e| UtilError::FileOpen {
            path: path.to_path_buf(),
            source: e,
        })?;
        file.write_all(encoded.as_bytes())?;
        file.flush()?;

        tracing::debug!("Wrote {} bytes of JSON to {}", encoded.len(), path.display());
        Ok(())
    }

    fn read_text(path: &Path) -> Result<String> {
        let metadata = fs::metadata(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => UtilError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => UtilError::FileOpen {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        if metadata.len() == 0 {
            return Err(UtilError::EmptyFile {
                path: path.to_path_buf(),
            });
        }

        let bytes = fs::read(path).map_err(|e| UtilError::FileOpen {
            path: path.to_path_buf(),
            source: e,
        })?;

        String::from_utf8(bytes).map_err(|_| UtilError::InvalidJson {
            message: format!("{} is not valid UTF-8", path.display()),
            source: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_raw(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_validate() {
        let json = JsonFile::new();
        assert!(json.validate(r#"{"test": ""}"#));
        assert!(json.validate("[1, 2, 3]"));
        assert!(json.validate("  \n{\n  \"a\": [1]\n}\n  "));
        assert!(!json.validate(r#"{ "test": }"#));
        assert!(!json.validate(""));
    }

    #[test]
    fn test_validate_rejects_scalars() {
        let json = JsonFile::new();
        for text in ["1", "true", "null", "\"text\"", "2.5"] {
            assert!(!json.validate(text), "{}", text);
        }
    }

    #[test]
    fn test_file_exists() {
        let dir = TempDir::new().unwrap();
        let path = write_raw(&dir, "a.json", "{}");
        let json = JsonFile::new();
        assert!(json.file_exists(&path));
        assert!(!json.file_exists(dir.path().join("missing.json")));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = JsonFile::new().read_file(dir.path().join("missing.json"));
        assert!(matches!(result, Err(UtilError::FileNotFound { .. })));
    }

    #[test]
    fn test_read_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write_raw(&dir, "empty.json", "");
        let result = JsonFile::new().read_file(&path);
        assert!(matches!(result, Err(UtilError::EmptyFile { .. })));
    }

    #[test]
    fn test_read_directory_is_open_error() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("nested");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("keep"), "x").unwrap();

        let result = JsonFile::new().read_file(&sub);
        // Directories report a non-zero size on most filesystems; either way
        // the read must not succeed.
        assert!(matches!(
            result,
            Err(UtilError::FileOpen { .. }) | Err(UtilError::EmptyFile { .. })
        ));
    }

    #[test]
    fn test_read_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = write_raw(&dir, "bad.json", r#"{ "test": }"#);
        let result = JsonFile::new().read_file(&path);
        assert!(matches!(
            result,
            Err(UtilError::InvalidJson { source: Some(_), .. })
        ));
    }

    #[test]
    fn test_read_scalar_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = write_raw(&dir, "scalar.json", "true");
        let result = JsonFile::new().read_file(&path);
        assert!(matches!(
            result,
            Err(UtilError::InvalidJson { source: None, .. })
        ));
    }

    #[test]
    fn test_read_mapping_keeps_order() {
        let dir = TempDir::new().unwrap();
        let path = write_raw(&dir, "ordered.json", r#"{"z": 1, "a": 2, "m": 3}"#);
        let mapping = JsonFile::new().read_mapping(&path).unwrap();
        let keys: Vec<&str> = mapping.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_read_mapping_from_array() {
        let dir = TempDir::new().unwrap();
        let path = write_raw(&dir, "list.json", r#"["a", "b"]"#);
        let mapping = JsonFile::new().read_mapping(&path).unwrap();
        assert_eq!(mapping["0"], json!("a"));
        assert_eq!(mapping["1"], json!("b"));
    }

    #[test]
    fn test_read_as_typed() {
        #[derive(Deserialize)]
        struct Site {
            name: String,
            port: u16,
        }

        let dir = TempDir::new().unwrap();
        let path = write_raw(&dir, "site.json", r#"{"name": "demo", "port": 8080}"#);
        let site: Site = JsonFile::new().read_as(&path).unwrap();
        assert_eq!(site.name, "demo");
        assert_eq!(site.port, 8080);

        let wrong: Result<Vec<u8>> = JsonFile::new().read_as(&path);
        assert!(matches!(wrong, Err(UtilError::InvalidJson { .. })));
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        let data = json!({"name": "demo", "tags": ["a", "b"], "nested": {"on": true}});

        let json = JsonFile::new();
        json.write_to_file(&data, &path).unwrap();
        assert_eq!(json.read_file(&path).unwrap(), data);
    }

    #[test]
    fn test_write_pretty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pretty.json");
        JsonFile::new()
            .pretty()
            .write_to_file(&json!({"a": 1}), &path)
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_write_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = write_raw(&dir, "over.json", r#"{"old": "value", "more": "stuff"}"#);
        JsonFile::new().write_to_file(&json!([]), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_write_rejects_scalar() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scalar.json");
        let result = JsonFile::new().write_to_file(&42, &path);
        assert!(matches!(result, Err(UtilError::InvalidJson { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_string_is_not_reencoded_as_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("string.json");
        // A pre-encoded string serializes as a JSON string, not an object.
        let result = JsonFile::new().write_to_file("{\"a\": 1}", &path);
        assert!(matches!(result, Err(UtilError::InvalidJson { .. })));
    }

    #[test]
    fn test_write_to_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no/such/dir/out.json");
        let result = JsonFile::new().write_to_file(&json!({}), &path);
        assert!(matches!(result, Err(UtilError::FileOpen { .. })));
    }
}
