use std::path::{Component, Path};

use crate::error::{Error, Result};

/// Extension trait for Path to provide convenient string conversion methods
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path contains invalid Unicode characters.
    ///
    /// # Examples
    /// ```
    /// use next_cli::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("test");
    /// assert_eq!(path.to_str_checked().unwrap(), "test");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// Joins the normal components of a relative path with `/`, independent of
    /// the host separator. File map keys are always in this form.
    ///
    /// # Examples
    /// ```
    /// use next_cli::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("src").join("main.js");
    /// assert_eq!(path.to_slash_string().unwrap(), "src/main.js");
    /// ```
    fn to_slash_string(&self) -> Result<String>;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| Error::InvalidPath(self.to_path_buf()))
    }

    fn to_slash_string(&self) -> Result<String> {
        let mut segments = Vec::new();
        for component in self.components() {
            if let Component::Normal(segment) = component {
                let segment = segment
                    .to_str()
                    .ok_or_else(|| Error::InvalidPath(self.to_path_buf()))?;
                segments.push(segment);
            }
        }
        Ok(segments.join("/"))
    }
}
