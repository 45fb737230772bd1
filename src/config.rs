//! Configuration types for PDF-to-Markdown conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share a config across a whole batch run and to diff two runs
//! to understand why their outputs differ.

use crate::error::MarkpdfError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a conversion run (single document or batch).
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use markpdf::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .image_dir_name("assets")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Name of the per-document image directory. Default: `"assets"`.
    ///
    /// The Markdown file references images relatively
    /// (`![](./assets/<file>)`), so the output tree stays portable when
    /// moved as a whole. The name must be a single path component.
    pub image_dir_name: String,

    /// Separator inserted between pages in the assembled Markdown.
    /// Default: [`PageSeparator::None`] (pages joined with a blank line).
    pub page_separator: PageSeparator,

    /// PDF user password for encrypted documents. Applied to every document
    /// in a batch run. Default: none.
    pub password: Option<String>,

    /// Override for the derived output root.
    ///
    /// When unset, the root is computed from the input path
    /// (`<input_parent>/<input_name>_format`, see [`crate::paths`]).
    pub output_root: Option<PathBuf>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            image_dir_name: "assets".to_string(),
            page_separator: PageSeparator::default(),
            password: None,
            output_root: None,
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn image_dir_name(mut self, name: impl Into<String>) -> Self {
        self.config.image_dir_name = name.into();
        self
    }

    pub fn page_separator(mut self, sep: PageSeparator) -> Self {
        self.config.page_separator = sep;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.output_root = Some(root.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, MarkpdfError> {
        let c = &self.config;
        if c.image_dir_name.is_empty() {
            return Err(MarkpdfError::InvalidConfig(
                "Image directory name must not be empty".into(),
            ));
        }
        if c.image_dir_name.contains(['/', '\\']) {
            return Err(MarkpdfError::InvalidConfig(format!(
                "Image directory name must be a single path component, got '{}'",
                c.image_dir_name
            )));
        }
        Ok(self.config)
    }
}

/// How to separate pages in the assembled Markdown output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum PageSeparator {
    /// No separator; pages joined with "\n\n". (default)
    #[default]
    None,
    /// Horizontal rule: "\n\n---\n\n"
    HorizontalRule,
    /// HTML comment with page number: "<!-- page N -->"
    Comment,
    /// Custom string inserted between pages.
    Custom(String),
}

impl PageSeparator {
    /// Render the separator string for the given page number (1-indexed).
    pub fn render(&self, page_num: usize) -> String {
        match self {
            PageSeparator::None => "\n\n".to_string(),
            PageSeparator::HorizontalRule => "\n\n---\n\n".to_string(),
            PageSeparator::Comment => format!("\n\n<!-- page {} -->\n\n", page_num),
            PageSeparator::Custom(s) => format!("\n\n{}\n\n", s),
        }
    }
}
