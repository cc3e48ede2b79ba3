use crate::error::Result;
use crate::ioutils::FileContent;
use crate::renderer::binary::is_binary;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    /// * `template_name` - Optional name for the template (used in error messages)
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        template_name: Option<&str>,
    ) -> Result<String>;

    /// Renders raw file bytes. Binary content passes through untouched,
    /// text content is rendered with `render`.
    fn render_bytes(
        &self,
        bytes: Vec<u8>,
        context: &serde_json::Value,
        template_name: &str,
    ) -> Result<FileContent> {
        if is_binary(&bytes) {
            return Ok(FileContent::Binary(bytes));
        }
        match String::from_utf8(bytes) {
            Ok(text) => {
                Ok(FileContent::Text(self.render(&text, context, Some(template_name))?))
            }
            Err(e) => Ok(FileContent::Binary(e.into_bytes())),
        }
    }
}
