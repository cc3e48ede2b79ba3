use super::filters::*;
use crate::{
    constants::syntax,
    error::{Error, Result},
    renderer::interface::TemplateRenderer,
};
use minijinja::{syntax::SyntaxConfig, AutoEscape, Environment};

const DEFAULT_TEMPLATE_NAME: &str = "temp";

/// MiniJinja-based template rendering engine.
///
/// Templates use ERB-style delimiters: `<%= expr %>` for interpolation,
/// `<% if cond %>...<% endif %>` for control flow and `<%# ... %>` for comments.
#[derive(Clone)]
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new renderer with the project delimiters and filters installed.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();

        let syntax = SyntaxConfig::builder()
            .block_delimiters(syntax::BLOCK_START, syntax::BLOCK_END)
            .variable_delimiters(syntax::VARIABLE_START, syntax::VARIABLE_END)
            .comment_delimiters(syntax::COMMENT_START, syntax::COMMENT_END)
            .build()?;
        env.set_syntax(syntax);

        // Generated files are written as-is, never HTML escaped.
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);

        env.add_filter("camel_case", to_camel_case);
        env.add_filter("kebab_case", to_kebab_case);
        env.add_filter("pascal_case", to_pascal_case);
        env.add_filter("screaming_snake_case", to_screaming_snake_case);
        env.add_filter("snake_case", to_snake_case);
        env.add_filter("train_case", to_train_case);
        env.add_filter("plural", to_plural);
        env.add_filter("singular", to_singular);
        env.add_filter("regex", regex_filter);
        env.add_filter("short_id", short_id_filter);

        Ok(Self { env })
    }

    fn render_internal(
        &self,
        template: &str,
        context: &serde_json::Value,
        template_name: Option<&str>,
    ) -> Result<String> {
        // Each call works on its own copy so no template outlives the render.
        let mut env = self.env.clone();
        let name = template_name.unwrap_or(DEFAULT_TEMPLATE_NAME).replace('\\', "/");
        let to_render_error =
            |source: minijinja::Error| Error::TemplateRenderError { name: name.clone(), source };

        env.add_template_owned(name.clone(), template.to_string())
            .map_err(to_render_error)?;
        let tmpl = env.get_template(&name).map_err(to_render_error)?;
        tmpl.render(context).map_err(to_render_error)
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        template_name: Option<&str>,
    ) -> Result<String> {
        self.render_internal(template, context, template_name)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::ioutils::FileContent;
    use crate::renderer::{interface::TemplateRenderer, MiniJinjaRenderer};
    use serde_json::json;

    fn render(template: &str, context: serde_json::Value) -> String {
        let renderer = MiniJinjaRenderer::new().unwrap();
        renderer.render(template, &context, None).unwrap()
    }

    #[test]
    fn interpolates_nested_values() {
        assert_eq!(render("KEY=<%= options.key %>", json!({"options": {"key": "abc"}})), "KEY=abc");
    }

    #[test]
    fn supports_conditionals() {
        let template = "<% if rootOptions.router %>router<% else %>no router<% endif %>";
        assert_eq!(render(template, json!({"rootOptions": {"router": true}})), "router");
        assert_eq!(render(template, json!({"rootOptions": {"router": false}})), "no router");
    }

    #[test]
    fn supports_loops() {
        let template = "<% for p in plugins %><%= p.name %>;<% endfor %>";
        let context = json!({"plugins": [{"name": "babel"}, {"name": "eslint"}]});
        assert_eq!(render(template, context), "babel;eslint;");
    }

    #[test]
    fn comments_are_dropped() {
        assert_eq!(render("a<%# note %>b", json!({})), "ab");
    }

    #[test]
    fn keeps_trailing_newline() {
        assert_eq!(render("name=<%= name %>\n", json!({"name": "demo"})), "name=demo\n");
    }

    #[test]
    fn does_not_escape_html() {
        assert_eq!(render("<%= tag %>", json!({"tag": "<div>"})), "<div>");
    }

    #[test]
    fn case_filters_are_available() {
        assert_eq!(render("<%= 'hello world' | kebab_case %>", json!({})), "hello-world");
        assert_eq!(render("<%= 'hello world' | pascal_case %>", json!({})), "HelloWorld");
    }

    #[test]
    fn malformed_control_flow_is_an_error() {
        let renderer = MiniJinjaRenderer::new().unwrap();
        let result = renderer.render("<% if x %>open", &json!({}), Some("src/App.vue"));
        match result {
            Err(Error::TemplateRenderError { name, .. }) => assert_eq!(name, "src/App.vue"),
            other => panic!("Expected TemplateRenderError, got {other:?}"),
        }
    }

    #[test]
    fn render_bytes_passes_binary_through() {
        let renderer = MiniJinjaRenderer::new().unwrap();
        let bytes = vec![0x00, 0x01, b'<', b'%', b'=', 0xff];
        let result = renderer.render_bytes(bytes.clone(), &json!({}), "favicon.ico").unwrap();
        assert_eq!(result, FileContent::Binary(bytes));
    }

    #[test]
    fn render_bytes_renders_text() {
        let renderer = MiniJinjaRenderer::new().unwrap();
        let result = renderer
            .render_bytes(b"<%= n %>".to_vec(), &json!({"n": 1}), "a.txt")
            .unwrap();
        assert_eq!(result, FileContent::Text("1".to_string()));
    }

    #[test]
    fn renders_are_independent() {
        let renderer = MiniJinjaRenderer::new().unwrap();
        renderer.render("first", &json!({}), Some("same")).unwrap();
        let second = renderer.render("second", &json!({}), Some("same")).unwrap();
        assert_eq!(second, "second");
    }
}
