//! VNode → HTML serializer.

use crate::vdom::VNode;

/// Options for HTML output
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

impl HtmlOptions {
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }
}

struct Context {
    options: HtmlOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize nodes as an HTML fragment
pub fn to_html(nodes: &[VNode], options: HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    for node in nodes {
        write_node(node, &mut ctx);
    }
    ctx.get_output()
}

/// Serialize nodes as a standalone HTML page
pub fn to_document(title: &str, nodes: &[VNode], options: HtmlOptions) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(title)));
    ctx.dedent();
    ctx.add_line("</head>");

    ctx.add_line("<body>");
    ctx.indent();
    for node in nodes {
        write_node(node, &mut ctx);
    }
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    ctx.get_output()
}

fn write_node(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
            ..
        } => {
            if ctx.options.pretty {
                ctx.add_indent();
            }
            ctx.add(&format!("<{}", tag));

            for (name, value) in attributes {
                ctx.add(&format!(" {}=\"{}\"", name, escape_html(value)));
            }

            if !styles.is_empty() {
                let style = styles
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .collect::<Vec<_>>()
                    .join("; ");
                ctx.add(&format!(" style=\"{}\"", escape_html(&style)));
            }

            if children.is_empty() && is_self_closing(tag) {
                ctx.add(" />");
                if ctx.options.pretty {
                    ctx.add("\n");
                }
                return;
            }

            ctx.add(">");

            let block = has_element_children(children);
            if !children.is_empty() {
                if ctx.options.pretty && block {
                    ctx.add("\n");
                }
                ctx.indent();
                for child in children {
                    if block {
                        write_node(child, ctx);
                    } else {
                        write_inline(child, ctx);
                    }
                }
                ctx.dedent();
                if ctx.options.pretty && block {
                    ctx.add_indent();
                }
            }

            ctx.add(&format!("</{}>", tag));
            if ctx.options.pretty {
                ctx.add("\n");
            }
        }

        VNode::Text { .. } | VNode::Raw { .. } | VNode::Comment { .. } => {
            if ctx.options.pretty {
                ctx.add_indent();
                write_inline(node, ctx);
                ctx.add("\n");
            } else {
                write_inline(node, ctx);
            }
        }
    }
}

fn write_inline(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Text { content } => ctx.add(&escape_html(content)),
        VNode::Raw { content } => ctx.add(content),
        VNode::Comment { content } => {
            ctx.add(&format!("<!-- {} -->", content.replace("--", "- -")));
        }
        VNode::Element { .. } => write_node(node, ctx),
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Raw markup is laid out like an element so it gets its own line
fn has_element_children(children: &[VNode]) -> bool {
    children
        .iter()
        .any(|child| matches!(child, VNode::Element { .. } | VNode::Raw { .. }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_and_styles() {
        let node = VNode::element("a")
            .with_attr("href", "/store/shop/products")
            .with_style("color", "#ffffff")
            .with_child(VNode::text("Shop Now"));

        let html = to_html(&[node], HtmlOptions::compact());
        assert_eq!(
            html,
            "<a href=\"/store/shop/products\" style=\"color: #ffffff\">Shop Now</a>"
        );
    }

    #[test]
    fn test_text_is_escaped_and_raw_is_not() {
        let node = VNode::element("div")
            .with_child(VNode::text("<b>"))
            .with_child(VNode::element("section").with_child(VNode::raw("<b>bold</b>")));

        let html = to_html(&[node], HtmlOptions::compact());
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains("<b>bold</b>"));
    }

    #[test]
    fn test_self_closing() {
        let node = VNode::element("img").with_attr("src", "a.png");
        assert_eq!(
            to_html(&[node], HtmlOptions::compact()),
            "<img src=\"a.png\" />"
        );
    }

    #[test]
    fn test_pretty_document() {
        let node = VNode::element("main").with_child(VNode::element("p").with_child(VNode::text("Hi")));
        let html = to_document("Shop", &[node], HtmlOptions::default());

        assert!(html.starts_with("<!DOCTYPE html>\n"));
        assert!(html.contains("<title>Shop</title>"));
        assert!(html.contains("      <p>Hi</p>\n"));
    }
}
