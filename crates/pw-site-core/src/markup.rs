//! Minimal element tree produced by the renderers.
//!
//! Attributes and inline styles keep insertion order so the DOM builder and
//! the HTML serializer emit them the same way.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub styles: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            attrs: Vec::new(),
            styles: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn style(mut self, property: &str, value: &str) -> Self {
        self.styles.push((property.to_owned(), value.to_owned()));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.children.push(Node::Text(text.to_owned()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    /// Concatenated text of all descendants, like DOM `textContent`.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Depth-first search over this element and its descendants.
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_tag(self, tag, &mut found);
        found
    }

    /// Serialized `style` attribute value, empty when no inline styles are set.
    pub fn style_attr(&self) -> String {
        self.styles
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_html(self, &mut out);
        out
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => collect_text(e, out),
        }
    }
}

fn collect_tag<'a>(el: &'a Element, tag: &str, found: &mut Vec<&'a Element>) {
    if el.tag == tag {
        found.push(el);
    }
    for child in &el.children {
        if let Node::Element(e) = child {
            collect_tag(e, tag, found);
        }
    }
}

const VOID_TAGS: &[&str] = &["img", "br", "hr", "input"];

fn write_html(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attrs {
        if value.is_empty() && name == "allowfullscreen" {
            out.push_str(&format!(" {name}"));
        } else {
            out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
        }
    }
    if !el.styles.is_empty() {
        out.push_str(&format!(" style=\"{}\"", escape_html(&el.style_attr())));
    }
    out.push('>');
    if VOID_TAGS.contains(&el.tag.as_str()) {
        return;
    }
    for child in &el.children {
        match child {
            Node::Text(t) => out.push_str(&escape_html(t)),
            Node::Element(e) => write_html(e, out),
        }
    }
    out.push_str(&format!("</{}>", el.tag));
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
