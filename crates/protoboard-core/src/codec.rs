//! Markup+style codec for exported layouts.
//!
//! Export emits two paired text artifacts: a markup document whose root
//! container holds one tag per element, and a stylesheet with one
//! `#id` rule per element carrying its absolute geometry. Import parses
//! both synchronously with dedicated text parsers; geometry is read
//! straight from the style text, so there is no deferred stylesheet
//! barrier and no race.

use crate::element::{Element, ElementId, ElementKind};
use kurbo::{Point, Rect};
use std::collections::HashMap;

/// The two text artifacts produced by export. They are matched by the
/// `#id` selectors in `style` referring to tag ids in `markup`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupStylePair {
    pub markup: String,
    pub style: String,
}

/// Serialize elements (in store order) to a markup+style pair.
pub fn export(elements: &[Element]) -> MarkupStylePair {
    let mut children = String::new();
    let mut style = String::from(
        "/* Generated Styles */\n.ui-element { box-sizing: border-box; }\n",
    );

    for el in elements {
        let id = el.id.as_str();
        match el.kind {
            ElementKind::Input => {
                children.push_str(&format!(
                    "        <input id=\"{id}\" class=\"ui-element\" value=\"{}\">\n",
                    escape(&el.content)
                ));
            }
            _ => {
                let tag = el.kind.tag_name();
                children.push_str(&format!(
                    "        <{tag} id=\"{id}\" class=\"ui-element\">{}</{tag}>\n",
                    escape(&el.content)
                ));
            }
        }

        style.push_str(&format!(
            "#{id} {{\n    position: absolute;\n    left: {};\n    top: {};\n    \
             width: {};\n    height: {};\n    {}\n}}\n",
            px(el.rect.x0),
            px(el.rect.y0),
            px(el.rect.width()),
            px(el.rect.height()),
            kind_style(el.kind),
        ));
    }

    let markup = format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         \x20   <meta charset=\"UTF-8\">\n\
         \x20   <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         \x20   <title>Generated UI</title>\n\
         \x20   <link rel=\"stylesheet\" href=\"style.css\">\n\
         \x20   <style> body {{ margin: 0; height: 100vh; }} </style>\n\
         </head>\n\
         <body>\n\
         \x20   <div id=\"ui-container\" style=\"position: relative; width: 100%; height: 100%;\">\n\
         {children}\
         \x20   </div>\n\
         </body>\n\
         </html>\n"
    );

    MarkupStylePair { markup, style }
}

/// Decode a markup+style pair back into elements.
///
/// The root container's immediate children are reconstructed by tag
/// name, keeping their original ids. A child with no matching `#id`
/// style rule is dropped silently, as is a rule with no matching child;
/// a matching rule missing individual geometry properties defaults them
/// to zero. Malformed input never fails the import, it just yields
/// fewer elements.
pub fn import(markup: &str, style: &str) -> Vec<Element> {
    let rules = parse_style_rules(style);
    let mut elements = Vec::new();

    for child in parse_container_children(markup) {
        let Some(id) = child.id else {
            log::debug!("dropping <{}> child without id", child.tag);
            continue;
        };
        let Some(geom) = rules.get(&id) else {
            log::debug!("dropping {id}: no matching style rule");
            continue;
        };
        let rect = Rect::from_origin_size(
            Point::new(geom.left, geom.top),
            (geom.width, geom.height),
        );
        elements.push(Element::new(
            ElementId::from_string(id),
            ElementKind::from_tag(&child.tag),
            rect,
            child.content,
        ));
    }
    elements
}

fn kind_style(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Button => {
            "background-color: #6c5ce7; color: white; border: none; border-radius: 4px;"
        }
        ElementKind::Input => {
            "background-color: #2a2e37; color: white; border: 1px solid #333642; \
             border-radius: 4px; padding: 4px 8px;"
        }
        ElementKind::Text => "background: transparent; color: inherit; white-space: pre-wrap;",
    }
}

/// Format a whole-valued pixel length.
fn px(v: f64) -> String {
    format!("{}px", v.trunc() as i64)
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn unescape(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&amp;", "&")
}

/// One immediate child of the root container.
struct ParsedChild {
    tag: String,
    id: Option<String>,
    content: String,
}

/// Slice of the markup following the root container's opening tag.
/// Falls back to the first `<div` when no `ui-container` id is present.
fn container_content(markup: &str) -> Option<&str> {
    let open_end = markup
        .find("id=\"ui-container\"")
        .or_else(|| markup.find("<div"))
        .and_then(|pos| markup[pos..].find('>').map(|gt| pos + gt + 1))?;
    Some(&markup[open_end..])
}

fn parse_container_children(markup: &str) -> Vec<ParsedChild> {
    let Some(mut rest) = container_content(markup) else {
        return Vec::new();
    };
    let mut children = Vec::new();

    while let Some(lt) = rest.find('<') {
        rest = &rest[lt..];
        if rest.starts_with("</") {
            // Root container close: the flat child list ends here.
            break;
        }
        let name_len = rest[1..]
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len() - 1);
        if name_len == 0 {
            rest = &rest[1..];
            continue;
        }
        let tag = rest[1..1 + name_len].to_ascii_lowercase();
        let Some(gt) = rest.find('>') else { break };
        let attrs = &rest[1 + name_len..gt];
        let id = attr_value(attrs, "id");

        if tag == "input" {
            // Void tag: the value attribute is the content.
            let content = attr_value(attrs, "value")
                .map(|v| unescape(&v))
                .unwrap_or_default();
            children.push(ParsedChild { tag, id, content });
            rest = &rest[gt + 1..];
        } else {
            let inner = &rest[gt + 1..];
            let close = format!("</{tag}>");
            let Some(end) = inner.find(&close) else { break };
            let content = unescape(&inner[..end]);
            children.push(ParsedChild { tag, id, content });
            rest = &inner[end + close.len()..];
        }
    }
    children
}

/// Find a quoted attribute value inside a tag's attribute region.
fn attr_value(attrs: &str, name: &str) -> Option<String> {
    let needle = format!("{name}=\"");
    let mut base = 0;
    while let Some(pos) = attrs[base..].find(&needle) {
        let abs = base + pos;
        let preceded_ok = abs == 0 || attrs.as_bytes()[abs - 1].is_ascii_whitespace();
        if preceded_ok {
            let vstart = abs + needle.len();
            let vlen = attrs[vstart..].find('"')?;
            return Some(attrs[vstart..vstart + vlen].to_string());
        }
        base = abs + needle.len();
    }
    None
}

/// Geometry pulled from one `#id` style rule. Properties absent from
/// the rule stay at zero.
#[derive(Debug, Clone, Copy, Default)]
struct RuleGeometry {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

fn parse_style_rules(css: &str) -> HashMap<String, RuleGeometry> {
    let mut rules = HashMap::new();
    for block in css.split('}') {
        let Some((selector, decls)) = block.split_once('{') else {
            continue;
        };
        let Some(id) = selector.trim().strip_prefix('#') else {
            continue;
        };
        let mut geom = RuleGeometry::default();
        for decl in decls.split(';') {
            let Some((prop, value)) = decl.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match prop.trim() {
                "left" => geom.left = parse_px(value),
                "top" => geom.top = parse_px(value),
                "width" => geom.width = parse_px(value),
                "height" => geom.height = parse_px(value),
                _ => {}
            }
        }
        rules.insert(id.trim().to_string(), geom);
    }
    rules
}

fn parse_px(value: &str) -> f64 {
    value
        .strip_suffix("px")
        .unwrap_or(value)
        .trim()
        .parse()
        .unwrap_or(0.0)
}
