use std::collections::HashMap;

use crate::{
    Attribute, AttributeId, Document, ElementId, Error, NodeData, NodeId, NodeKind, ShortRange,
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

const MAX_DEPTH: u32 = 1024;
const MAX_ELEMENTS: usize = 1_000_000;

impl Document {
    /// Parses a [`Document`] from a string.
    pub fn parse_str(text: &str) -> Result<Document, Error> {
        let xml_opt = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };

        let xml = roxmltree::Document::parse_with_options(text, xml_opt)?;
        parse(&xml)
    }

    /// Parses a [`Document`] from a [`roxmltree::Document`].
    pub fn parse_tree(xml: &roxmltree::Document) -> Result<Document, Error> {
        parse(xml)
    }

    fn append(&mut self, parent_id: NodeId, kind: NodeKind) -> NodeId {
        let new_child_id = NodeId::from(self.nodes.len());
        self.nodes.push(NodeData {
            parent: Some(parent_id),
            next_sibling: None,
            children: None,
            kind,
        });

        let last_child_id = self.nodes[parent_id.get_usize()].children.map(|(_, id)| id);

        if let Some(id) = last_child_id {
            self.nodes[id.get_usize()].next_sibling = Some(new_child_id);
        }

        self.nodes[parent_id.get_usize()].children = Some(
            if let Some((first_child_id, _)) = self.nodes[parent_id.get_usize()].children {
                (first_child_id, new_child_id)
            } else {
                (new_child_id, new_child_id)
            },
        );

        new_child_id
    }
}

fn parse(xml: &roxmltree::Document) -> Result<Document, Error> {
    let mut doc = Document {
        nodes: Vec::new(),
        attrs: Vec::new(),
        links: HashMap::new(),
        root_element: NodeId(0),
    };

    // Add a root node.
    doc.nodes.push(NodeData {
        parent: None,
        next_sibling: None,
        children: None,
        kind: NodeKind::Root,
    });

    let root_id = doc.root().id;
    match xml.root().children().find(|n| is_svg_element(*n)) {
        Some(node) => {
            doc.root_element = parse_xml_node(node, root_id, 0, &mut doc)?;
        }
        None => return Err(Error::NoRootNode),
    }

    // Collect all elements with `id` attribute.
    let mut links = HashMap::new();
    for node in doc.descendants() {
        if let Some(id) = node.attribute(AttributeId::Id) {
            if !links.contains_key(id) {
                links.insert(id.to_string(), node.id);
            }
        }
    }
    doc.links = links;

    Ok(doc)
}

fn is_svg_element(node: roxmltree::Node) -> bool {
    node.is_element() && matches!(node.tag_name().namespace(), None | Some(SVG_NS))
}

fn parse_xml_node(
    node: roxmltree::Node,
    parent_id: NodeId,
    depth: u32,
    doc: &mut Document,
) -> Result<NodeId, Error> {
    if depth > MAX_DEPTH {
        return Err(Error::NestingLimitReached);
    }

    let node_id = parse_svg_element(node, parent_id, doc)?;

    for child in node.children() {
        if !is_svg_element(child) {
            continue;
        }

        // Style sheets are not supported. Only inline declarations are.
        if child.tag_name().name() == "style" {
            continue;
        }

        parse_xml_node(child, node_id, depth + 1, doc)?;
    }

    Ok(node_id)
}

fn parse_svg_element(
    xml_node: roxmltree::Node,
    parent_id: NodeId,
    doc: &mut Document,
) -> Result<NodeId, Error> {
    let attrs_start_idx = doc.attrs.len();

    for attr in xml_node.attributes() {
        match attr.namespace() {
            None | Some(SVG_NS) | Some(XLINK_NS) => {}
            _ => continue,
        }

        let aid = match AttributeId::from_str(attr.name()) {
            Some(v) => v,
            None => continue,
        };

        // The `style` attribute will be split into attributes, so we don't need it.
        if aid == AttributeId::Style {
            continue;
        }

        // `xlink:href` and `href` are the same attribute. The first one wins.
        if aid == AttributeId::Href
            && doc.attrs[attrs_start_idx..].iter().any(|a| a.name == aid)
        {
            continue;
        }

        doc.attrs.push(Attribute {
            name: aid,
            value: attr.value().to_string(),
        });
    }

    // Split a `style` attribute. Declarations override attributes.
    if let Some(value) = xml_node.attribute("style") {
        for declaration in simplecss::DeclarationTokenizer::from(value) {
            let aid = match AttributeId::from_str(declaration.name) {
                Some(v) => v,
                None => {
                    log::debug!("Unknown style declaration '{}' skipped.", declaration.name);
                    continue;
                }
            };

            if matches!(aid, AttributeId::Id | AttributeId::Href | AttributeId::Style) {
                continue;
            }

            let value = declaration.value.to_string();
            match doc.attrs[attrs_start_idx..].iter_mut().find(|a| a.name == aid) {
                Some(attr) => attr.value = value,
                None => doc.attrs.push(Attribute { name: aid, value }),
            }
        }
    }

    if doc.nodes.len() > MAX_ELEMENTS {
        return Err(Error::ElementsLimitReached);
    }

    let name = xml_node.tag_name().name();
    let node_id = doc.append(
        parent_id,
        NodeKind::Element {
            tag_name: ElementId::from_str(name),
            name: name.to_string(),
            attributes: ShortRange::new(attrs_start_idx as u32, doc.attrs.len() as u32),
            text: xml_node.text().unwrap_or("").to_string(),
        },
    );

    Ok(node_id)
}

#[cfg(test)]
mod tests {
    use crate::{AttributeId, Document, ElementId};

    #[test]
    fn basic() {
        let doc = Document::parse_str(
            "<svg xmlns='http://www.w3.org/2000/svg' width='10'>
                <g id='g1'><rect x='1'/></g>
            </svg>",
        )
        .unwrap();

        let root = doc.root_element();
        assert!(root.is_root());
        assert_eq!(root.tag_name(), Some(ElementId::Svg));
        assert_eq!(root.attribute(AttributeId::Width), Some("10"));

        let g = doc.element_by_id("g1").unwrap();
        assert!(!g.is_root());
        assert_eq!(g.parent_element(), Some(root));

        let rect = g.children().next().unwrap();
        assert_eq!(rect.tag_name(), Some(ElementId::Rect));
        assert_eq!(rect.attribute(AttributeId::X), Some("1"));
    }

    #[test]
    fn no_namespace() {
        let doc = Document::parse_str("<svg><circle r='5'/></svg>").unwrap();
        let circle = doc.root_element().first_child().unwrap();
        assert_eq!(circle.tag_name(), Some(ElementId::Circle));
    }

    #[test]
    fn unknown_elements_are_kept() {
        let doc = Document::parse_str("<svg><switch><rect/></switch></svg>").unwrap();
        let switch = doc.root_element().first_child().unwrap();
        assert_eq!(switch.tag_name(), None);
        assert_eq!(switch.tag_name_str(), "switch");
        assert_eq!(
            switch.first_child().unwrap().tag_name(),
            Some(ElementId::Rect)
        );
    }

    #[test]
    fn foreign_elements_are_skipped() {
        let doc = Document::parse_str(
            "<svg xmlns='http://www.w3.org/2000/svg' xmlns:x='http://example.com'>
                <x:item/><style>rect {}</style><rect/>
            </svg>",
        )
        .unwrap();

        let names: Vec<_> = doc.root_element().children().map(|n| n.tag_name()).collect();
        assert_eq!(names, vec![Some(ElementId::Rect)]);
    }

    #[test]
    fn style_overrides_attributes() {
        let doc = Document::parse_str(
            "<svg><rect fill='red' style='fill: green; stroke-width:2; unknown: 1'/></svg>",
        )
        .unwrap();

        let rect = doc.root_element().first_child().unwrap();
        assert_eq!(rect.attribute(AttributeId::Fill), Some("green"));
        assert_eq!(rect.attribute(AttributeId::StrokeWidth), Some("2"));
        assert!(!rect.has_attribute(AttributeId::Style));
    }

    #[test]
    fn xlink_href() {
        let doc = Document::parse_str(
            "<svg xmlns:xlink='http://www.w3.org/1999/xlink'>
                <rect id='r'/><use xlink:href='#r'/>
            </svg>",
        )
        .unwrap();

        let use_node = doc.root_element().last_child().unwrap();
        assert_eq!(use_node.attribute(AttributeId::Href), Some("#r"));
    }

    #[test]
    fn leading_text() {
        let doc = Document::parse_str("<svg><text>Hello<tspan>world</tspan>!</text></svg>")
            .unwrap();
        let text = doc.root_element().first_child().unwrap();
        assert_eq!(text.text(), "Hello");
        assert_eq!(text.first_child().unwrap().text(), "world");
    }

    #[test]
    fn duplicated_ids() {
        let doc = Document::parse_str("<svg><g id='a' x='1'/><g id='a' x='2'/></svg>").unwrap();
        assert_eq!(
            doc.element_by_id("a").unwrap().attribute(AttributeId::X),
            Some("1")
        );
    }

    #[test]
    fn nesting_limit() {
        let mut text = String::new();
        for _ in 0..1100 {
            text.push_str("<g>");
        }
        for _ in 0..1100 {
            text.push_str("</g>");
        }

        let text = format!("<svg>{}</svg>", text);
        assert_eq!(
            Document::parse_str(&text).unwrap_err().to_string(),
            "the maximum nesting depth of SVG elements has been reached"
        );
    }

    #[test]
    fn no_root() {
        let doc = Document::parse_str("<x:svg xmlns:x='http://example.com'/>");
        assert_eq!(
            doc.unwrap_err().to_string(),
            "the document does not have a root node"
        );
    }
}
