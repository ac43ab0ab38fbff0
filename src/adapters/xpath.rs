use crate::domain::ports::DocumentTree;
use crate::utils::error::{MensaError, Result};
use regex::Regex;
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::OnceLock;
use sxd_document::dom::Document;
use sxd_document::Package;
use sxd_xpath::nodeset::Node;
use sxd_xpath::{Context, Factory, Value, XPath};

pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

fn doctype() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // quoted ids may contain '>' and the internal subset '[...]' may too
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<!DOCTYPE(?:"[^"]*"|'[^']*'|\[.*?\]|[^"'\[>])*>"#)
            .expect("doctype pattern is valid")
    })
}

/// Owns the parsed package; queries run through a borrowed [`XPathTree`].
pub struct XmlDocument {
    package: Package,
}

impl XmlDocument {
    /// The document type declaration is dropped before parsing: sxd-document
    /// rejects PUBLIC identifiers, and xmllint and tidy always emit one.
    pub fn parse(xml: &str) -> Result<Self> {
        let xml = doctype().replace(xml, "");
        let package = sxd_document::parser::parse(&xml).map_err(|e| MensaError::DocumentError {
            message: format!("not well-formed XML: {:?}", e),
        })?;
        Ok(Self { package })
    }

    pub fn tree(&self) -> XPathTree<'_> {
        self.tree_with_namespaces(&[])
    }

    /// `xhtml` is always bound; `namespaces` adds or overrides prefixes.
    pub fn tree_with_namespaces(&self, namespaces: &[(String, String)]) -> XPathTree<'_> {
        let mut context = Context::new();
        context.set_namespace("xhtml", XHTML_NS);
        for (prefix, uri) in namespaces {
            context.set_namespace(prefix, uri);
        }
        XPathTree {
            document: self.package.as_document(),
            context,
            factory: Factory::new(),
            compiled: RefCell::new(HashMap::new()),
        }
    }
}

pub struct XPathTree<'d> {
    document: Document<'d>,
    context: Context<'d>,
    factory: Factory,
    // profiles evaluate the same handful of queries for every row
    compiled: RefCell<HashMap<String, XPath>>,
}

impl<'d> XPathTree<'d> {
    fn run(&self, from: Node<'d>, query: &str) -> Result<Value<'d>> {
        let mut compiled = self.compiled.borrow_mut();
        let xpath = match compiled.entry(query.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let xpath = self
                    .factory
                    .build(query)
                    .map_err(|e| MensaError::query(query, e))?
                    .ok_or_else(|| MensaError::query(query, "empty expression"))?;
                tracing::trace!("compiled query {}", query);
                entry.insert(xpath)
            }
        };
        xpath
            .evaluate(&self.context, from)
            .map_err(|e| MensaError::query(query, e))
    }
}

impl<'d> DocumentTree for XPathTree<'d> {
    type Node = Node<'d>;

    fn root(&self) -> Node<'d> {
        self.document.root().into()
    }

    fn select(&self, from: Node<'d>, query: &str) -> Result<Vec<Node<'d>>> {
        match self.run(from, query)? {
            Value::Nodeset(nodes) => Ok(nodes.document_order()),
            other => Err(MensaError::query(
                query,
                format!("expected a node set, got {:?}", other),
            )),
        }
    }

    fn evaluate(&self, from: Node<'d>, query: &str) -> Result<String> {
        Ok(self.run(from, query)?.string())
    }

    fn text(&self, node: Node<'d>) -> String {
        node.string_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html xmlns="http://www.w3.org/1999/xhtml"><body>
<div class="day"><a>Montag</a><p>eins</p><p>zwei</p><img alt="vegan"/></div>
<div class="day"><a>Dienstag</a></div>
</body></html>"#;

    #[test]
    fn test_select_returns_document_order() {
        let doc = XmlDocument::parse(PAGE).unwrap();
        let tree = doc.tree();
        let days = tree
            .select(tree.root(), "//xhtml:div[@class='day']")
            .unwrap();
        assert_eq!(days.len(), 2);
        let labels: Vec<String> = days
            .iter()
            .map(|d| tree.evaluate(*d, "string(./xhtml:a)").unwrap())
            .collect();
        assert_eq!(labels, vec!["Montag", "Dienstag"]);
    }

    #[test]
    fn test_evaluate_node_set_takes_first_node() {
        let doc = XmlDocument::parse(PAGE).unwrap();
        let tree = doc.tree();
        let day = tree.select(tree.root(), "//xhtml:div").unwrap()[0];
        assert_eq!(tree.evaluate(day, "./xhtml:p").unwrap(), "eins");
        assert_eq!(tree.evaluate(day, "./xhtml:img/@alt").unwrap(), "vegan");
        assert_eq!(tree.evaluate(day, "./xhtml:table").unwrap(), "");
    }

    #[test]
    fn test_text_of_attribute_and_text_nodes() {
        let doc = XmlDocument::parse(PAGE).unwrap();
        let tree = doc.tree();
        let texts = tree.select(tree.root(), "//xhtml:p/text()").unwrap();
        let values: Vec<String> = texts.iter().map(|t| tree.text(*t)).collect();
        assert_eq!(values, vec!["eins", "zwei"]);
    }

    #[test]
    fn test_select_rejects_scalar_result() {
        let doc = XmlDocument::parse(PAGE).unwrap();
        let tree = doc.tree();
        let err = tree.select(tree.root(), "count(//xhtml:p)").unwrap_err();
        assert!(matches!(err, MensaError::QueryError { .. }));
    }

    #[test]
    fn test_invalid_query_is_reported() {
        let doc = XmlDocument::parse(PAGE).unwrap();
        let tree = doc.tree();
        assert!(tree.evaluate(tree.root(), "//[").is_err());
    }

    #[test]
    fn test_empty_query_is_query_error() {
        let doc = XmlDocument::parse(PAGE).unwrap();
        let tree = doc.tree();
        assert!(matches!(
            tree.evaluate(tree.root(), ""),
            Err(MensaError::QueryError { .. })
        ));
    }

    #[test]
    fn test_xmllint_html_output_parses() {
        let doc = XmlDocument::parse(
            r#"<?xml version="1.0" standalone="yes"?>
<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.0 Transitional//EN" "http://www.w3.org/TR/REC-html40/loose.dtd">
<html><head><meta http-equiv="Content-Type" content="text/html; charset=UTF-8"/></head><body><p>Suppe</p></body></html>
"#,
        )
        .unwrap();
        let tree = doc.tree();
        assert_eq!(tree.evaluate(tree.root(), "string(//p)").unwrap(), "Suppe");
    }

    #[test]
    fn test_tidy_xhtml_output_parses() {
        let doc = XmlDocument::parse(
            r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN"
    "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
<meta name="generator" content="HTML Tidy for HTML5 for Linux version 5.6.0" />
<title></title>
</head>
<body><p>Suppe</p></body>
</html>
"#,
        )
        .unwrap();
        let tree = doc.tree();
        assert_eq!(
            tree.evaluate(tree.root(), "string(//xhtml:p)").unwrap(),
            "Suppe"
        );
    }

    #[test]
    fn test_doctype_variants_are_dropped() {
        for xml in [
            "<!DOCTYPE html><html><p>Suppe</p></html>",
            r#"<!DOCTYPE menu [ <!ENTITY e "x>y"> ]><html><p>Suppe</p></html>"#,
            r#"<!DOCTYPE html SYSTEM "a>b.dtd"><html><p>Suppe</p></html>"#,
        ] {
            let doc = XmlDocument::parse(xml).unwrap();
            let tree = doc.tree();
            assert_eq!(tree.evaluate(tree.root(), "string(//p)").unwrap(), "Suppe");
        }
    }

    #[test]
    fn test_extra_namespace_prefix() {
        let doc = XmlDocument::parse(r#"<m:menu xmlns:m="urn:menu"><m:item>Suppe</m:item></m:menu>"#)
            .unwrap();
        let tree = doc.tree_with_namespaces(&[("m".to_string(), "urn:menu".to_string())]);
        assert_eq!(tree.evaluate(tree.root(), "string(//m:item)").unwrap(), "Suppe");
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            XmlDocument::parse("<html><body></html>"),
            Err(MensaError::DocumentError { .. })
        ));
    }
}
