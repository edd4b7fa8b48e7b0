use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The subset of html tags that the converter emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HtmlTag {
    #[serde(rename = "table")]
    Table,
    #[serde(rename = "tr")]
    TableRow,
    #[serde(rename = "th")]
    TableHeader,
    #[serde(rename = "td")]
    TableData,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentMatchType {
    String(String),
    Element(Box<Element>),
    Content(Vec<ContentMatchType>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Start,
    End,
    Left,
    Right,
    Center,
    Justify,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredContentStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
}

/// One structured-content node.
///
/// Optional attributes are omitted from the serialized object entirely,
/// so an element built with [`ContentAttr::default`] serializes as just
/// `{"tag": …, "content": …}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: HtmlTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentMatchType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StructuredContentStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<IndexMap<String, String>>,
}

/// Attributes shared by the element constructors below.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentAttr {
    pub text_align: Option<TextAlign>,
    pub data: Option<IndexMap<String, String>>,
}

impl ContentAttr {
    pub fn aligned(text_align: TextAlign) -> Self {
        Self {
            text_align: Some(text_align),
            data: None,
        }
    }

    pub fn with_data(key: &str, value: &str) -> Self {
        Self {
            text_align: None,
            data: Some(IndexMap::from([(key.to_string(), value.to_string())])),
        }
    }
}

impl Element {
    fn new(tag: HtmlTag, attr: ContentAttr, content: ContentMatchType) -> Self {
        let style = attr.text_align.map(|text_align| StructuredContentStyle {
            text_align: Some(text_align),
        });
        Self {
            tag,
            content: Some(content),
            style,
            data: attr.data,
        }
    }

    pub fn table(attr: ContentAttr, rows: Vec<Element>) -> Self {
        Self::new(HtmlTag::Table, attr, elements(rows))
    }

    pub fn table_row(attr: ContentAttr, cells: Vec<Element>) -> Self {
        Self::new(HtmlTag::TableRow, attr, elements(cells))
    }

    pub fn table_head_cell(attr: ContentAttr, text: impl Into<String>) -> Self {
        Self::new(HtmlTag::TableHeader, attr, ContentMatchType::String(text.into()))
    }

    pub fn table_cell(attr: ContentAttr, text: impl Into<String>) -> Self {
        Self::new(HtmlTag::TableData, attr, ContentMatchType::String(text.into()))
    }

    /// Child elements, if the content is an element list.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        let children: &[ContentMatchType] = match &self.content {
            Some(ContentMatchType::Content(children)) => children,
            _ => &[],
        };
        children.iter().filter_map(|child| match child {
            ContentMatchType::Element(element) => Some(element.as_ref()),
            _ => None,
        })
    }

    /// Text content, if the content is a plain string.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Some(ContentMatchType::String(text)) => Some(text.as_str()),
            _ => None,
        }
    }
}

fn elements(children: Vec<Element>) -> ContentMatchType {
    ContentMatchType::Content(
        children
            .into_iter()
            .map(|e| ContentMatchType::Element(Box::new(e)))
            .collect(),
    )
}

/// The object holding a structured glossary item.
///
/// This is _always_ `"type": "structured-content"` in the serialized form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredContent {
    #[serde(rename = "type")]
    content_type: String,
    pub content: ContentMatchType,
}

impl StructuredContent {
    pub const CONTENT_TYPE: &'static str = "structured-content";

    pub fn new(element: Element) -> Self {
        Self {
            content_type: Self::CONTENT_TYPE.to_string(),
            content: ContentMatchType::Element(Box::new(element)),
        }
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The root element, if the content is a single element.
    pub fn element(&self) -> Option<&Element> {
        match &self.content {
            ContentMatchType::Element(element) => Some(element.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod structured_content_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn empty_attr_omits_style_and_data() {
        let cell = Element::table_head_cell(ContentAttr::default(), "");
        assert_eq!(
            serde_json::to_value(&cell).unwrap(),
            json!({ "tag": "th", "content": "" })
        );
    }

    #[test]
    fn serializes_nested_table() {
        let row = Element::table_row(
            ContentAttr::default(),
            vec![Element::table_cell(ContentAttr::aligned(TextAlign::Center), "★")],
        );
        let table = Element::table(ContentAttr::with_data("content", "formsTable"), vec![row]);
        let content = StructuredContent::new(table);
        assert_eq!(
            serde_json::to_value(&content).unwrap(),
            json!({
                "type": "structured-content",
                "content": {
                    "tag": "table",
                    "content": [{
                        "tag": "tr",
                        "content": [{ "tag": "td", "content": "★", "style": { "textAlign": "center" } }]
                    }],
                    "data": { "content": "formsTable" }
                }
            })
        );
    }

    #[test]
    fn deserializes_back() {
        let json = r#"{"type":"structured-content","content":{"tag":"tr","content":[{"tag":"th","content":"x"}]}}"#;
        let content: StructuredContent = serde_json::from_str(json).unwrap();
        let row = content.element().unwrap();
        assert_eq!(row.tag, HtmlTag::TableRow);
        assert_eq!(row.children().next().unwrap().text(), Some("x"));
    }
}
