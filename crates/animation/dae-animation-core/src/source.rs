//! Array-backed value sources (`<source>` elements) and the flat source index.
//!
//! A source owns one typed array plus optional accessor metadata
//! (`<technique_common><accessor stride=".."><param name=".."/>`). Loaded sources
//! are shared as `Arc<ValueSource>`; inputs keep a handle, never a copy.

use std::str::FromStr;
use std::sync::Arc;

use dae_document_core::DocNode;
use indexmap::IndexMap;

use crate::error::LoadError;

/// Decoded array payload of a source.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceData {
    Float(Vec<f32>),
    Int(Vec<i64>),
    Bool(Vec<bool>),
    Name(Vec<String>),
    IdRef(Vec<String>),
}

impl SourceData {
    pub fn len(&self) -> usize {
        match self {
            SourceData::Float(v) => v.len(),
            SourceData::Int(v) => v.len(),
            SourceData::Bool(v) => v.len(),
            SourceData::Name(v) | SourceData::IdRef(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_floats(&self) -> Option<&[f32]> {
        match self {
            SourceData::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_names(&self) -> Option<&[String]> {
        match self {
            SourceData::Name(v) => Some(v),
            _ => None,
        }
    }

    /// Element tag the payload was read from.
    pub fn array_tag(&self) -> &'static str {
        match self {
            SourceData::Float(_) => "float_array",
            SourceData::Int(_) => "int_array",
            SourceData::Bool(_) => "bool_array",
            SourceData::Name(_) => "Name_array",
            SourceData::IdRef(_) => "IDREF_array",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValueSource {
    id: String,
    data: SourceData,
    stride: usize,
    params: Vec<String>,
}

impl ValueSource {
    /// Source with stride 1 and no named params.
    pub fn new(id: impl Into<String>, data: SourceData) -> Self {
        Self {
            id: id.into(),
            data,
            stride: 1,
            params: Vec::new(),
        }
    }

    pub fn with_accessor(mut self, stride: usize, params: Vec<String>) -> Self {
        self.stride = stride.max(1);
        self.params = params;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data(&self) -> &SourceData {
        &self.data
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Accessor param names in declaration order (unnamed params are empty strings).
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Number of whole elements (array length / stride).
    pub fn count(&self) -> usize {
        self.data.len() / self.stride
    }
}

/// Load one `<source>` element.
pub fn load_source<N: DocNode>(node: &N) -> Result<ValueSource, LoadError> {
    let id = node
        .attr_nonempty("id")
        .ok_or_else(|| LoadError::missing("source", "id"))?;
    let data = load_array(node)?;
    let source = ValueSource::new(id, data);

    let accessor = node
        .find("technique_common")
        .and_then(|technique| technique.find("accessor"));
    match accessor {
        Some(accessor) => {
            let (stride, params) = load_accessor(accessor)?;
            Ok(source.with_accessor(stride, params))
        }
        None => Ok(source),
    }
}

fn load_array<N: DocNode>(node: &N) -> Result<SourceData, LoadError> {
    for child in node.elements() {
        let data = match child.tag() {
            "float_array" => SourceData::Float(parse_tokens(child, "float_array")?),
            "int_array" => SourceData::Int(parse_tokens(child, "int_array")?),
            "bool_array" => SourceData::Bool(parse_bools(child)?),
            "Name_array" => SourceData::Name(words(child)),
            "IDREF_array" => SourceData::IdRef(words(child)),
            _ => continue,
        };
        check_count(child, &data)?;
        return Ok(data);
    }
    Err(LoadError::malformed("source", "no data array"))
}

fn words<N: DocNode>(node: &N) -> Vec<String> {
    node.text()
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

fn parse_tokens<N: DocNode, T: FromStr>(
    node: &N,
    element: &'static str,
) -> Result<Vec<T>, LoadError> {
    node.text()
        .unwrap_or_default()
        .split_whitespace()
        .map(|token| {
            token
                .parse()
                .map_err(|_| LoadError::malformed(element, format!("invalid value '{token}'")))
        })
        .collect()
}

fn parse_bools<N: DocNode>(node: &N) -> Result<Vec<bool>, LoadError> {
    node.text()
        .unwrap_or_default()
        .split_whitespace()
        .map(|token| match token {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(LoadError::malformed(
                "bool_array",
                format!("invalid value '{other}'"),
            )),
        })
        .collect()
}

fn check_count<N: DocNode>(node: &N, data: &SourceData) -> Result<(), LoadError> {
    let Some(raw) = node.attr("count") else {
        return Ok(());
    };
    let count: usize = raw
        .parse()
        .map_err(|_| LoadError::malformed(data.array_tag(), format!("invalid count '{raw}'")))?;
    if count != data.len() {
        return Err(LoadError::malformed(
            data.array_tag(),
            format!("count is {count} but {} values were read", data.len()),
        ));
    }
    Ok(())
}

fn load_accessor<N: DocNode>(node: &N) -> Result<(usize, Vec<String>), LoadError> {
    let stride = match node.attr("stride") {
        Some(raw) => match raw.parse::<usize>() {
            Ok(stride) if stride > 0 => stride,
            _ => return Err(LoadError::malformed("accessor", format!("invalid stride '{raw}'"))),
        },
        None => 1,
    };
    let params = node
        .find_all("param")
        .map(|param| param.attr("name").unwrap_or_default().to_owned())
        .collect();
    Ok((stride, params))
}

/// Every source loaded from a document, in document order.
///
/// This is a flat view: a later declaration of an id replaces the earlier one
/// here regardless of which branch declared it. Resolution never consults it.
#[derive(Clone, Debug, Default)]
pub struct SourceIndex {
    sources: IndexMap<String, Arc<ValueSource>>,
}

impl SourceIndex {
    pub(crate) fn insert(&mut self, source: Arc<ValueSource>) {
        self.sources.insert(source.id().to_owned(), source);
    }

    pub fn get(&self, id: &str) -> Option<&Arc<ValueSource>> {
        self.sources.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ValueSource>> {
        self.sources.values()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dae_document_core::Element;

    fn float_source(id: &str, text: &str) -> Element {
        Element::new("source")
            .with_attr("id", id)
            .with_child(Element::new("float_array").with_text(text))
    }

    #[test]
    fn loads_floats_with_accessor() {
        let node = float_source("xy", "0 1 2 3 4 5").with_child(
            Element::new("technique_common").with_child(
                Element::new("accessor")
                    .with_attr("stride", "2")
                    .with_child(Element::new("param").with_attr("name", "X"))
                    .with_child(Element::new("param").with_attr("name", "Y")),
            ),
        );
        let source = load_source(&node).unwrap();
        assert_eq!(source.id(), "xy");
        assert_eq!(source.stride(), 2);
        assert_eq!(source.count(), 3);
        assert_eq!(source.params(), ["X".to_string(), "Y".to_string()]);
        assert_eq!(source.data().as_floats().unwrap()[5], 5.0);
    }

    #[test]
    fn names_and_bools() {
        let node = Element::new("source")
            .with_attr("id", "interp")
            .with_child(Element::new("Name_array").with_text("LINEAR  STEP\nBEZIER"));
        let source = load_source(&node).unwrap();
        assert_eq!(source.data().as_names().unwrap().len(), 3);

        let node = Element::new("source")
            .with_attr("id", "flags")
            .with_child(Element::new("bool_array").with_text("true 0 1 false"));
        assert_eq!(
            load_source(&node).unwrap().data(),
            &SourceData::Bool(vec![true, false, true, false])
        );
    }

    #[test]
    fn missing_id_is_missing_attribute() {
        let node = Element::new("source").with_child(Element::new("float_array"));
        assert_eq!(
            load_source(&node).unwrap_err(),
            LoadError::missing("source", "id")
        );
    }

    #[test]
    fn bad_number_and_count_mismatch_are_malformed() {
        let err = load_source(&float_source("t", "0 zero 1")).unwrap_err();
        assert!(matches!(err, LoadError::MalformedData { element: "float_array", .. }));

        let node = Element::new("source").with_attr("id", "t").with_child(
            Element::new("float_array")
                .with_attr("count", "4")
                .with_text("0 1 2"),
        );
        assert!(matches!(
            load_source(&node).unwrap_err(),
            LoadError::MalformedData { .. }
        ));
    }

    #[test]
    fn source_without_array_is_malformed() {
        let node = Element::new("source").with_attr("id", "t");
        assert_eq!(
            load_source(&node).unwrap_err(),
            LoadError::malformed("source", "no data array")
        );
    }

    #[test]
    fn zero_stride_is_rejected() {
        let node = float_source("t", "1 2").with_child(
            Element::new("technique_common")
                .with_child(Element::new("accessor").with_attr("stride", "0")),
        );
        assert!(matches!(
            load_source(&node).unwrap_err(),
            LoadError::MalformedData { element: "accessor", .. }
        ));
    }
}
