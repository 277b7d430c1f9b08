//! Traversal paths
//!
//! Selectors that address levels of a nested [`DocumentArray`]. Each
//! character is one step: `r` is the root level and may only lead the
//! selector, `c` descends into chunks and `m` into matches. A step may
//! carry a `[start:end]` slice applied to every sibling list it reaches.
//!
//! ```ignore
//! let paths: TraversalPaths = "r,cc".parse()?;   // roots, then grandchildren
//! let first_chunks: TraversalPath = "c[:1]".parse()?;
//! ```

use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::document::{Document, DocumentArray};
use crate::error::{EncoderError, Result};

fn step_regex() -> &'static Regex {
    static STEP: OnceLock<Regex> = OnceLock::new();
    STEP.get_or_init(|| {
        Regex::new(r"^([rcm])(?:\[\s*(\d*)\s*:\s*(\d*)\s*\])?").expect("step pattern is valid")
    })
}

/// Half-open `[start:end]` window over a sibling list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slice {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl Slice {
    fn range(&self, len: usize) -> Range<usize> {
        let end = self.end.map_or(len, |e| e.min(len));
        let start = self.start.unwrap_or(0).min(end);
        start..end
    }
}

/// Edge followed when descending one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Chunks,
    Matches,
}

impl Edge {
    fn children(self, doc: &Document) -> &[Document] {
        match self {
            Self::Chunks => &doc.chunks,
            Self::Matches => &doc.matches,
        }
    }
}

/// Location of one document inside a [`DocumentArray`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocAddress {
    pub root: usize,
    pub hops: Vec<(Edge, usize)>,
}

impl DocAddress {
    fn child(&self, edge: Edge, index: usize) -> Self {
        let mut hops = self.hops.clone();
        hops.push((edge, index));
        Self {
            root: self.root,
            hops,
        }
    }

    /// Nesting depth (0 for root documents)
    pub fn depth(&self) -> usize {
        self.hops.len()
    }
}

impl DocumentArray {
    /// Resolve an address produced by [`TraversalPath::locate`]
    pub fn get_at(&self, addr: &DocAddress) -> Option<&Document> {
        let mut doc = self.get(addr.root)?;
        for (edge, index) in &addr.hops {
            doc = edge.children(doc).get(*index)?;
        }
        Some(doc)
    }

    /// Mutable counterpart of [`DocumentArray::get_at`]
    pub fn get_at_mut(&mut self, addr: &DocAddress) -> Option<&mut Document> {
        let mut doc = self.get_mut(addr.root)?;
        for (edge, index) in &addr.hops {
            doc = match edge {
                Edge::Chunks => doc.chunks.get_mut(*index)?,
                Edge::Matches => doc.matches.get_mut(*index)?,
            };
        }
        Some(doc)
    }
}

/// A single selector such as `r`, `cc` or `r[:2]m`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalPath {
    raw: String,
    root: Slice,
    descent: Vec<(Edge, Slice)>,
}

impl TraversalPath {
    /// Root level only
    pub fn root() -> Self {
        Self {
            raw: "r".to_string(),
            root: Slice::default(),
            descent: vec![],
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Addresses of every selected document, in document order
    pub fn locate(&self, docs: &DocumentArray) -> Vec<DocAddress> {
        let mut frontier: Vec<(DocAddress, &Document)> = self
            .root
            .range(docs.len())
            .filter_map(|i| {
                let addr = DocAddress {
                    root: i,
                    hops: vec![],
                };
                docs.get(i).map(|doc| (addr, doc))
            })
            .collect();

        for (edge, slice) in &self.descent {
            frontier = frontier
                .into_iter()
                .flat_map(|(addr, doc)| {
                    let children = edge.children(doc);
                    slice
                        .range(children.len())
                        .map(move |i| (addr.child(*edge, i), &children[i]))
                        .collect::<Vec<_>>()
                })
                .collect();
        }

        frontier.into_iter().map(|(addr, _)| addr).collect()
    }
}

fn parse_bound(raw: Option<regex::Match<'_>>, selector: &str) -> Result<Option<usize>> {
    match raw.map(|m| m.as_str()).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(digits) => digits
            .parse()
            .map(Some)
            .map_err(|_| EncoderError::invalid_path(selector)),
    }
}

impl FromStr for TraversalPath {
    type Err = EncoderError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix('@').unwrap_or(trimmed);
        if body.is_empty() {
            return Err(EncoderError::invalid_path(s));
        }

        let mut root = Slice::default();
        let mut descent = Vec::new();
        let mut rest = body;
        let mut first = true;

        while !rest.is_empty() {
            let caps = step_regex()
                .captures(rest)
                .ok_or_else(|| EncoderError::invalid_path(s))?;
            let slice = Slice {
                start: parse_bound(caps.get(2), s)?,
                end: parse_bound(caps.get(3), s)?,
            };
            match &caps[1] {
                "r" if first => root = slice,
                "r" => return Err(EncoderError::invalid_path(s)),
                "c" => descent.push((Edge::Chunks, slice)),
                _ => descent.push((Edge::Matches, slice)),
            }
            first = false;
            let consumed = caps.get(0).map_or(rest.len(), |m| m.end());
            rest = &rest[consumed..];
        }

        Ok(Self {
            raw: body.to_string(),
            root,
            descent,
        })
    }
}

impl fmt::Display for TraversalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Ordered list of selectors; results are concatenated in list order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalPaths(Vec<TraversalPath>);

impl TraversalPaths {
    pub fn new(paths: Vec<TraversalPath>) -> Result<Self> {
        if paths.is_empty() {
            return Err(EncoderError::invalid_path("empty traversal path list"));
        }
        Ok(Self(paths))
    }

    /// Parse each selector in `selectors`
    pub fn parse_all<S: AsRef<str>>(selectors: &[S]) -> Result<Self> {
        let paths = selectors
            .iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<Vec<TraversalPath>>>()?;
        Self::new(paths)
    }

    /// Flatten `docs` along every selector
    pub fn locate(&self, docs: &DocumentArray) -> Vec<DocAddress> {
        self.0.iter().flat_map(|path| path.locate(docs)).collect()
    }
}

impl Default for TraversalPaths {
    fn default() -> Self {
        Self(vec![TraversalPath::root()])
    }
}

impl FromStr for TraversalPaths {
    type Err = EncoderError;

    /// Accepts a comma-separated list, e.g. `"r,c"` or `"@r,cm"`
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix('@').unwrap_or(trimmed);
        let selectors: Vec<&str> = body.split(',').collect();
        Self::parse_all(&selectors)
    }
}

impl fmt::Display for TraversalPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.0.iter().map(TraversalPath::as_str).collect();
        f.write_str(&joined.join(","))
    }
}

impl Serialize for TraversalPaths {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let raw: Vec<&str> = self.0.iter().map(TraversalPath::as_str).collect();
        raw.serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPaths {
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for TraversalPaths {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let parsed = match RawPaths::deserialize(deserializer)? {
            RawPaths::One(s) => s.parse(),
            RawPaths::Many(list) => Self::parse_all(&list),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> DocumentArray {
        vec![
            Document::with_text("a")
                .chunk(Document::with_text("a.0").chunk(Document::with_text("a.0.0")))
                .chunk(Document::with_text("a.1"))
                .matched(Document::with_text("a~0")),
            Document::with_text("b").chunk(Document::with_text("b.0")),
            Document::with_text("c"),
        ]
        .into()
    }

    fn texts(docs: &DocumentArray, addrs: &[DocAddress]) -> Vec<String> {
        addrs
            .iter()
            .filter_map(|a| docs.get_at(a))
            .filter_map(|d| d.text.clone())
            .collect()
    }

    #[test]
    fn test_root_selects_top_level() {
        let docs = tree();
        let path: TraversalPath = "r".parse().unwrap();
        assert_eq!(texts(&docs, &path.locate(&docs)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_chunk_levels() {
        let docs = tree();
        let c: TraversalPath = "c".parse().unwrap();
        let cc: TraversalPath = "cc".parse().unwrap();
        assert_eq!(texts(&docs, &c.locate(&docs)), vec!["a.0", "a.1", "b.0"]);
        assert_eq!(texts(&docs, &cc.locate(&docs)), vec!["a.0.0"]);
    }

    #[test]
    fn test_matches_and_slices() {
        let docs = tree();
        let m: TraversalPath = "m".parse().unwrap();
        assert_eq!(texts(&docs, &m.locate(&docs)), vec!["a~0"]);

        let sliced: TraversalPath = "r[1:]".parse().unwrap();
        assert_eq!(texts(&docs, &sliced.locate(&docs)), vec!["b", "c"]);

        let first_chunk: TraversalPath = "c[:1]".parse().unwrap();
        assert_eq!(texts(&docs, &first_chunk.locate(&docs)), vec!["a.0", "b.0"]);

        let rooted: TraversalPath = "r[:1]c".parse().unwrap();
        assert_eq!(texts(&docs, &rooted.locate(&docs)), vec!["a.0", "a.1"]);
    }

    #[test]
    fn test_slice_past_end_is_clamped() {
        let docs = tree();
        let path: TraversalPath = "r[2:10]".parse().unwrap();
        assert_eq!(texts(&docs, &path.locate(&docs)), vec!["c"]);
        let empty: TraversalPath = "r[5:]".parse().unwrap();
        assert!(empty.locate(&docs).is_empty());
    }

    #[test]
    fn test_multiple_paths_concatenate_in_order() {
        let docs = tree();
        let paths: TraversalPaths = "@r,c".parse().unwrap();
        assert_eq!(
            texts(&docs, &paths.locate(&docs)),
            vec!["a", "b", "c", "a.0", "a.1", "b.0"]
        );
    }

    #[test]
    fn test_invalid_selectors() {
        for bad in ["", "x", "cr", "c[a:b]", "r,", "r[1:2"] {
            assert!(bad.parse::<TraversalPaths>().is_err(), "{bad:?} should fail");
        }
    }

    #[test]
    fn test_get_at_mut_reaches_nested_doc() {
        let mut docs = tree();
        let path: TraversalPath = "cc".parse().unwrap();
        let addr = path.locate(&docs).remove(0);
        assert_eq!(addr.depth(), 2);
        docs.get_at_mut(&addr).unwrap().embedding = Some(vec![1.0]);
        assert_eq!(docs.as_slice()[0].chunks[0].chunks[0].embedding, Some(vec![1.0]));
    }

    #[test]
    fn test_serde_accepts_string_or_list() {
        let one: TraversalPaths = serde_json::from_str(r#""r""#).unwrap();
        let many: TraversalPaths = serde_json::from_str(r#"["r", "c"]"#).unwrap();
        assert_eq!(one, TraversalPaths::default());
        assert_eq!(many.to_string(), "r,c");
        assert_eq!(serde_json::to_string(&many).unwrap(), r#"["r","c"]"#);
        assert!(serde_json::from_str::<TraversalPaths>(r#"["q"]"#).is_err());
    }
}
