//! Graph description text parser
//!
//! The format is line based:
//!
//! ```text
//! <"D"|"U"> <vertex_count> ["W"]
//! <u> <v> [<weight>]
//! ...
//! ```
//!
//! `D`/`U` selects directed or undirected edges and a trailing `W` on the
//! header marks the graph as weighted. Blank lines are ignored.

use crate::error::{Error, Result};
use crate::limits::validate_vertex_count;
use serde::{Deserialize, Serialize};

/// Vertex identifier, valid in `[0, vertex_count)`
pub type VertexId = usize;

/// Header of a parsed graph description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDescriptor {
    pub directed: bool,
    pub weighted: bool,
    pub vertex_count: usize,
}

impl GraphDescriptor {
    pub fn new(directed: bool, weighted: bool, vertex_count: usize) -> Self {
        Self {
            directed,
            weighted,
            vertex_count,
        }
    }

    pub fn contains(&self, vertex: VertexId) -> bool {
        vertex < self.vertex_count
    }
}

/// Edge weight, present only on weighted graphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Weight {
    Present(i64),
    #[default]
    Absent,
}

impl Weight {
    pub fn value(self) -> Option<i64> {
        match self {
            Self::Present(w) => Some(w),
            Self::Absent => None,
        }
    }

    pub fn is_present(self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Weight value, or `default` when absent
    pub fn unwrap_or(self, default: i64) -> i64 {
        self.value().unwrap_or(default)
    }
}

impl From<Option<i64>> for Weight {
    fn from(w: Option<i64>) -> Self {
        w.map_or(Self::Absent, Self::Present)
    }
}

impl std::fmt::Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present(w) => write!(f, "{}", w),
            Self::Absent => write!(f, "-"),
        }
    }
}

/// A declared edge, in the order it appeared in the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: VertexId,
    pub target: VertexId,
    #[serde(default)]
    pub weight: Weight,
}

impl Edge {
    pub fn new(source: VertexId, target: VertexId) -> Self {
        Self {
            source,
            target,
            weight: Weight::Absent,
        }
    }

    pub fn with_weight(mut self, weight: i64) -> Self {
        self.weight = Weight::Present(weight);
        self
    }
}

/// Graph text parser
///
/// The default parser is lenient about weights: an edge line of a weighted
/// graph may omit its weight and yields [`Weight::Absent`]. Use
/// [`Parser::require_weights`] to reject such lines instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    require_weights: bool,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject weighted-graph edge lines that carry no weight
    pub fn require_weights(mut self, require: bool) -> Self {
        self.require_weights = require;
        self
    }

    /// Parse a graph description into its header and ordered edge list
    pub fn parse(&self, text: &str) -> Result<(GraphDescriptor, Vec<Edge>)> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_line, header) = lines
            .next()
            .ok_or_else(|| Error::format(1, "missing header line"))?;
        let descriptor = parse_header(header_line, header)?;

        let mut edges = Vec::new();
        for (line_no, line) in lines {
            edges.push(self.parse_edge(&descriptor, line_no, line)?);
        }

        tracing::debug!(
            "Parsed graph: directed={}, weighted={}, vertices={}, edges={}",
            descriptor.directed,
            descriptor.weighted,
            descriptor.vertex_count,
            edges.len()
        );

        Ok((descriptor, edges))
    }

    fn parse_edge(&self, descriptor: &GraphDescriptor, line_no: usize, line: &str) -> Result<Edge> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err(Error::format(
                line_no,
                format!("edge needs two vertex ids, found {} token(s)", tokens.len()),
            ));
        }
        if tokens.len() > 3 {
            return Err(Error::format(
                line_no,
                format!("edge has {} tokens, expected at most 3", tokens.len()),
            ));
        }

        let source = parse_vertex(descriptor, line_no, tokens[0])?;
        let target = parse_vertex(descriptor, line_no, tokens[1])?;

        let weight = match tokens.get(2) {
            Some(token) if descriptor.weighted => Weight::Present(parse_int(line_no, token)?),
            Some(token) => {
                return Err(Error::format(
                    line_no,
                    format!("unexpected weight '{}' on an unweighted graph", token),
                ))
            }
            None if descriptor.weighted && self.require_weights => {
                return Err(Error::format(line_no, "missing weight on a weighted graph"))
            }
            None => Weight::Absent,
        };

        Ok(Edge {
            source,
            target,
            weight,
        })
    }
}

/// Parse a graph description with the default (lenient) parser
pub fn parse(text: &str) -> Result<(GraphDescriptor, Vec<Edge>)> {
    Parser::new().parse(text)
}

fn parse_header(line_no: usize, line: &str) -> Result<GraphDescriptor> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let directed = match tokens.first() {
        Some(&"D") => true,
        Some(&"U") => false,
        Some(other) => {
            return Err(Error::format(
                line_no,
                format!("direction must be 'D' or 'U', found '{}'", other),
            ))
        }
        None => return Err(Error::format(line_no, "missing header line")),
    };

    let count_token = tokens
        .get(1)
        .ok_or_else(|| Error::format(line_no, "missing vertex count"))?;
    let vertex_count: usize = count_token.parse().map_err(|_| {
        Error::format(
            line_no,
            format!("vertex count must be a non-negative integer, found '{}'", count_token),
        )
    })?;
    validate_vertex_count(vertex_count)?;

    let weighted = match tokens.get(2) {
        Some(&"W") => true,
        Some(other) => {
            return Err(Error::format(
                line_no,
                format!("unknown header flag '{}', expected 'W'", other),
            ))
        }
        None => false,
    };

    if tokens.len() > 3 {
        return Err(Error::format(
            line_no,
            format!("header has {} tokens, expected at most 3", tokens.len()),
        ));
    }

    Ok(GraphDescriptor {
        directed,
        weighted,
        vertex_count,
    })
}

fn parse_int(line_no: usize, token: &str) -> Result<i64> {
    token
        .parse()
        .map_err(|_| Error::format(line_no, format!("expected an integer, found '{}'", token)))
}

fn parse_vertex(descriptor: &GraphDescriptor, line_no: usize, token: &str) -> Result<VertexId> {
    let id = parse_int(line_no, token)?;
    match usize::try_from(id) {
        Ok(vertex) if descriptor.contains(vertex) => Ok(vertex),
        _ => Err(Error::format(
            line_no,
            format!(
                "vertex {} out of range [0, {})",
                id, descriptor.vertex_count
            ),
        )),
    }
}
