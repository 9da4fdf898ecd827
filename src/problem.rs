//! Problem definition and the distance capability consumed by the search.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

/// Read-only cost between two node indices.
///
/// Implementations must be symmetric and non-negative. Indices outside
/// `0..dimension()` are a caller bug, not a recoverable error.
pub trait DistanceOracle: Send + Sync {
    fn weight(&self, from: usize, to: usize) -> f64;

    /// Number of nodes in the fixed node set.
    fn dimension(&self) -> usize;
}

/// How coordinates are turned into edge weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeWeightType {
    /// Plain Euclidean distance without rounding.
    Exact,
    /// TSPLIB `EUC_2D`: Euclidean distance rounded to the nearest integer.
    Euc2d,
    /// TSPLIB `CEIL_2D`: Euclidean distance rounded up.
    Ceil2d,
    /// TSPLIB `ATT`: pseudo-Euclidean distance.
    Att,
    /// Weights supplied directly as a matrix.
    Explicit,
}

impl EdgeWeightType {
    fn from_keyword(keyword: &str) -> Result<Self> {
        match keyword {
            "EUC_2D" => Ok(EdgeWeightType::Euc2d),
            "CEIL_2D" => Ok(EdgeWeightType::Ceil2d),
            "ATT" => Ok(EdgeWeightType::Att),
            other => Err(Error::UnsupportedWeightType(other.to_string())),
        }
    }
}

/// A city with planar coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: usize,
    pub x: f64,
    pub y: f64,
}

impl Node {
    /// Create a new node.
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Node { id, x, y }
    }

    /// Calculate the distance to another node under the given weight type.
    pub fn distance(&self, other: &Node, weight_type: EdgeWeightType) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let euclidean = (dx * dx + dy * dy).sqrt();

        match weight_type {
            EdgeWeightType::Exact | EdgeWeightType::Explicit => euclidean,
            EdgeWeightType::Euc2d => (euclidean + 0.5).floor(),
            EdgeWeightType::Ceil2d => euclidean.ceil(),
            EdgeWeightType::Att => {
                let r = ((dx * dx + dy * dy) / 10.0).sqrt();
                let t = r.round();
                if t < r {
                    t + 1.0
                } else {
                    t
                }
            }
        }
    }
}

/// A symmetric TSP instance with a precomputed distance matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub name: String,
    pub nodes: Vec<Node>,
    pub weight_type: EdgeWeightType,
    pub distance_matrix: Vec<Vec<f64>>,
}

impl Problem {
    /// Create an instance with exact Euclidean distances.
    pub fn new(name: String, nodes: Vec<Node>) -> Self {
        Self::with_weight_type(name, nodes, EdgeWeightType::Exact)
    }

    /// Create an instance using the given rounding convention.
    pub fn with_weight_type(name: String, nodes: Vec<Node>, weight_type: EdgeWeightType) -> Self {
        let distance_matrix = Self::compute_distance_matrix(&nodes, weight_type);

        Problem {
            name,
            nodes,
            weight_type,
            distance_matrix,
        }
    }

    /// Wrap an explicit symmetric distance matrix.
    ///
    /// Every row must have one entry per node.
    pub fn from_matrix(name: String, distance_matrix: Vec<Vec<f64>>) -> Result<Self> {
        let n = distance_matrix.len();
        if let Some((row, entries)) = distance_matrix
            .iter()
            .enumerate()
            .find(|(_, entries)| entries.len() != n)
        {
            return Err(Error::RaggedMatrix {
                row,
                expected: n,
                found: entries.len(),
            });
        }

        let nodes = (0..n).map(|id| Node::new(id, 0.0, 0.0)).collect();

        Ok(Problem {
            name,
            nodes,
            weight_type: EdgeWeightType::Explicit,
            distance_matrix,
        })
    }

    /// Get the number of nodes.
    pub fn get_node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Reference optimum for this instance, if it is a known benchmark.
    pub fn reference_optimum(&self) -> Option<f64> {
        known_optimum(&self.name)
    }

    fn compute_distance_matrix(nodes: &[Node], weight_type: EdgeWeightType) -> Vec<Vec<f64>> {
        let n = nodes.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let d = nodes[i].distance(&nodes[j], weight_type);
                matrix[i][j] = d;
                matrix[j][i] = d;
            }
        }

        matrix
    }

    /// Load a TSPLIB instance from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(io::BufReader::new(file))
    }

    /// Parse a TSPLIB instance with a `NODE_COORD_SECTION`.
    ///
    /// Node ids are remapped to `0..n` in the order they are listed.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut name = String::from("unnamed");
        let mut dimension = None;
        let mut weight_type = EdgeWeightType::Euc2d;
        let mut nodes = Vec::new();
        let mut in_coords = false;
        let mut saw_coords = false;

        for (line_no, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line = line.trim();
            let line_no = line_no + 1;

            if line.is_empty() {
                continue;
            }
            if line == "EOF" {
                break;
            }

            if in_coords {
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts[0].parse::<f64>().is_ok() {
                    if parts.len() < 3 {
                        return Err(Error::Parse {
                            line: line_no,
                            message: format!("expected `id x y`, found `{}`", line),
                        });
                    }
                    let x = parse_number(parts[1], line_no)?;
                    let y = parse_number(parts[2], line_no)?;
                    nodes.push(Node::new(nodes.len(), x, y));
                    continue;
                }
                // A keyword line ends the section.
                in_coords = false;
            }

            if line.starts_with("NODE_COORD_SECTION") {
                in_coords = true;
                saw_coords = true;
                continue;
            }

            let (key, value) = match line.split_once(':') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (line, ""),
            };

            match key {
                "NAME" => name = value.to_string(),
                "DIMENSION" => dimension = Some(parse_dimension(value, line_no)?),
                "EDGE_WEIGHT_TYPE" => weight_type = EdgeWeightType::from_keyword(value)?,
                _ => {}
            }
        }

        if !saw_coords {
            return Err(Error::MissingCoordinates);
        }

        if let Some(expected) = dimension {
            if expected != nodes.len() {
                return Err(Error::DimensionMismatch {
                    expected,
                    found: nodes.len(),
                });
            }
        }

        Ok(Problem::with_weight_type(name, nodes, weight_type))
    }
}

fn parse_number(token: &str, line: usize) -> Result<f64> {
    token.parse::<f64>().map_err(|_| Error::Parse {
        line,
        message: format!("`{}` is not a number", token),
    })
}

fn parse_dimension(token: &str, line: usize) -> Result<usize> {
    token.parse::<usize>().map_err(|_| Error::Parse {
        line,
        message: format!("`{}` is not a valid dimension", token),
    })
}

impl DistanceOracle for Problem {
    #[inline]
    fn weight(&self, from: usize, to: usize) -> f64 {
        self.distance_matrix[from][to]
    }

    fn dimension(&self) -> usize {
        self.distance_matrix.len()
    }
}

/// Known optimal tour lengths for common TSPLIB benchmarks.
pub fn known_optimum(name: &str) -> Option<f64> {
    let optimum = match name {
        "kroA100" => 21282,
        "d198" => 15780,
        "lin318" => 42029,
        "pcb442" => 50778,
        "rat783" => 8806,
        "pr1002" => 259045,
        "pcb1173" => 56892,
        "d1291" => 50801,
        "fl1577" => 22249,
        "pr2392" => 378032,
        "pcb3038" => 137694,
        "fl3795" => 28772,
        "rl5915" => 565530,
        _ => return None,
    };
    Some(optimum as f64)
}
