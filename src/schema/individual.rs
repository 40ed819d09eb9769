//! Candidate solution types: points, individuals and clusters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}

/// A candidate solution: an ordered point sequence and its fitness.
///
/// Points are stored by value, so an individual never shares them with its
/// parents or with elites copied from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub points: Vec<Point>,
    /// Zero until evaluated.
    pub fitness: f64,
}

impl Individual {
    /// Create an unevaluated individual from a point sequence.
    pub fn new(points: impl Into<Vec<Point>>) -> Self {
        Self {
            points: points.into(),
            fitness: 0.0,
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Individual: ")?;
        for point in &self.points {
            write!(f, "{} ", point)?;
        }
        write!(f, "Fitness: {}", self.fitness)
    }
}

/// All individuals of one generation.
pub type Population = Vec<Individual>;

/// A group of similar individuals, held as indices into the population it
/// was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cluster {
    pub members: Vec<usize>,
}

impl Cluster {
    pub fn singleton(index: usize) -> Self {
        Self {
            members: vec![index],
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
