use itertools::Itertools;
use std::{
    collections::{BTreeMap, BTreeSet},
    convert::TryFrom,
    num::{ParseIntError, TryFromIntError},
    str::FromStr,
};
use thiserror::Error;

pub type Position = (i32, i32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Segment is empty")]
    Empty,

    #[error("{0:?} is not a valid direction")]
    InvalidDirection(char),

    #[error("Segment {token:?} has an invalid distance")]
    InvalidDistance {
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Segment {token:?} is too long")]
    DistanceOutOfRange {
        token: String,
        #[source]
        source: TryFromIntError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("The wires never cross")]
    NoIntersection,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

use Direction::*;

impl Direction {
    const OFFSETS: [Position; 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];

    pub fn offset(self) -> Position {
        Self::OFFSETS[self as usize]
    }
}

impl TryFrom<char> for Direction {
    type Error = ParseError;

    fn try_from(c: char) -> Result<Self, ParseError> {
        Ok(match c {
            'U' => Up,
            'D' => Down,
            'L' => Left,
            'R' => Right,
            c => return Err(ParseError::InvalidDirection(c)),
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Segment {
    pub direction: Direction,
    /// Never negative when parsed.
    pub distance: i32,
}

impl Segment {
    pub fn new(direction: Direction, distance: i32) -> Self {
        Segment {
            direction,
            distance,
        }
    }

    fn line_from(self, start: Position) -> impl Iterator<Item = Position> {
        let (x, y) = start;
        let (dx, dy) = self.direction.offset();

        (1..=self.distance).map(move |d| (x + dx * d, y + dy * d))
    }
}

impl FromStr for Segment {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        let s = s.trim();
        let mut chars = s.chars();
        let direction = chars.next().ok_or(ParseError::Empty)?;
        let direction = Direction::try_from(direction)?;

        let distance = chars
            .as_str()
            .trim()
            .parse::<u32>()
            .map_err(|source| ParseError::InvalidDistance {
                token: s.to_string(),
                source,
            })?;
        let distance =
            i32::try_from(distance).map_err(|source| ParseError::DistanceOutOfRange {
                token: s.to_string(),
                source,
            })?;

        Ok(Segment::new(direction, distance))
    }
}

#[test]
fn parsing() -> Result<()> {
    assert_eq!("R75".parse::<Segment>()?, Segment::new(Right, 75));
    assert_eq!("D30".parse::<Segment>()?, Segment::new(Down, 30));
    assert_eq!("U83".parse::<Segment>()?, Segment::new(Up, 83));
    assert_eq!("L12".parse::<Segment>()?, Segment::new(Left, 12));
    assert_eq!(" R0\n".parse::<Segment>()?, Segment::new(Right, 0));
    assert_eq!(
        "L2147483647".parse::<Segment>()?,
        Segment::new(Left, i32::max_value())
    );
    Ok(())
}

#[test]
fn parsing_failures() {
    assert_eq!("".parse::<Segment>(), Err(ParseError::Empty));
    assert_eq!("X5".parse::<Segment>(), Err(ParseError::InvalidDirection('X')));
    assert_eq!("5".parse::<Segment>(), Err(ParseError::InvalidDirection('5')));
    assert!(matches!(
        "Uabc".parse::<Segment>(),
        Err(ParseError::InvalidDistance { ref token, .. }) if token == "Uabc"
    ));
    assert!(matches!(
        "R-4".parse::<Segment>(),
        Err(ParseError::InvalidDistance { .. })
    ));
    assert!(matches!(
        "D".parse::<Segment>(),
        Err(ParseError::InvalidDistance { .. })
    ));
    assert!(matches!(
        "R4294967295".parse::<Segment>(),
        Err(ParseError::DistanceOutOfRange { ref token, .. }) if token == "R4294967295"
    ));
    assert!(matches!(
        "U2147483648".parse::<Segment>(),
        Err(ParseError::DistanceOutOfRange { .. })
    ));
}

/// The route of a single wire, in the order it was laid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wire(pub Vec<Segment>);

impl FromStr for Wire {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        let s: Result<_, _> = s.trim().split(',').map(str::parse).collect();
        Ok(Wire(s?))
    }
}

#[test]
fn parsing_wire() -> Result<()> {
    let wire: Wire = "R8,U5,L5,D3\n".parse()?;
    assert_eq!(
        wire,
        Wire(vec![
            Segment::new(Right, 8),
            Segment::new(Up, 5),
            Segment::new(Left, 5),
            Segment::new(Down, 3),
        ])
    );

    assert!("R8,,D3".parse::<Wire>().is_err());
    assert_eq!("R8,Q1".parse::<Wire>(), Err(ParseError::InvalidDirection('Q')));
    Ok(())
}

/// Every position a wire passes through, along with the number of steps
/// taken to first reach it. The origin is never included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace(BTreeMap<Position, u32>);

impl Trace {
    pub fn new(wire: &Wire) -> Self {
        let mut position = (0, 0);
        let mut steps = 0;
        let mut visited = BTreeMap::new();

        for segment in &wire.0 {
            for point in segment.line_from(position) {
                steps += 1;
                if point != (0, 0) {
                    visited.entry(point).or_insert(steps);
                }
                position = point;
            }
        }

        Trace(visited)
    }

    pub fn steps_to(&self, position: Position) -> Option<u32> {
        self.0.get(&position).copied()
    }

    pub fn positions(&self) -> BTreeSet<Position> {
        self.0.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[test]
fn tracing() {
    let trace = Trace::new(&Wire(vec![Segment::new(Right, 2), Segment::new(Up, 1)]));

    assert_eq!(trace.len(), 3);
    assert_eq!(trace.steps_to((1, 0)), Some(1));
    assert_eq!(trace.steps_to((2, 0)), Some(2));
    assert_eq!(trace.steps_to((2, 1)), Some(3));
}

#[test]
fn tracing_skips_origin() -> Result<()> {
    let wire: Wire = "R3,L6,R3,U2,D4".parse()?;
    let trace = Trace::new(&wire);

    assert_eq!(trace.steps_to((0, 0)), None);
    assert!(trace.positions().iter().all(|&p| p != (0, 0)));
    Ok(())
}

#[test]
fn tracing_keeps_first_visit() -> Result<()> {
    // Walks out and back over the same cells
    let wire: Wire = "R3,L3,R5".parse()?;
    let trace = Trace::new(&wire);

    assert_eq!(trace.steps_to((1, 0)), Some(1));
    assert_eq!(trace.steps_to((3, 0)), Some(3));
    assert_eq!(trace.steps_to((4, 0)), Some(10));
    assert_eq!(trace.steps_to((-1, 0)), None);
    Ok(())
}

#[test]
fn tracing_zero_distance() -> Result<()> {
    let wire: Wire = "U0,R2,D0".parse()?;
    let trace = Trace::new(&wire);

    assert_eq!(trace.len(), 2);
    assert_eq!(trace.steps_to((2, 0)), Some(2));

    let empty = Trace::new(&"L0".parse::<Wire>()?);
    assert!(empty.is_empty());
    Ok(())
}

/// The positions visited by every one of the traces.
pub fn intersections<'a>(traces: impl IntoIterator<Item = &'a Trace>) -> BTreeSet<Position> {
    traces
        .into_iter()
        .map(Trace::positions)
        .fold1(|intersections, positions| &intersections & &positions)
        .unwrap_or_default()
}

fn crossings(wires: impl IntoIterator<Item = Wire>) -> Result<(Vec<Trace>, BTreeSet<Position>)> {
    let traces: Vec<_> = wires.into_iter().map(|w| Trace::new(&w)).collect();
    if traces.len() < 2 {
        return Err(Error::NoIntersection);
    }

    let crossed = intersections(&traces);
    if crossed.is_empty() {
        return Err(Error::NoIntersection);
    }

    Ok((traces, crossed))
}

fn distance_from_origin(position: Position) -> i32 {
    let (x, y) = position;
    x.abs() + y.abs()
}

pub fn closest_intersection(wires: impl IntoIterator<Item = Wire>) -> Result<i32> {
    let (_, crossed) = crossings(wires)?;

    crossed
        .into_iter()
        .map(distance_from_origin)
        .min()
        .ok_or(Error::NoIntersection)
}

/// The fewest combined steps all wires take to reach a shared position.
pub fn minimum_delay(wires: impl IntoIterator<Item = Wire>) -> Result<u32> {
    let (traces, crossed) = crossings(wires)?;

    crossed
        .into_iter()
        .flat_map(|p| traces.iter().map(|t| t.steps_to(p)).sum::<Option<u32>>())
        .min()
        .ok_or(Error::NoIntersection)
}

pub fn closest_intersection_distance(path1: &str, path2: &str) -> Result<i32> {
    closest_intersection(vec![path1.parse::<Wire>()?, path2.parse()?])
}

pub fn minimum_signal_delay(path1: &str, path2: &str) -> Result<u32> {
    minimum_delay(vec![path1.parse::<Wire>()?, path2.parse()?])
}

#[cfg(test)]
const EXAMPLES: [(&str, &str); 3] = [
    ("R8,U5,L5,D3", "U7,R6,D4,L4"),
    (
        "R75,D30,R83,U83,L12,D49,R71,U7,L72",
        "U62,R66,U55,R34,D71,R55,D58,R83",
    ),
    (
        "R98,U47,R26,D63,R33,U87,L62,D20,R33,U53,R51",
        "U98,R91,D20,R16,D67,R40,U7,R15,U6,R7",
    ),
];

#[test]
fn distance() -> Result<()> {
    let [a, b, c] = EXAMPLES;

    assert_eq!(closest_intersection_distance(a.0, a.1)?, 6);
    assert_eq!(closest_intersection_distance(b.0, b.1)?, 159);
    assert_eq!(closest_intersection_distance(c.0, c.1)?, 135);
    Ok(())
}

#[test]
fn delay() -> Result<()> {
    let [a, b, c] = EXAMPLES;

    assert_eq!(minimum_signal_delay(a.0, a.1)?, 30);
    assert_eq!(minimum_signal_delay(b.0, b.1)?, 610);
    assert_eq!(minimum_signal_delay(c.0, c.1)?, 410);
    Ok(())
}

#[test]
fn repeated_calls_agree() -> Result<()> {
    for &(w1, w2) in &EXAMPLES {
        assert_eq!(
            closest_intersection_distance(w1, w2)?,
            closest_intersection_distance(w1, w2)?
        );
        assert_eq!(minimum_signal_delay(w1, w2)?, minimum_signal_delay(w1, w2)?);
    }
    Ok(())
}

#[test]
fn never_crossing() {
    assert_eq!(
        closest_intersection_distance("R5,U5", "L5,D5"),
        Err(Error::NoIntersection)
    );
    assert_eq!(
        minimum_signal_delay("R5,U5", "L5,D5"),
        Err(Error::NoIntersection)
    );
    assert_eq!(
        closest_intersection_distance("R0", "U0"),
        Err(Error::NoIntersection)
    );
}

#[test]
fn bad_input_is_reported() {
    assert_eq!(
        closest_intersection_distance("R8,U5", "U7,Z6"),
        Err(Error::Parse(ParseError::InvalidDirection('Z')))
    );
    assert!(matches!(
        minimum_signal_delay("R8,Ufive", "U7,R6"),
        Err(Error::Parse(ParseError::InvalidDistance { .. }))
    ));
}

#[test]
fn oversized_segment_is_reported() {
    assert!(matches!(
        closest_intersection_distance("R4294967295,U1", "U1"),
        Err(Error::Parse(ParseError::DistanceOutOfRange { .. }))
    ));
    assert!(matches!(
        minimum_signal_delay("R4294967295,U1", "U1"),
        Err(Error::Parse(ParseError::DistanceOutOfRange { .. }))
    ));
}

#[test]
fn single_wire_never_crosses() -> Result<()> {
    assert_eq!(
        closest_intersection(vec!["R8,U5".parse::<Wire>()?]),
        Err(Error::NoIntersection)
    );
    assert_eq!(minimum_delay(Vec::<Wire>::new()), Err(Error::NoIntersection));
    Ok(())
}

#[test]
fn many_wires() -> Result<()> {
    let wires: Vec<Wire> = vec![
        "R8,U5,L5,D3".parse()?,
        "U7,R6,D4,L4".parse()?,
        "U3,R10".parse()?,
    ];

    let traces: Vec<_> = wires.iter().map(Trace::new).collect();
    assert_eq!(
        intersections(&traces),
        vec![(3, 3)].into_iter().collect::<BTreeSet<_>>()
    );

    assert_eq!(closest_intersection(wires.clone())?, 6);
    assert_eq!(minimum_delay(wires)?, 20 + 20 + 6);
    Ok(())
}
