//! Registry of every recognised win pattern.
//!
//! Each pattern name maps to a tagged rule: a list of fixed-shape variations,
//! a marked-cell threshold, or a composite rule evaluated by the matching
//! engine. The registry is built once and never mutated.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::grid::CellSet;
use crate::errors::domain::{DomainError, ValidationKind};

/// Named patterns a cashier can select for a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternName {
    Row,
    Column,
    Diagonal,
    AnyLine,
    FourCorners,
    LetterX,
    Plus,
    LetterT,
    LetterL,
    LetterH,
    LetterU,
    LetterZ,
    OuterFrame,
    InnerFrame,
    InnerSquare,
    Diamond,
    Pyramid,
    Blackout,
    AnyEight,
    AnyTwelve,
    AnySixteen,
    AnyTwenty,
    AnyLineOrCorner,
    AnyTwoLinesOrCorners,
    AnyCornerSquare,
}

impl PatternName {
    pub const ALL: [PatternName; 25] = [
        PatternName::Row,
        PatternName::Column,
        PatternName::Diagonal,
        PatternName::AnyLine,
        PatternName::FourCorners,
        PatternName::LetterX,
        PatternName::Plus,
        PatternName::LetterT,
        PatternName::LetterL,
        PatternName::LetterH,
        PatternName::LetterU,
        PatternName::LetterZ,
        PatternName::OuterFrame,
        PatternName::InnerFrame,
        PatternName::InnerSquare,
        PatternName::Diamond,
        PatternName::Pyramid,
        PatternName::Blackout,
        PatternName::AnyEight,
        PatternName::AnyTwelve,
        PatternName::AnySixteen,
        PatternName::AnyTwenty,
        PatternName::AnyLineOrCorner,
        PatternName::AnyTwoLinesOrCorners,
        PatternName::AnyCornerSquare,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PatternName::Row => "row",
            PatternName::Column => "column",
            PatternName::Diagonal => "diagonal",
            PatternName::AnyLine => "anyLine",
            PatternName::FourCorners => "fourCorners",
            PatternName::LetterX => "letterX",
            PatternName::Plus => "plus",
            PatternName::LetterT => "letterT",
            PatternName::LetterL => "letterL",
            PatternName::LetterH => "letterH",
            PatternName::LetterU => "letterU",
            PatternName::LetterZ => "letterZ",
            PatternName::OuterFrame => "outerFrame",
            PatternName::InnerFrame => "innerFrame",
            PatternName::InnerSquare => "innerSquare",
            PatternName::Diamond => "diamond",
            PatternName::Pyramid => "pyramid",
            PatternName::Blackout => "blackout",
            PatternName::AnyEight => "anyEight",
            PatternName::AnyTwelve => "anyTwelve",
            PatternName::AnySixteen => "anySixteen",
            PatternName::AnyTwenty => "anyTwenty",
            PatternName::AnyLineOrCorner => "anyLineOrCorner",
            PatternName::AnyTwoLinesOrCorners => "anyTwoLinesOrCorners",
            PatternName::AnyCornerSquare => "anyCornerSquare",
        }
    }

    pub fn rule(self) -> &'static PatternRule {
        // Every name is registered at build time.
        &REGISTRY[&self]
    }
}

impl fmt::Display for PatternName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatternName::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::UnknownPattern,
                    format!("unknown pattern '{s}'"),
                )
            })
    }
}

/// Composite rules that combine lines and corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeRule {
    /// At least one full line and at least one marked corner.
    AnyLineOrCorner,
    /// Full lines plus marked corners, in any mixture, totalling two or more.
    AnyTwoLinesOrCorners,
    /// One of the 2×2 squares in the grid corners.
    AnyCornerSquare,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternRule {
    /// Matched when any variation is fully marked.
    Simple { variations: Vec<CellSet> },
    /// Matched when at least `threshold` playable cells are marked.
    Meta { threshold: u32 },
    Composite(CompositeRule),
}

// Corner cells B1, B5, O1, O5.
pub const CORNERS: [u8; 4] = [0, 4, 20, 24];

pub const MAIN_DIAGONAL: CellSet = CellSet::of(&[0, 6, 12, 18, 24]);
pub const ANTI_DIAGONAL: CellSet = CellSet::of(&[4, 8, 12, 16, 20]);

pub const CORNER_SQUARES: [CellSet; 4] = [
    CellSet::of(&[0, 1, 5, 6]),
    CellSet::of(&[3, 4, 8, 9]),
    CellSet::of(&[15, 16, 20, 21]),
    CellSet::of(&[18, 19, 23, 24]),
];

pub fn rows() -> Vec<CellSet> {
    (1..=5).map(CellSet::row).collect()
}

pub fn columns() -> Vec<CellSet> {
    (0..5).map(CellSet::column).collect()
}

/// The 12 full lines: rows, columns, then both diagonals.
pub fn lines() -> Vec<CellSet> {
    let mut all = rows();
    all.extend(columns());
    all.push(MAIN_DIAGONAL);
    all.push(ANTI_DIAGONAL);
    all
}

fn corner_set() -> CellSet {
    CellSet::of(&CORNERS)
}

fn shapes(name: PatternName) -> Vec<CellSet> {
    let col = CellSet::column;
    let row = CellSet::row;
    let inner_ring = CellSet::of(&[6, 7, 8, 11, 13, 16, 17, 18]);

    match name {
        PatternName::Row => rows(),
        PatternName::Column => columns(),
        PatternName::Diagonal => vec![MAIN_DIAGONAL, ANTI_DIAGONAL],
        PatternName::AnyLine => lines(),
        PatternName::FourCorners => vec![corner_set()],
        PatternName::LetterX => vec![MAIN_DIAGONAL.union(ANTI_DIAGONAL)],
        PatternName::Plus => vec![row(3).union(col(2))],
        PatternName::LetterT => vec![row(1).union(col(2))],
        PatternName::LetterL => vec![col(0).union(row(5))],
        PatternName::LetterH => vec![col(0).union(col(4)).union(row(3))],
        PatternName::LetterU => vec![col(0).union(col(4)).union(row(5))],
        PatternName::LetterZ => vec![row(1).union(row(5)).union(ANTI_DIAGONAL)],
        PatternName::OuterFrame => vec![row(1).union(row(5)).union(col(0)).union(col(4))],
        PatternName::InnerFrame => vec![inner_ring],
        PatternName::InnerSquare => vec![inner_ring.union(CellSet::FREE)],
        PatternName::Diamond => vec![CellSet::of(&[10, 6, 16, 2, 22, 8, 18, 14])],
        PatternName::Pyramid => vec![row(5).union(CellSet::of(&[8, 13, 18, 12]))],
        PatternName::Blackout => vec![CellSet::FULL],
        _ => Vec::new(),
    }
}

fn build_rule(name: PatternName) -> PatternRule {
    match name {
        PatternName::AnyEight => PatternRule::Meta { threshold: 8 },
        PatternName::AnyTwelve => PatternRule::Meta { threshold: 12 },
        PatternName::AnySixteen => PatternRule::Meta { threshold: 16 },
        PatternName::AnyTwenty => PatternRule::Meta { threshold: 20 },
        PatternName::AnyLineOrCorner => PatternRule::Composite(CompositeRule::AnyLineOrCorner),
        PatternName::AnyTwoLinesOrCorners => {
            PatternRule::Composite(CompositeRule::AnyTwoLinesOrCorners)
        }
        PatternName::AnyCornerSquare => PatternRule::Composite(CompositeRule::AnyCornerSquare),
        simple => PatternRule::Simple {
            variations: shapes(simple),
        },
    }
}

static REGISTRY: Lazy<BTreeMap<PatternName, PatternRule>> = Lazy::new(|| {
    PatternName::ALL
        .into_iter()
        .map(|name| (name, build_rule(name)))
        .collect()
});
