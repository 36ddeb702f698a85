// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Problem instance loader for the bay allocation domain.
//!
//! This module turns the instance text format into a validated `Model`,
//! mapping the planning horizon, grid dimensions, the three bay category
//! lists, and the aircraft fleet into the compact layout consumed by the
//! enumeration engine.
//!
//! The expected format is:
//!
//! ```raw
//! <num_slots>
//! <rows>x<cols>
//! STD: (r,c) (r,c) ...
//! SPC: (r,c) ...
//! PRK: (r,c) ...
//! <id>-<TYPE>-<RESTR>-<t1>-<t2>     one line per aircraft
//! ```
//!
//! `TYPE` is an opaque code of which only `JMB` is meaningful (it selects
//! the `Jumbo` kind; every other code is a `Standard` aircraft). `RESTR` is
//! `T` for the ordered restriction or `F` for none. A line may carry a
//! comment introduced by `#`, which is ignored, and blank lines are skipped.
//! The first line tolerates a `<label>:` prefix (`Franjas: 5`), matching the
//! instance files in circulation.
//!
//! The loader emphasizes clarity and robustness: tokens are converted with
//! explicit errors naming the offending text, premature end of input is
//! reported distinctly, and model-level violations (duplicate cells, cells
//! outside the grid) surface as the wrapped `ConfigurationError`. The engine
//! itself never touches text; this loader is the boundary.

use crate::{
    layout::{AircraftKind, BayCategory, Restriction},
    model::{ConfigurationError, Model, ModelBuilder},
};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// The error type for the problem loading process.
#[derive(Debug)]
pub enum ProblemLoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input stream ended before the instance was complete.
    UnexpectedEof,
    /// A token could not be parsed into the expected form.
    Parse(ParseTokenError),
    /// The grid dimensions are malformed or non-positive.
    InvalidDimensions,
    /// An aircraft declared a negative task count.
    NegativeTaskCount { aircraft_id: String },
    /// Two aircraft lines carry the same identifier.
    DuplicateAircraftId { aircraft_id: String },
    /// The assembled problem definition failed model validation.
    Configuration(ConfigurationError),
}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// A description of what the token was expected to be.
    pub expected: &'static str,
}

impl std::fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Could not parse token '{}' as {}", self.token, self.expected)
    }
}

impl std::error::Error for ParseTokenError {}

impl std::fmt::Display for ProblemLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof => write!(f, "Unexpected end of file while parsing instance"),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::InvalidDimensions => {
                write!(f, "Grid dimensions must be positive integers of the form RxC")
            }
            Self::NegativeTaskCount { aircraft_id } => {
                write!(f, "Aircraft '{}' declares a negative task count", aircraft_id)
            }
            Self::DuplicateAircraftId { aircraft_id } => {
                write!(f, "Aircraft identifier '{}' appears more than once", aircraft_id)
            }
            Self::Configuration(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for ProblemLoaderError {}

impl From<std::io::Error> for ProblemLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseTokenError> for ProblemLoaderError {
    fn from(e: ParseTokenError) -> Self {
        Self::Parse(e)
    }
}

impl From<ConfigurationError> for ProblemLoaderError {
    fn from(e: ConfigurationError) -> Self {
        Self::Configuration(e)
    }
}

/// A loader for bay allocation problem instances.
///
/// # Examples
///
/// ```rust
/// use apron_model::loading::ProblemLoader;
///
/// let input = "\
/// 1
/// 1x2
/// STD: (0,0)
/// SPC:
/// PRK: (0,1)
/// 1-STD-F-1-0
/// ";
///
/// let model = ProblemLoader::new().load_from_str(input).unwrap();
/// assert_eq!(model.num_slots(), 1);
/// assert_eq!(model.num_bays(), 2);
/// assert_eq!(model.num_aircraft(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ProblemLoader;

impl ProblemLoader {
    /// Creates a new `ProblemLoader`.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Loads an instance from a file path.
    pub fn load_from_path<P: AsRef<Path>>(&self, path: P) -> Result<Model, ProblemLoaderError> {
        let file = File::open(path)?;
        self.load_from_reader(BufReader::new(file))
    }

    /// Loads an instance from a string slice.
    pub fn load_from_str(&self, input: &str) -> Result<Model, ProblemLoaderError> {
        self.load_from_reader(input.as_bytes())
    }

    /// Loads an instance from any buffered reader.
    pub fn load_from_reader<R: BufRead>(&self, reader: R) -> Result<Model, ProblemLoaderError> {
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let line = match line.split_once('#') {
                Some((content, _comment)) => content,
                None => line.as_str(),
            };
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }

        let mut cursor = lines.iter().map(String::as_str);

        let num_slots = parse_slot_count(cursor.next().ok_or(ProblemLoaderError::UnexpectedEof)?)?;
        let (rows, cols) = parse_dimensions(cursor.next().ok_or(ProblemLoaderError::UnexpectedEof)?)?;

        let mut builder = ModelBuilder::new(num_slots, rows, cols);

        for category in [BayCategory::Standard, BayCategory::Specialized, BayCategory::Parking] {
            let line = cursor.next().ok_or(ProblemLoaderError::UnexpectedEof)?;
            let cells = parse_category_line(line, category)?;
            builder.add_bays(category, cells);
        }

        let mut seen_ids: Vec<String> = Vec::new();
        for line in cursor {
            let aircraft = parse_aircraft_line(line)?;
            if seen_ids.iter().any(|id| id == &aircraft.id) {
                return Err(ProblemLoaderError::DuplicateAircraftId {
                    aircraft_id: aircraft.id,
                });
            }
            builder.add_aircraft(
                aircraft.kind,
                aircraft.restriction,
                aircraft.type1_count,
                aircraft.type2_count,
            );
            seen_ids.push(aircraft.id);
        }

        Ok(builder.build()?)
    }
}

struct AircraftLine {
    id: String,
    kind: AircraftKind,
    restriction: Restriction,
    type1_count: u32,
    type2_count: u32,
}

/// Parses the slot-count line, tolerating a `<label>:` prefix.
fn parse_slot_count(line: &str) -> Result<usize, ProblemLoaderError> {
    let token = match line.rsplit_once(':') {
        Some((_label, value)) => value.trim(),
        None => line,
    };

    let count: i64 = token.parse().map_err(|_| ParseTokenError {
        token: token.to_string(),
        expected: "a slot count integer",
    })?;

    if count <= 0 {
        return Err(ConfigurationError::NonPositiveSlotCount.into());
    }

    Ok(count as usize)
}

/// Parses the `<rows>x<cols>` dimension line.
fn parse_dimensions(line: &str) -> Result<(usize, usize), ProblemLoaderError> {
    let (rows_token, cols_token) = line
        .split_once(['x', 'X'])
        .ok_or(ProblemLoaderError::InvalidDimensions)?;

    let rows: i64 = rows_token
        .trim()
        .parse()
        .map_err(|_| ProblemLoaderError::InvalidDimensions)?;
    let cols: i64 = cols_token
        .trim()
        .parse()
        .map_err(|_| ProblemLoaderError::InvalidDimensions)?;

    if rows <= 0 || cols <= 0 {
        return Err(ProblemLoaderError::InvalidDimensions);
    }

    Ok((rows as usize, cols as usize))
}

/// Parses a `STD:`/`SPC:`/`PRK:` line into its cell list, verifying the
/// label matches the expected category.
fn parse_category_line(
    line: &str,
    category: BayCategory,
) -> Result<Vec<(usize, usize)>, ProblemLoaderError> {
    let (label, rest) = line.split_once(':').ok_or_else(|| ParseTokenError {
        token: line.to_string(),
        expected: "a category line of the form 'STD: (r,c) ...'",
    })?;

    if label.trim() != category.code() {
        return Err(ParseTokenError {
            token: label.trim().to_string(),
            expected: match category {
                BayCategory::Standard => "the category label 'STD'",
                BayCategory::Specialized => "the category label 'SPC'",
                BayCategory::Parking => "the category label 'PRK'",
            },
        }
        .into());
    }

    rest.split_whitespace().map(parse_cell).collect()
}

/// Parses a `(r,c)` cell token; the parentheses are optional.
fn parse_cell(token: &str) -> Result<(usize, usize), ProblemLoaderError> {
    let inner = token.trim_start_matches('(').trim_end_matches(')');
    let (row_token, col_token) = inner.split_once(',').ok_or_else(|| ParseTokenError {
        token: token.to_string(),
        expected: "a cell of the form (r,c)",
    })?;

    let parse = |t: &str| -> Result<usize, ParseTokenError> {
        t.trim().parse().map_err(|_| ParseTokenError {
            token: token.to_string(),
            expected: "a cell of the form (r,c)",
        })
    };

    Ok((parse(row_token)?, parse(col_token)?))
}

/// Parses an `<id>-<TYPE>-<RESTR>-<t1>-<t2>` aircraft line.
///
/// `-` is both the field separator and a potential sign, so an empty field
/// followed by digits is folded back into a signed token; the sign is then
/// rejected as a negative task count rather than as a malformed line.
fn parse_aircraft_line(line: &str) -> Result<AircraftLine, ProblemLoaderError> {
    let raw: Vec<&str> = line.split('-').map(str::trim).collect();
    let mut parts: Vec<String> = Vec::with_capacity(5);
    let mut cursor = 0;
    while cursor < raw.len() {
        if raw[cursor].is_empty() && cursor + 1 < raw.len() && !raw[cursor + 1].is_empty() {
            parts.push(format!("-{}", raw[cursor + 1]));
            cursor += 2;
        } else {
            parts.push(raw[cursor].to_string());
            cursor += 1;
        }
    }

    if parts.len() != 5 {
        return Err(ParseTokenError {
            token: line.to_string(),
            expected: "an aircraft line of the form id-TYPE-RESTR-t1-t2",
        }
        .into());
    }

    let id = parts[0].clone();

    let kind = if parts[1] == "JMB" {
        AircraftKind::Jumbo
    } else {
        AircraftKind::Standard
    };

    let restriction = match parts[2].as_str() {
        "T" => Restriction::Ordered,
        "F" => Restriction::None,
        other => {
            return Err(ParseTokenError {
                token: other.to_string(),
                expected: "a restriction flag 'T' or 'F'",
            }
            .into());
        }
    };

    let parse_count = |token: &str| -> Result<i64, ParseTokenError> {
        token.parse().map_err(|_| ParseTokenError {
            token: token.to_string(),
            expected: "a task count integer",
        })
    };

    let type1 = parse_count(&parts[3])?;
    let type2 = parse_count(&parts[4])?;

    if type1 < 0 || type2 < 0 {
        return Err(ProblemLoaderError::NegativeTaskCount { aircraft_id: id });
    }

    Ok(AircraftLine {
        id,
        kind,
        restriction,
        type1_count: type1 as u32,
        type2_count: type2 as u32,
    })
}
