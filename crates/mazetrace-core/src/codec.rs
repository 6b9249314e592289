//! Trace persistence: encode/decode a [`Trace`] as a record-oriented text
//! stream.
//!
//! ## Stream format
//!
//! CSV with a fixed header row naming all columns, then one record per line.
//! Four record kinds share the stream:
//!
//! ```text
//! META  : algorithm, maze dimensions, start and goal positions
//! CELL  : one row per grid cell (the maze snapshot)
//! EVENT : one row per search event, in step order
//! PATH  : one row per path position, in path order
//! ```
//!
//! Fields that do not apply to a record are left empty; decoding treats an
//! empty field as absent, never as zero. Decoding is header-driven, so a
//! stream with reordered columns still loads. Unknown record types and event
//! names are skipped with a warning; malformed values reject the stream.

use std::io::{Read, Write};

use crate::error::FormatError;
use crate::maze::{Cell, Maze};
use crate::position::Position;
use crate::trace::{Algorithm, Event, EventKind, Trace};

/// Column names, in the order they are written.
const COLUMNS: [&str; 18] = [
    "record_type",
    "algorithm",
    "step",
    "event",
    "row",
    "col",
    "parent_row",
    "parent_col",
    "g",
    "f",
    "frontier_size",
    "maze_rows",
    "maze_cols",
    "cell_value",
    "start_row",
    "start_col",
    "end_row",
    "end_col",
];

/// Column indices into [`COLUMNS`] for the writer side.
mod col {
    pub const RECORD_TYPE: usize = 0;
    pub const ALGORITHM: usize = 1;
    pub const STEP: usize = 2;
    pub const EVENT: usize = 3;
    pub const ROW: usize = 4;
    pub const COL: usize = 5;
    pub const PARENT_ROW: usize = 6;
    pub const PARENT_COL: usize = 7;
    pub const G: usize = 8;
    pub const F: usize = 9;
    pub const FRONTIER_SIZE: usize = 10;
    pub const MAZE_ROWS: usize = 11;
    pub const MAZE_COLS: usize = 12;
    pub const CELL_VALUE: usize = 13;
    pub const START_ROW: usize = 14;
    pub const START_COL: usize = 15;
    pub const END_ROW: usize = 16;
    pub const END_COL: usize = 17;
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// One output row; unset fields stay empty.
struct Row([String; 18]);

impl Row {
    fn new(record_type: &str, algorithm: Algorithm) -> Self {
        let mut fields: [String; 18] = std::array::from_fn(|_| String::new());
        fields[col::RECORD_TYPE] = record_type.to_string();
        fields[col::ALGORITHM] = algorithm.name().to_string();
        Self(fields)
    }

    fn set(&mut self, idx: usize, value: impl ToString) {
        self.0[idx] = value.to_string();
    }

    fn set_opt(&mut self, idx: usize, value: Option<impl ToString>) {
        if let Some(v) = value {
            self.0[idx] = v.to_string();
        }
    }

    fn write<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "{}", self.0.join(","))
    }
}

/// Write `trace` to `w` in the record stream format.
pub fn encode<W: Write>(trace: &Trace, mut w: W) -> Result<(), FormatError> {
    writeln!(w, "{}", COLUMNS.join(","))?;

    let alg = trace.algorithm;
    let maze = &trace.maze;

    let mut meta = Row::new("META", alg);
    meta.set(col::MAZE_ROWS, maze.rows());
    meta.set(col::MAZE_COLS, maze.cols());
    meta.set(col::START_ROW, maze.start().row);
    meta.set(col::START_COL, maze.start().col);
    meta.set(col::END_ROW, maze.goal().row);
    meta.set(col::END_COL, maze.goal().col);
    meta.write(&mut w)?;

    for (i, cell) in maze.cells().iter().enumerate() {
        let mut row = Row::new("CELL", alg);
        row.set(col::ROW, i as i32 / maze.cols());
        row.set(col::COL, i as i32 % maze.cols());
        row.set(col::CELL_VALUE, cell.to_char());
        row.write(&mut w)?;
    }

    for event in &trace.events {
        let mut row = Row::new("EVENT", alg);
        row.set(col::STEP, event.step);
        row.set(col::EVENT, event.kind.name());
        row.set(col::ROW, event.pos.row);
        row.set(col::COL, event.pos.col);
        row.set_opt(col::PARENT_ROW, event.parent.map(|p| p.row));
        row.set_opt(col::PARENT_COL, event.parent.map(|p| p.col));
        row.set_opt(col::G, event.g);
        row.set_opt(col::F, event.f);
        row.set(col::FRONTIER_SIZE, event.frontier_size);
        row.write(&mut w)?;
    }

    for (i, pos) in trace.path.iter().enumerate() {
        let mut row = Row::new("PATH", alg);
        row.set(col::STEP, i);
        row.set(col::ROW, pos.row);
        row.set(col::COL, pos.col);
        row.write(&mut w)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// One input row, addressed by column name through the stream's own header.
struct Record<'a> {
    line: usize,
    header: &'a [&'a str],
    fields: Vec<&'a str>,
}

impl Record<'_> {
    /// The raw field under `name`, or `None` if the column is missing from
    /// the header or the field is empty.
    fn get(&self, name: &str) -> Option<&str> {
        let idx = self.header.iter().position(|h| *h == name)?;
        let value = self.fields.get(idx)?.trim();
        if value.is_empty() { None } else { Some(value) }
    }

    /// Parse an optional field. Absence is `Ok(None)`; a malformed value
    /// rejects the record.
    fn parse<T: std::str::FromStr>(
        &self,
        name: &'static str,
    ) -> Result<Option<T>, FormatError> {
        match self.get(name) {
            None => Ok(None),
            Some(s) => s.parse().map(Some).map_err(|_| FormatError::BadField {
                line: self.line,
                field: name,
                value: s.to_string(),
            }),
        }
    }

    /// Parse a required field.
    fn require<T: std::str::FromStr>(&self, name: &'static str) -> Result<T, FormatError> {
        self.parse(name)?.ok_or(FormatError::MissingField {
            line: self.line,
            field: name,
        })
    }

    fn require_str(&self, name: &'static str) -> Result<&str, FormatError> {
        self.get(name).ok_or(FormatError::MissingField {
            line: self.line,
            field: name,
        })
    }
}

struct Meta {
    algorithm: Algorithm,
    rows: i32,
    cols: i32,
    start: Position,
    goal: Position,
}

/// Read a trace back from `r`.
///
/// Fatal conditions: no META record, non-positive dimensions, any record
/// positioned outside the grid, malformed field values, or a cell snapshot
/// that does not form a valid maze.
pub fn decode<R: Read>(mut r: R) -> Result<Trace, FormatError> {
    let mut text = String::new();
    r.read_to_string(&mut text)?;

    let mut lines = text.lines().enumerate();
    let Some((_, header_line)) = lines.next() else {
        return Err(FormatError::MissingColumn("record_type"));
    };
    let header: Vec<&str> = header_line.split(',').map(str::trim).collect();
    if !header.contains(&"record_type") {
        return Err(FormatError::MissingColumn("record_type"));
    }

    let mut meta: Option<Meta> = None;
    let mut cell_records: Vec<(usize, i32, i32, Cell)> = Vec::new();
    let mut event_records: Vec<(usize, Event)> = Vec::new();
    let mut path_records: Vec<(u32, usize, Position)> = Vec::new();

    for (idx, raw) in lines {
        if raw.trim().is_empty() {
            continue;
        }
        let rec = Record {
            line: idx + 1,
            header: &header,
            fields: raw.split(',').map(str::trim).collect(),
        };
        let Some(record_type) = rec.get("record_type") else {
            log::warn!("line {}: record without a type, skipping", rec.line);
            continue;
        };

        match record_type.to_ascii_uppercase().as_str() {
            // A repeated META row overwrites the previous one.
            "META" => {
                let name = rec.require_str("algorithm")?;
                let algorithm =
                    name.parse::<Algorithm>()
                        .map_err(|_| FormatError::BadField {
                            line: rec.line,
                            field: "algorithm",
                            value: name.to_string(),
                        })?;
                meta = Some(Meta {
                    algorithm,
                    rows: rec.require("maze_rows")?,
                    cols: rec.require("maze_cols")?,
                    start: Position::new(
                        rec.require("start_row")?,
                        rec.require("start_col")?,
                    ),
                    goal: Position::new(rec.require("end_row")?, rec.require("end_col")?),
                });
            }
            "CELL" => {
                let value = rec.require_str("cell_value")?;
                let mut chars = value.chars();
                let cell = match (chars.next(), chars.next()) {
                    (Some(ch), None) => Cell::from_char(ch),
                    _ => None,
                }
                .ok_or_else(|| FormatError::BadField {
                    line: rec.line,
                    field: "cell_value",
                    value: value.to_string(),
                })?;
                cell_records.push((rec.line, rec.require("row")?, rec.require("col")?, cell));
            }
            "EVENT" => {
                let name = rec.require_str("event")?;
                let kind = match name.to_ascii_uppercase().as_str() {
                    "DISCOVER" => EventKind::Discover,
                    "EXPAND" => EventKind::Expand,
                    "UPDATE" => EventKind::Update,
                    other => {
                        log::warn!(
                            "line {}: skipping unknown event kind {other:?}",
                            rec.line
                        );
                        continue;
                    }
                };
                let parent = match (rec.parse("parent_row")?, rec.parse("parent_col")?) {
                    (Some(row), Some(c)) => Some(Position::new(row, c)),
                    _ => None,
                };
                event_records.push((
                    rec.line,
                    Event {
                        step: rec.require("step")?,
                        kind,
                        pos: Position::new(rec.require("row")?, rec.require("col")?),
                        parent,
                        g: rec.parse("g")?,
                        f: rec.parse("f")?,
                        frontier_size: rec.require("frontier_size")?,
                    },
                ));
            }
            "PATH" => path_records.push((
                rec.require("step")?,
                rec.line,
                Position::new(rec.require("row")?, rec.require("col")?),
            )),
            other => {
                log::warn!("line {}: skipping unknown record type {other:?}", rec.line);
            }
        }
    }

    let meta = meta.ok_or(FormatError::MissingMeta)?;
    if meta.rows <= 0 || meta.cols <= 0 {
        return Err(FormatError::BadDimensions {
            rows: meta.rows,
            cols: meta.cols,
        });
    }

    let check_bounds = |line: usize, p: Position| -> Result<(), FormatError> {
        if p.row < 0 || p.row >= meta.rows || p.col < 0 || p.col >= meta.cols {
            return Err(FormatError::OutOfBounds {
                line,
                row: p.row,
                col: p.col,
                rows: meta.rows,
                cols: meta.cols,
            });
        }
        Ok(())
    };

    // Rebuild the maze from the cell snapshot; unlisted cells default open.
    let mut cells = vec![Cell::Open; (meta.rows * meta.cols) as usize];
    for (line, row, c, cell) in cell_records {
        check_bounds(line, Position::new(row, c))?;
        cells[(row * meta.cols + c) as usize] = cell;
    }
    let maze = Maze::from_cells(meta.rows, meta.cols, cells)?;
    if maze.start() != meta.start || maze.goal() != meta.goal {
        log::warn!("META start/goal disagree with the cell snapshot; snapshot wins");
    }

    let mut events = Vec::with_capacity(event_records.len());
    for (line, event) in event_records {
        check_bounds(line, event.pos)?;
        if let Some(parent) = event.parent {
            check_bounds(line, parent)?;
        }
        events.push(event);
    }
    events.sort_by_key(|e| e.step);

    for &(_, line, pos) in &path_records {
        check_bounds(line, pos)?;
    }
    path_records.sort_by_key(|&(step, _, _)| step);
    let path = path_records.into_iter().map(|(_, _, pos)| pos).collect();

    Ok(Trace {
        algorithm: meta.algorithm,
        maze,
        events,
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trace() -> Trace {
        let maze = Maze::parse("A.\n.B\n").unwrap();
        Trace {
            algorithm: Algorithm::AStar,
            maze,
            events: vec![
                Event {
                    step: 0,
                    kind: EventKind::Discover,
                    pos: Position::new(0, 0),
                    parent: None,
                    g: Some(0),
                    f: Some(2),
                    frontier_size: 1,
                },
                Event {
                    step: 1,
                    kind: EventKind::Expand,
                    pos: Position::new(0, 0),
                    parent: None,
                    g: Some(0),
                    f: Some(2),
                    frontier_size: 0,
                },
                Event {
                    step: 2,
                    kind: EventKind::Discover,
                    pos: Position::new(0, 1),
                    parent: Some(Position::new(0, 0)),
                    g: Some(1),
                    f: Some(2),
                    frontier_size: 1,
                },
                Event {
                    step: 3,
                    kind: EventKind::Update,
                    pos: Position::new(0, 1),
                    parent: Some(Position::new(0, 0)),
                    g: Some(1),
                    f: Some(2),
                    frontier_size: 2,
                },
            ],
            path: vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 1),
            ],
        }
    }

    fn encode_to_string(trace: &Trace) -> String {
        let mut buf = Vec::new();
        encode(trace, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn round_trip_preserves_trace() {
        let trace = sample_trace();
        let text = encode_to_string(&trace);
        let back = decode(text.as_bytes()).unwrap();
        assert_eq!(back, trace);
    }

    #[test]
    fn encoded_layout() {
        let text = encode_to_string(&sample_trace());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], COLUMNS.join(","));
        assert_eq!(lines[1], "META,A*,,,,,,,,,,2,2,,0,0,1,1");
        assert_eq!(lines[2], "CELL,A*,,,0,0,,,,,,,,A,,,,");
        // header + META + 4 cells + 4 events + 3 path rows
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[6], "EVENT,A*,0,DISCOVER,0,0,,,0,2,1,,,,,,,");
        assert_eq!(lines[12], "PATH,A*,2,,1,1,,,,,,,,,,,,");
    }

    #[test]
    fn absent_fields_decode_as_absent() {
        let maze = Maze::parse("A.\n.B\n").unwrap();
        let trace = Trace {
            algorithm: Algorithm::Bfs,
            maze,
            events: vec![Event {
                step: 0,
                kind: EventKind::Expand,
                pos: Position::new(0, 0),
                parent: None,
                g: None,
                f: None,
                frontier_size: 0,
            }],
            path: vec![],
        };
        let back = decode(encode_to_string(&trace).as_bytes()).unwrap();
        let event = &back.events[0];
        assert_eq!(event.g, None);
        assert_eq!(event.f, None);
        assert_eq!(event.parent, None);
    }

    #[test]
    fn decode_tolerates_reordered_columns() {
        let text = "\
maze_cols,record_type,row,col,cell_value,algorithm,maze_rows,start_row,start_col,end_row,end_col
2,META,,,,BFS,1,0,0,0,1
,CELL,0,0,A,,,,,,
,CELL,0,1,B,,,,,,
";
        let trace = decode(text.as_bytes()).unwrap();
        assert_eq!(trace.algorithm, Algorithm::Bfs);
        assert_eq!(trace.maze.start(), Position::new(0, 0));
        assert_eq!(trace.maze.goal(), Position::new(0, 1));
    }

    #[test]
    fn decode_sorts_events_and_path_by_step() {
        let mut trace = sample_trace();
        trace.events.reverse();
        // Re-encode with reversed event order but original step numbers.
        let mut buf = Vec::new();
        encode(&trace, &mut buf).unwrap();
        let back = decode(buf.as_slice()).unwrap();
        assert!(back.events.windows(2).all(|w| w[0].step < w[1].step));
    }

    #[test]
    fn decode_rejects_missing_meta() {
        let text = format!("{}\nCELL,BFS,,,0,0,,,,,,,,A,,,,\n", COLUMNS.join(","));
        assert!(matches!(
            decode(text.as_bytes()),
            Err(FormatError::MissingMeta)
        ));
    }

    #[test]
    fn decode_rejects_bad_dimensions() {
        let text = "record_type,algorithm,maze_rows,maze_cols,start_row,start_col,end_row,end_col
META,BFS,0,3,0,0,0,1
";
        assert!(matches!(
            decode(text.as_bytes()),
            Err(FormatError::BadDimensions { rows: 0, cols: 3 })
        ));
    }

    #[test]
    fn decode_rejects_out_of_bounds_cell() {
        let text = "record_type,algorithm,maze_rows,maze_cols,start_row,start_col,end_row,end_col,row,col,cell_value
META,BFS,1,2,0,0,0,1,,,
CELL,,,,,,,,0,0,A
CELL,,,,,,,,0,1,B
CELL,,,,,,,,5,0,X
";
        assert!(matches!(
            decode(text.as_bytes()),
            Err(FormatError::OutOfBounds { row: 5, col: 0, .. })
        ));
    }

    #[test]
    fn decode_rejects_malformed_numeric_field() {
        let text = "record_type,algorithm,maze_rows,maze_cols,start_row,start_col,end_row,end_col
META,BFS,one,2,0,0,0,1
";
        assert!(matches!(
            decode(text.as_bytes()),
            Err(FormatError::BadField {
                field: "maze_rows",
                ..
            })
        ));
    }

    #[test]
    fn decode_rejects_invalid_snapshot() {
        // Snapshot with no start cell at all.
        let text = "record_type,algorithm,maze_rows,maze_cols,start_row,start_col,end_row,end_col,row,col,cell_value
META,BFS,1,2,0,0,0,1,,,
CELL,,,,,,,,0,1,B
";
        assert!(matches!(
            decode(text.as_bytes()),
            Err(FormatError::Config(_))
        ));
    }

    #[test]
    fn decode_skips_unknown_records_and_event_kinds() {
        let text = "record_type,algorithm,maze_rows,maze_cols,start_row,start_col,end_row,end_col,row,col,cell_value,step,event,frontier_size
META,BFS,1,2,0,0,0,1,,,,,,
CELL,,,,,,,,0,0,A,,,
CELL,,,,,,,,0,1,B,,,
COMMENT,,,,,,,,,,,,,
EVENT,,,,,,,,0,0,,0,DISCOVER,1
EVENT,,,,,,,,0,0,,1,TELEPORT,1
";
        let trace = decode(text.as_bytes()).unwrap();
        assert_eq!(trace.events.len(), 1);
        assert_eq!(trace.events[0].kind, EventKind::Discover);
    }

    #[test]
    fn decode_empty_stream_fails() {
        assert!(decode(&b""[..]).is_err());
    }
}
