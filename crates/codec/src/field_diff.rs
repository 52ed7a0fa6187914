//! Field diff module - run-length coded deltas between consecutive fields
//!
//! Each cell contributes `current - previous + 8`. Cells with equal deltas are
//! grouped into runs, and each run is written as one 2-digit group holding
//! `diff * 240 + (len - 1)`.

use arrayvec::ArrayVec;

use crate::alphabet::{self, DigitReader};
use crate::error::{DecodeError, EncodeError, StreamPart};
use crate::types::{Field, FIELD_SIZE};

/// Digits per run group
pub const RUN_DIGITS: usize = 2;

/// Offset added to every cell delta
pub const DIFF_BIAS: i32 = 8;

/// A run of cells sharing one biased delta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub diff: i32,
    pub len: usize,
}

impl Run {
    /// Packed group value; negative when the delta is below the bias floor
    pub fn value(&self) -> i64 {
        self.diff as i64 * FIELD_SIZE as i64 + (self.len as i64 - 1)
    }
}

/// Split the delta from `previous` to `current` into runs
pub fn diff_runs(previous: &Field, current: &Field) -> ArrayVec<Run, FIELD_SIZE> {
    let mut runs: ArrayVec<Run, FIELD_SIZE> = ArrayVec::new();
    let cells = previous.cells().iter().zip(current.cells().iter());

    for (&prev, &cur) in cells {
        let diff = cur as i32 - prev as i32 + DIFF_BIAS;
        match runs.last_mut() {
            Some(run) if run.diff == diff => run.len += 1,
            _ => runs.push(Run { diff, len: 1 }),
        }
    }

    runs
}

/// Append the run groups for `current` against `previous`
pub fn encode_field(
    previous: &Field,
    current: &Field,
    page: usize,
    out: &mut String,
) -> Result<(), EncodeError> {
    for run in diff_runs(previous, current) {
        let value = run.value();
        if value < 0 || !alphabet::fits(value as u64, RUN_DIGITS) {
            return Err(EncodeError::RangeViolation {
                page,
                field: "field run",
                value,
            });
        }
        alphabet::push_digits(out, value as u32, RUN_DIGITS);
    }
    Ok(())
}

/// Rebuild a field from run groups applied on top of `previous`
///
/// A final run that overshoots the field is cut at the last cell.
pub fn decode_field(
    previous: &Field,
    reader: &mut DigitReader<'_>,
    page: usize,
) -> Result<Field, DecodeError> {
    let mut cells = [0u8; FIELD_SIZE];
    let mut filled = 0;

    while filled < FIELD_SIZE {
        let value = reader
            .read(RUN_DIGITS)
            .map_err(|s| s.at(page, StreamPart::Field))?;
        let diff = (value / FIELD_SIZE as u32) as i32;
        let len = (value % FIELD_SIZE as u32) as usize + 1;
        let end = (filled + len).min(FIELD_SIZE);

        for index in filled..end {
            let cell = previous.cells()[index] as i32 + diff - DIFF_BIAS;
            cells[index] = u8::try_from(cell).map_err(|_| DecodeError::CorruptField {
                page,
                index,
                value: cell,
            })?;
        }
        filled = end;
    }

    Ok(Field::from_cells(cells))
}
