//! Scoring module - line clear points, level progression and gravity speed

use crate::types::{
    DROP_INTERVALS, DROP_INTERVAL_FLOOR_MS, HARD_DROP_POINTS, LINES_PER_LEVEL, LINE_SCORES,
    SOFT_DROP_POINTS,
};

/// Points for clearing `lines` rows at once at `level`.
///
/// Base values are 0/100/300/500/800 for 0-4 lines, multiplied by level.
/// More than four rows at once (only reachable from a restored board) score
/// as four.
pub fn score_for_clear(lines: usize, level: u32) -> u32 {
    let base = LINE_SCORES[lines.min(LINE_SCORES.len() - 1)];
    base.saturating_mul(level)
}

/// Drop score: soft drop +1 per row, hard drop +2 per row
pub fn drop_score(rows: u32, is_hard_drop: bool) -> u32 {
    let per_row = if is_hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    rows.saturating_mul(per_row)
}

/// Level for a total line count. Levels start at 1 and go up every
/// [`LINES_PER_LEVEL`] lines; never below the configured start level.
pub fn level_for_lines(total_lines: u32, start_level: u32) -> u32 {
    (total_lines / LINES_PER_LEVEL + 1).max(start_level).max(1)
}

/// Get drop interval for a level (in milliseconds)
pub fn drop_interval_ms(level: u32) -> u32 {
    let idx = level.saturating_sub(1) as usize;
    DROP_INTERVALS
        .get(idx)
        .copied()
        .unwrap_or(DROP_INTERVAL_FLOOR_MS)
}
