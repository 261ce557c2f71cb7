//! Scoring module - classic line-clear scoring, leveling and gravity speed

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, LEVEL_SPEEDUP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Calculate line clear score
/// lines: number of lines cleared (1-4)
/// level: current level (0-based)
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    if lines == 0 || lines as usize >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines as usize].saturating_mul(level.saturating_add(1))
}

/// Levels gained when the line total goes from `before` to `after`
///
/// One level per multiple of [`LINES_PER_LEVEL`] crossed.
pub fn levels_gained(before: u32, after: u32) -> u32 {
    (after / LINES_PER_LEVEL).saturating_sub(before / LINES_PER_LEVEL)
}

/// Gravity interval for a level in milliseconds, floored at the minimum
pub fn get_drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_mul(LEVEL_SPEEDUP_MS))
        .max(DROP_INTERVAL_MIN_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        // Level 0
        assert_eq!(calculate_line_score(1, 0), 40);
        assert_eq!(calculate_line_score(2, 0), 100);
        assert_eq!(calculate_line_score(3, 0), 300);
        assert_eq!(calculate_line_score(4, 0), 1200);

        // Level 2
        assert_eq!(calculate_line_score(4, 2), 3600);
        assert_eq!(calculate_line_score(1, 5), 40 * 6);
    }

    #[test]
    fn test_out_of_table_scores_nothing() {
        assert_eq!(calculate_line_score(0, 3), 0);
        assert_eq!(calculate_line_score(5, 0), 0);
    }

    #[test]
    fn test_levels_gained() {
        assert_eq!(levels_gained(0, 9), 0);
        assert_eq!(levels_gained(9, 10), 1);
        assert_eq!(levels_gained(8, 12), 1);
        assert_eq!(levels_gained(18, 21), 1);
        assert_eq!(levels_gained(10, 13), 0);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(get_drop_interval_ms(0), 1000);
        assert_eq!(get_drop_interval_ms(1), 925);
        assert_eq!(get_drop_interval_ms(12), 100);
        assert_eq!(get_drop_interval_ms(20), 100);
        assert_eq!(get_drop_interval_ms(u32::MAX), 100);
    }
}
