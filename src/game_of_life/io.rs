//! Plaintext pattern files
//!
//! One row per line; `*`, `O` or `1` mark a live cell and `.`, `0` or a space
//! a dead one. Lines starting with `!` are comments. The column index becomes
//! `x` and the row index becomes `y`.

use super::{Coordinate, LiveCellSet};
use anyhow::{Context, Result};
use std::path::Path;

/// Largest bounding box, in cells, that [`pattern_to_string`] will render
pub const MAX_PATTERN_AREA: u64 = 1_000_000;

/// Names accepted by [`builtin_pattern`]
pub const BUILTIN_PATTERNS: [&str; 4] = ["glider", "blinker", "block", "beacon"];

/// Load a pattern from a text file
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Coordinate>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_pattern(&content)
        .with_context(|| format!("Failed to parse pattern from file: {}", path.as_ref().display()))
}

/// Parse a pattern from its text representation
pub fn parse_pattern(content: &str) -> Result<Vec<Coordinate>> {
    let mut cells = Vec::new();

    let rows = content.lines().filter(|line| !line.starts_with('!'));
    for (y, line) in rows.enumerate() {
        for (x, ch) in line.trim_end().chars().enumerate() {
            match ch {
                '*' | 'O' | '1' => cells.push(Coordinate::new(x as i64, y as i64)),
                '.' | '0' | ' ' => {}
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only '*', 'O', '1', '.', '0' and ' ' are allowed",
                    ch,
                    x,
                    y
                ),
            }
        }
    }

    Ok(cells)
}

/// Render live cells inside their bounding box, `*` for alive and `.` for dead.
///
/// Fails when the bounding box holds more than [`MAX_PATTERN_AREA`] cells.
pub fn pattern_to_string(cells: &LiveCellSet) -> Result<String> {
    let Some((min, max)) = cells.bounding_box() else {
        return Ok(String::new());
    };

    let width = max.x().abs_diff(min.x()).checked_add(1);
    let height = max.y().abs_diff(min.y()).checked_add(1);
    let area = width.zip(height).and_then(|(w, h)| w.checked_mul(h));
    if !area.is_some_and(|area| area <= MAX_PATTERN_AREA) {
        anyhow::bail!(
            "Pattern bounding box {}..={} exceeds {} cells",
            min,
            max,
            MAX_PATTERN_AREA
        );
    }

    let mut result = String::new();
    for y in min.y()..=max.y() {
        for x in min.x()..=max.x() {
            let alive = cells.contains(&Coordinate::new(x, y));
            result.push(if alive { '*' } else { '.' });
        }
        result.push('\n');
    }
    Ok(result)
}

/// Save live cells as a pattern file
pub fn save_pattern_to_file<P: AsRef<Path>>(cells: &LiveCellSet, path: P) -> Result<()> {
    let content = pattern_to_string(cells)?;

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write pattern to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Look up one of the well-known patterns by name
pub fn builtin_pattern(name: &str) -> Option<Vec<Coordinate>> {
    let points: &[(i64, i64)] = match name {
        // Travels towards positive x and negative y
        "glider" => &[(0, 0), (1, 0), (2, 0), (2, -1), (1, -2)],
        "blinker" => &[(0, 0), (1, 0), (2, 0)],
        "block" => &[(0, 0), (1, 0), (0, 1), (1, 1)],
        "beacon" => &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
        _ => return None,
    };
    Some(points.iter().copied().map(Coordinate::from).collect())
}

/// Resolve either a built-in pattern name or a path to a pattern file
pub fn resolve_pattern(name_or_path: &str) -> Result<Vec<Coordinate>> {
    match builtin_pattern(name_or_path) {
        Some(cells) => Ok(cells),
        None => load_pattern_from_file(name_or_path),
    }
}

/// Write every built-in pattern to `output_dir` as `<name>.cells`
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for name in BUILTIN_PATTERNS {
        let cells: LiveCellSet = builtin_pattern(name).into_iter().flatten().collect();
        let content = format!("!Name: {}\n{}", name, pattern_to_string(&cells)?);
        std::fs::write(dir.join(format!("{}.cells", name)), content)
            .with_context(|| format!("Failed to write {}.cells", name))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_pattern() {
        let content = "!Name: glider\n.*.\n..*\n***\n";
        let cells: LiveCellSet = parse_pattern(content).unwrap().into_iter().collect();

        assert_eq!(cells.len(), 5);
        assert!(cells.contains(&Coordinate::new(1, 0)));
        assert!(cells.contains(&Coordinate::new(2, 1)));
        assert!(cells.contains(&Coordinate::new(0, 2)));
        assert!(!cells.contains(&Coordinate::new(0, 0)));
    }

    #[test]
    fn test_parse_ragged_rows() {
        let cells = parse_pattern(" *\n  *\n***").unwrap();
        assert_eq!(cells.len(), 5);
        assert!(cells.contains(&Coordinate::new(2, 1)));
    }

    #[test]
    fn test_invalid_input() {
        assert!(parse_pattern(".*.\n.X.\n").is_err());
        assert!(parse_pattern("").unwrap().is_empty());
    }

    #[test]
    fn test_pattern_to_string() {
        let cells: LiveCellSet = builtin_pattern("glider").unwrap().into_iter().collect();
        assert_eq!(pattern_to_string(&cells).unwrap(), ".*.\n..*\n***\n");
        assert_eq!(pattern_to_string(&LiveCellSet::empty()).unwrap(), "");
    }

    #[test]
    fn test_distant_cells_are_rejected() {
        let cells: LiveCellSet = [(0, 0), (10_000_000, 10_000_000)].into_iter().map(Coordinate::from).collect();
        assert!(pattern_to_string(&cells).is_err());

        let edges: LiveCellSet = [(i64::MIN, 0), (i64::MAX, 0)].into_iter().map(Coordinate::from).collect();
        assert!(pattern_to_string(&edges).is_err());

        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("sparse.cells");
        assert!(save_pattern_to_file(&cells, &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_builtin_patterns() {
        for name in BUILTIN_PATTERNS {
            assert!(builtin_pattern(name).is_some(), "missing {}", name);
        }
        assert!(builtin_pattern("spaceship").is_none());
        assert_eq!(builtin_pattern("beacon").unwrap().len(), 8);
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/block.cells");

        let original: LiveCellSet = builtin_pattern("block").unwrap().into_iter().collect();
        save_pattern_to_file(&original, &file_path).unwrap();

        let loaded: LiveCellSet = load_pattern_from_file(&file_path).unwrap().into_iter().collect();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_create_example_patterns() {
        let temp_dir = tempdir().unwrap();
        create_example_patterns(temp_dir.path()).unwrap();

        for name in BUILTIN_PATTERNS {
            assert!(temp_dir.path().join(format!("{}.cells", name)).exists());
        }

        let path = temp_dir.path().join("glider.cells");
        let glider = resolve_pattern(path.to_str().unwrap()).unwrap();
        assert_eq!(glider.len(), 5);
    }
}
