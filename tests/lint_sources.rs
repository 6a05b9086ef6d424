//! Lint: puzzle engines must not reach for ambient randomness or time.
//!
//! Chance comes in through `RandomSource` and time through the session's
//! tick counter. A direct call to a global generator or the system clock
//! inside `src/puzzles/` makes an engine untestable and breaks replay.
//!
//! This test scans every `.rs` file under `src/puzzles/` and flags
//! non-comment lines that mention one of the forbidden paths.

use std::fs;
use std::path::Path;

const FORBIDDEN: &[&str] = &[
    "thread_rng",
    "rand::",
    "SystemTime",
    "Instant::now",
    "from_entropy",
];

/// Lines (1-based) and the forbidden token they contain.
fn find_ambient_calls(source: &str) -> Vec<(usize, &'static str)> {
    let mut violations = Vec::new();
    for (line_num_0, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("//") {
            continue;
        }
        for &token in FORBIDDEN {
            if line.contains(token) {
                violations.push((line_num_0 + 1, token));
            }
        }
    }
    violations
}

#[test]
fn puzzles_use_only_injected_randomness_and_time() {
    let puzzles_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/puzzles");
    let mut all_violations = Vec::new();
    let mut scanned = 0;

    visit_sources(&puzzles_dir, &mut all_violations, &mut scanned);

    assert!(scanned > 0, "no sources found under {}", puzzles_dir.display());
    if !all_violations.is_empty() {
        let mut msg = String::from(
            "Puzzle engines must take randomness through RandomSource and time \
             through the session tick.\n\n",
        );
        for (file, line_num, token) in &all_violations {
            msg.push_str(&format!("  {}:{}: uses `{}`\n", file, line_num, token));
        }
        panic!("{}", msg);
    }
}

fn visit_sources(
    dir: &Path,
    violations: &mut Vec<(String, usize, &'static str)>,
    scanned: &mut usize,
) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit_sources(&path, violations, scanned);
        } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
            let Ok(source) = fs::read_to_string(&path) else {
                continue;
            };
            *scanned += 1;
            let display_path = path.display().to_string();
            for (line_num, token) in find_ambient_calls(&source) {
                violations.push((display_path.clone(), line_num, token));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_global_rng() {
        let source = "let n = rand::thread_rng().gen_range(0..9);";
        let found = find_ambient_calls(source);
        assert!(found.contains(&(1, "thread_rng")));
        assert!(found.contains(&(1, "rand::")));
    }

    #[test]
    fn detects_wall_clock() {
        let source = "let a = 1;\nlet t = std::time::Instant::now();";
        assert_eq!(find_ambient_calls(source), vec![(2, "Instant::now")]);
    }

    #[test]
    fn allows_injected_source() {
        let source = "let n = rng.below(9);\nshuffle(&mut self.choices, rng);";
        assert!(find_ambient_calls(source).is_empty());
    }

    #[test]
    fn ignores_comments() {
        let source = "    // never call thread_rng here";
        assert!(find_ambient_calls(source).is_empty());
    }
}
