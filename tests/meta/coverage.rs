//! Keeps `tests/unit` a mirror of `src`

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    // Entry points and module organization files need no unit test file
    fn is_structural(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    fn collect_relative_paths(dir: &Path, base: &Path) -> Result<HashSet<String>, io::Error> {
        let mut paths = HashSet::new();
        if !dir.is_dir() {
            return Ok(paths);
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|_stripped| io::Error::other("Failed to strip prefix"))?
                .to_string_lossy()
                .to_string();

            if path.is_dir() {
                paths.extend(collect_relative_paths(&path, base)?);
                paths.insert(relative);
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative);
            }
        }
        Ok(paths)
    }

    fn mirror_paths() -> (HashSet<String>, HashSet<String>) {
        let src = collect_relative_paths(Path::new("src"), Path::new("src")).unwrap_or_default();
        let unit = collect_relative_paths(Path::new("tests/unit"), Path::new("tests/unit"))
            .unwrap_or_default();
        (src, unit)
    }

    #[test]
    fn test_all_src_files_have_unit_tests() {
        let (src, unit) = mirror_paths();
        assert!(!src.is_empty(), "src directory not found");

        let mut missing: Vec<&String> = src
            .iter()
            .filter(|path| !is_structural(path) && !unit.contains(*path))
            .collect();
        missing.sort();

        assert!(
            missing.is_empty(),
            "Source files without unit test counterparts:\n{}",
            missing
                .iter()
                .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let (src, unit) = mirror_paths();

        let mut orphaned: Vec<&String> = unit
            .iter()
            .filter(|path| !path.ends_with("mod.rs") && !src.contains(*path))
            .collect();
        orphaned.sort();

        assert!(
            orphaned.is_empty(),
            "Unit test files without a source file:\n{}",
            orphaned
                .iter()
                .map(|path| format!("  - tests/unit/{path}"))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    #[test]
    fn test_all_test_files_contain_tests() {
        let tests = collect_relative_paths(Path::new("tests"), Path::new("tests"))
            .unwrap_or_default();

        let mut without_tests: Vec<&String> = tests
            .iter()
            .filter(|path| path.ends_with(".rs") && !path.ends_with("mod.rs"))
            .filter(|path| {
                fs::read_to_string(Path::new("tests").join(path.as_str()))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .collect();
        without_tests.sort();

        assert!(
            without_tests.is_empty(),
            "Test files without any #[test] function:\n{}",
            without_tests
                .iter()
                .map(|path| format!("  - tests/{path}"))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}
