//! Layering guardrails to keep the harness library independent of the CLI.
//!
//! `harness` is the reusable core; `cli` sits on top of it. This test scans every
//! harness source file and fails if one reaches back into `crate::cli`, or prints
//! directly instead of going through the reporter.

const HARNESS_SOURCES: &[(&str, &str)] = &[
    ("build.rs", include_str!("../src/harness/build.rs")),
    ("case.rs", include_str!("../src/harness/case.rs")),
    ("compare.rs", include_str!("../src/harness/compare.rs")),
    ("config.rs", include_str!("../src/harness/config.rs")),
    ("driver.rs", include_str!("../src/harness/driver.rs")),
    ("errors.rs", include_str!("../src/harness/errors.rs")),
    ("executor.rs", include_str!("../src/harness/executor.rs")),
    ("mod.rs", include_str!("../src/harness/mod.rs")),
    ("reporter.rs", include_str!("../src/harness/reporter.rs")),
    ("stage.rs", include_str!("../src/harness/stage.rs")),
];

#[test]
fn harness_does_not_depend_on_cli() {
    for (name, source) in HARNESS_SOURCES {
        for (idx, line) in source.lines().enumerate() {
            let code = line.split("//").next().unwrap_or("");
            assert!(
                !code.contains("crate::cli"),
                "src/harness/{name}:{} must not use `crate::cli`",
                idx + 1
            );
        }
    }
}

#[test]
fn harness_does_not_print_directly() {
    for (name, source) in HARNESS_SOURCES {
        for (idx, line) in source.lines().enumerate() {
            let code = line.trim_start();
            if code.starts_with("//") {
                continue;
            }
            for banned in ["println!", "eprintln!", "print!(", "eprint!("] {
                assert!(
                    !code.contains(banned),
                    "src/harness/{name}:{} uses `{banned}`; report through `Reporter` instead",
                    idx + 1
                );
            }
        }
    }
}
