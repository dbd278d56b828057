use labgrade::{
    assignment::CheckSpec,
    grade::predicate::{PatternError, Predicate, compile_pattern},
};

fn check(label: &str, patterns: &[&str]) -> CheckSpec {
    CheckSpec::builder()
        .label(label)
        .patterns(patterns.iter().map(ToString::to_string))
        .build()
}

#[test]
fn any_variant_satisfies() {
    let imports = Predicate::compile(&check("Imports mongoose", &[
        r#"require\s*\(\s*["'`]mongoose["'`]\s*\)"#,
        r#"import\s+mongoose\s+from\s+["'`]mongoose["'`]"#,
    ]));

    assert!(imports.is_satisfied(r#"const mongoose = require("mongoose");"#));
    assert!(imports.is_satisfied("import mongoose from 'mongoose';"));
    assert!(!imports.is_satisfied("import express from 'express';"));
}

#[test]
fn matching_is_case_insensitive() {
    let find = Predicate::compile(&check("Uses Song.find()", &[r"Song\s*\.\s*find\s*\("]));
    assert!(find.is_satisfied("await SONG.Find({})"));
}

#[test]
fn evaluate_records_label_and_outcome() {
    let status = Predicate::compile(&check("Responds 201", &[r"status\s*\(\s*201\s*\)"]));

    let passed = status.evaluate("res.status(201).json(song)");
    assert_eq!(passed.label, "Responds 201");
    assert!(passed.satisfied);

    let failed = status.evaluate("res.json(song)");
    assert!(!failed.satisfied);
}

#[test]
fn malformed_variant_never_matches_but_others_still_count() {
    let spec = check("Sorts newest first", &[r"\.sort\s*\(\s*\{", r"(unclosed"]);

    let err = compile_pattern(&spec.label, &spec.patterns[1]).expect_err("invalid regex");
    assert!(matches!(err, PatternError::Malformed { .. }));
    assert!(err.to_string().contains("Sorts newest first"));

    let sorts = Predicate::compile(&spec);
    assert!(sorts.is_satisfied("Song.find().sort({ createdAt: -1 })"));
    assert!(!sorts.is_satisfied("(unclosed"));
}

#[test]
fn only_malformed_variants_fail_closed() {
    let broken = Predicate::compile(&check("Broken", &[r"[", r"a{2,1}"]));
    assert!(!broken.is_satisfied("[ aa"));
    assert!(!broken.evaluate("anything").satisfied);
}

#[test]
fn check_without_variants_fails() {
    let none = Predicate::compile(&check("Nothing to look for", &[]));
    assert!(!none.is_satisfied("app.get('/api/songs', handler)"));
}

#[test]
fn commented_out_code_still_matches() {
    // Raw-text matching is a known false-positive source that existing
    // rubrics depend on.
    let route = Predicate::compile(&check("Defines DELETE", &[
        r#"app\s*\.\s*delete\s*\(\s*["'`]/api/songs/:id["'`]\s*,"#,
    ]));
    assert!(route.is_satisfied("// app.delete(\"/api/songs/:id\", handler)"));
}
