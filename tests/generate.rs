//! End-to-end generation over a temp-directory fixture.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use stimlist::error::Error;
use stimlist::paths::ExperimentPaths;
use stimlist::run::{self, GenerateOptions};
use tempfile::TempDir;

const NO_ITEMS: u32 = 4;
const NO_FILLERS: u32 = 8;

/// Write a complete 2-condition / 2-list fixture under `inputs`.
fn write_fixture(inputs: &Path, no_fillers: u32) {
    fs::create_dir_all(inputs).unwrap();

    let config = "\
fillers fillers.txt
stimuli stimuli.txt
template template.tex
no_conds 2
filler_ratio 2:1
no_lists 2
ex_name RatTask
";
    fs::write(inputs.join("config.txt"), config).unwrap();

    let mut stimuli = String::new();
    for item in 1..=NO_ITEMS {
        for cond in 1..=2 {
            stimuli.push_str(&item_text(item, cond));
            stimuli.push('\n');
        }
        stimuli.push('\n');
    }
    fs::write(inputs.join("stimuli.txt"), stimuli).unwrap();

    let mut fillers = String::new();
    for filler in 1..=no_fillers {
        fillers.push_str(&filler_text(filler));
        fillers.push('\n');
    }
    fs::write(inputs.join("fillers.txt"), fillers).unwrap();

    let template = "\\documentclass{{article}}\n% {expname} List {listno}\n\\begin{{document}}\n{items}\\end{{document}}\n";
    fs::write(inputs.join("template.tex"), template).unwrap();
}

fn item_text(item: u32, cond: u32) -> String {
    format!("item{item} sentence under condition {cond}")
}

fn filler_text(filler: u32) -> String {
    format!("filler sentence number {filler}")
}

/// Stimulus text for an order-log identifier.
fn text_for(id: &str) -> String {
    match id.split_once('-') {
        Some((item, cond)) => item_text(item.parse().unwrap(), cond.parse().unwrap()),
        None => filler_text(id.parse().unwrap()),
    }
}

fn generate(inputs: &Path, outputs: &Path, seed: u64) -> run::RunSummary {
    let opts = GenerateOptions {
        paths: ExperimentPaths::new(inputs.to_path_buf(), outputs.to_path_buf()),
        seed: Some(seed),
        compile: false,
    };
    run::run_generate(&opts).unwrap()
}

#[test]
fn generates_every_list_with_consistent_order_logs() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("inputs");
    let outputs = dir.path().join("outputs");
    write_fixture(&inputs, NO_FILLERS);

    let summary = generate(&inputs, &outputs, 7);
    assert!(summary.failed_lists().is_empty(), "{:?}", summary.lists);
    assert_eq!(summary.lists.len(), 2);
    assert_eq!(summary.items_count, NO_ITEMS as usize);
    assert_eq!(summary.fillers_count, NO_FILLERS as usize);

    let mut compound_ids = BTreeSet::new();
    for list_no in 1..=2u32 {
        let order_path = outputs.join(format!("List-{list_no}/RatTask-List-{list_no}-Order.txt"));
        let order = fs::read_to_string(&order_path).unwrap();
        let ids: Vec<&str> = order.lines().collect();
        assert_eq!(ids.len(), (NO_ITEMS + NO_FILLERS) as usize);

        let unique: BTreeSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len(), "order log has duplicate ids");

        // The document must present the stimuli in exactly the logged order.
        let doc_path = outputs.join(format!("List-{list_no}/RatTask-List-{list_no}.tex"));
        let doc = fs::read_to_string(&doc_path).unwrap();
        assert!(doc.contains(&format!("% RatTask List {list_no}")));
        assert!(doc.contains("\\begin{document}"), "braces unescaped");
        let mut cursor = 0;
        for id in &ids {
            let text = text_for(id);
            let found = doc[cursor..]
                .find(&text)
                .unwrap_or_else(|| panic!("list {list_no}: {id} out of order or missing"));
            cursor += found + text.len();
        }

        for id in ids {
            if id.contains('-') {
                compound_ids.insert(id.to_string());
            }
        }
    }

    // Across both lists, every condition of every item is used exactly once.
    assert_eq!(compound_ids.len(), (NO_ITEMS * 2) as usize);
    for item in 1..=NO_ITEMS {
        for cond in 1..=2 {
            assert!(compound_ids.contains(&format!("{item}-{cond}")));
        }
    }

    assert!(outputs.join("run_report.json").is_file());
}

#[test]
fn seeded_runs_are_reproducible() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("inputs");
    write_fixture(&inputs, NO_FILLERS);

    let first_out = dir.path().join("first");
    let second_out = dir.path().join("second");
    generate(&inputs, &first_out, 42);
    generate(&inputs, &second_out, 42);

    for list_no in 1..=2u32 {
        let rel = format!("List-{list_no}/RatTask-List-{list_no}-Order.txt");
        let first = fs::read_to_string(first_out.join(&rel)).unwrap();
        let second = fs::read_to_string(second_out.join(&rel)).unwrap();
        assert_eq!(first, second, "list {list_no} order differs across runs");
    }
}

#[test]
fn ratio_mismatch_aborts_before_writing() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("inputs");
    let outputs = dir.path().join("outputs");
    // 4 fillers over 4 items gives quotient 1, not the configured 2.
    write_fixture(&inputs, 4);

    let opts = GenerateOptions {
        paths: ExperimentPaths::new(inputs, outputs.clone()),
        seed: None,
        compile: false,
    };
    let err = run::run_generate(&opts).unwrap_err();
    assert!(matches!(err, Error::RatioMismatch { observed: 1, expected: 2, .. }));
    assert!(!outputs.exists(), "nothing should be written on a fatal error");
}

#[test]
fn check_reports_the_design_without_writing() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("inputs");
    write_fixture(&inputs, NO_FILLERS);

    let paths = ExperimentPaths::new(inputs.clone(), inputs.clone());
    let report = run::run_check(&paths).unwrap();
    assert_eq!(report.ex_name, "RatTask");
    assert_eq!(report.no_conds, 2);
    assert_eq!(report.items_count, 4);
    assert_eq!(report.fillers_count, 8);
    assert_eq!(report.filler_ratio, "2:1");

    let entries: Vec<_> = fs::read_dir(&inputs).unwrap().collect();
    assert_eq!(entries.len(), 4, "check must not create files");
}
