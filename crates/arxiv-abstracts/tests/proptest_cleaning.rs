//! Property-based tests for filtering, normalization and corpus deduplication.

use std::collections::HashSet;
use std::path::Path;

use proptest::prelude::*;

use arxiv_abstracts::Corpus;
use arxiv_abstracts::PaperRecord;
use arxiv_abstracts::cleaning::{
    cleaned_output_path, drop_duplicate_abstracts, drop_withdrawn, is_withdrawn, normalize,
};

/// Generate records drawing ids and abstracts from small pools so collisions are common.
fn arb_record() -> impl Strategy<Value = PaperRecord> {
    (
        0u8..12,                                                      // id
        prop::sample::select(vec!["cs.AI", "cs.CL", "math.PR", "stat.ML"]), // category
        "[A-Za-z ]{0,20}",                                            // title
        prop_oneof![
            "[a-c ]{0,6}",
            Just("This paper has been withdrawn.".to_string()),
            Just("Withdrawn due to an error.".to_string()),
        ], // abstract
    )
        .prop_map(|(id, category, title, text)| PaperRecord {
            id: format!("http://arxiv.org/abs/2401.{id:05}v1"),
            primary_category: category.to_string(),
            title,
            authors: vec![],
            published: 0.0,
            r#abstract: text,
            pdf_url: String::new(),
        })
}

/// Text biased towards the characters the normalizer rewrites.
fn arb_abstract() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 $\\\\n\t\r\n./:_=#@?&-]{0,120}"
}

fn is_subsequence(sub: &[PaperRecord], full: &[PaperRecord]) -> bool {
    let mut rest = full.iter();
    sub.iter().all(|s| rest.any(|f| f == s))
}

proptest! {
    /// Normalization is total and never leaves stray whitespace.
    #[test]
    fn normalize_output_is_tidy(raw in arb_abstract()) {
        let out = normalize(&raw);

        prop_assert_eq!(out.trim(), out.as_str());
        prop_assert!(!out.contains("  "));
        prop_assert!(!out.chars().any(|c| c.is_whitespace() && c != ' '));
    }

    /// Normalization never panics on arbitrary unicode.
    #[test]
    fn normalize_accepts_any_text(raw in ".*") {
        let _ = normalize(&raw);
    }

    /// Duplicate removal keeps the first occurrence of each abstract, in order.
    #[test]
    fn duplicate_removal_keeps_first(records in prop::collection::vec(arb_record(), 0..40)) {
        let out = drop_duplicate_abstracts(records.clone());

        let unique: HashSet<_> = out.iter().map(|r| r.r#abstract.as_str()).collect();
        prop_assert_eq!(unique.len(), out.len());

        let expected: HashSet<_> = records.iter().map(|r| r.r#abstract.as_str()).collect();
        prop_assert_eq!(unique, expected);

        prop_assert!(is_subsequence(&out, &records));
        for kept in &out {
            let first = records.iter().find(|r| r.r#abstract == kept.r#abstract);
            prop_assert_eq!(first, Some(kept));
        }
    }

    /// Running duplicate removal twice changes nothing.
    #[test]
    fn duplicate_removal_is_idempotent(records in prop::collection::vec(arb_record(), 0..40)) {
        let once = drop_duplicate_abstracts(records);
        let twice = drop_duplicate_abstracts(once.clone());
        prop_assert_eq!(once, twice);
    }

    /// Withdrawal filtering removes exactly the flagged records and keeps order.
    #[test]
    fn withdrawal_filter_is_exact(records in prop::collection::vec(arb_record(), 0..40)) {
        let out = drop_withdrawn(records.clone());

        prop_assert!(out.iter().all(|r| !is_withdrawn(&r.r#abstract)));
        let flagged = records.iter().filter(|r| is_withdrawn(&r.r#abstract)).count();
        prop_assert_eq!(out.len() + flagged, records.len());
        prop_assert!(is_subsequence(&out, &records));
    }

    /// Corpus deduplication keeps one record per id holding the last value seen.
    #[test]
    fn corpus_keeps_last_value_per_id(records in prop::collection::vec(arb_record(), 0..40)) {
        let corpus = Corpus::from_records(records.clone());

        let ids: HashSet<_> = records.iter().map(|r| r.id.as_str()).collect();
        prop_assert_eq!(corpus.len(), ids.len());

        for record in corpus.iter() {
            let last = records.iter().rev().find(|r| r.id == record.id);
            prop_assert_eq!(last, Some(record));
        }
    }

    /// The cleaned output sits next to the input with the stem suffixed.
    #[test]
    fn output_path_is_sibling(dir in "[a-z]{1,8}", stem in "[a-z0-9_]{1,16}") {
        let input = Path::new(&dir).join(format!("{stem}.json"));
        let output = cleaned_output_path(&input).unwrap();

        let expected_name = format!("{stem}-cleaned.txt");

        prop_assert_eq!(output.parent(), input.parent());
        prop_assert_eq!(
            output.file_name().and_then(|n| n.to_str()),
            Some(expected_name.as_str())
        );
    }
}
