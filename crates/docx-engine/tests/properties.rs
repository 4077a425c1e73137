//! Property tests for validation and issue ordering

mod common;

use common::{fixed_now, notice_data, paragraph_texts, patrol_data};
use docx_engine::{
    generate_with, validate_for, BuildContext, DocumentData, DocumentField, GenerateError, Issue,
    TemplateKind,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;

fn clear(data: &mut DocumentData, field: DocumentField) {
    match field {
        DocumentField::ProjectName => data.project_name.clear(),
        DocumentField::InspectionLocation => data.inspection_location = None,
        DocumentField::InspectionStartDate => data.inspection_start_date = None,
        DocumentField::InspectionEndDate => data.inspection_end_date = None,
        DocumentField::InspectorName => data.inspector_name = Some(String::new()),
        DocumentField::Findings => data.findings = None,
        DocumentField::NoticeContent => data.notice_content = Some(String::new()),
        DocumentField::SupervisorName => data.supervisor_name = None,
        DocumentField::NoticeDate => data.notice_date = None,
        DocumentField::RecipientName => data.recipient_name = None,
        DocumentField::Subject => data.subject = Some(String::new()),
    }
}

fn complete_data(kind: TemplateKind) -> DocumentData {
    match kind {
        TemplateKind::PatrolRecord => patrol_data(),
        _ => notice_data(),
    }
}

fn kind_strategy() -> impl Strategy<Value = TemplateKind> {
    prop::sample::select(TemplateKind::ALL.to_vec())
}

proptest! {
    /// Removing any subset of required fields reports exactly that subset,
    /// in declared order, and produces no document.
    #[test]
    fn prop_missing_fields_are_reported_exactly(
        (kind, removed) in kind_strategy().prop_flat_map(|kind| {
            let required = kind.template().required_fields.to_vec();
            let len = required.len();
            (Just(kind), prop::sample::subsequence(required, 0..=len))
        }),
        seed in any::<u64>(),
    ) {
        let mut data = complete_data(kind);
        for field in &removed {
            clear(&mut data, *field);
        }

        let report = validate_for(kind.id(), &data).unwrap();
        prop_assert_eq!(report.valid, removed.is_empty());
        prop_assert_eq!(&report.missing_fields, &removed);

        let mut rng = StdRng::seed_from_u64(seed);
        let mut ctx = BuildContext::new(&mut rng, fixed_now());
        match generate_with(kind.id(), &data, &mut ctx) {
            Ok(doc) => {
                prop_assert!(removed.is_empty());
                prop_assert!(!doc.bytes.is_empty());
            }
            Err(GenerateError::Validation(err)) => {
                prop_assert_eq!(err.missing_fields, removed);
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    /// Optional fields never affect validity
    #[test]
    fn prop_optional_fields_do_not_matter(kind in kind_strategy(), drop_optional in any::<bool>()) {
        let mut data = complete_data(kind);
        if drop_optional {
            for field in kind.template().optional_fields {
                clear(&mut data, *field);
            }
        }
        prop_assert!(validate_for(kind.id(), &data).unwrap().valid);
    }

    /// Issues appear numbered from 1 in input order, duplicates included
    #[test]
    fn prop_issue_order_is_preserved(
        kind in kind_strategy(),
        descriptions in prop::collection::vec("[a-z一-龥]{1,12}", 0..15),
    ) {
        let data = DocumentData {
            issues: descriptions.iter().map(Issue::new).collect(),
            ..complete_data(kind)
        };
        let mut rng = StdRng::seed_from_u64(0);
        let mut ctx = BuildContext::new(&mut rng, fixed_now());
        let doc = generate_with(kind.id(), &data, &mut ctx).unwrap();

        let numbered = Regex::new(r"^\d+\. ").unwrap();
        let found: Vec<String> = paragraph_texts(&doc.bytes)
            .into_iter()
            .filter(|line| numbered.is_match(line))
            .collect();
        let expected: Vec<String> = descriptions
            .iter()
            .enumerate()
            .map(|(i, d)| format!("{}. {}", i + 1, d))
            .collect();
        prop_assert_eq!(found, expected);
    }
}
