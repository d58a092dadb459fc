//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating claims. Generated claims mix
//! clean and problematic inputs (excluded items, waiting-period diagnoses,
//! bad registrations, unparseable dates) so invariant tests reach every
//! branch of the decision cascade.

use core_kernel::{Money, RawDate};
use domain_claims::{ClaimRecord, Hospital, LineItem, Member, SupportingDocument};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for non-negative amounts up to 20,000.00
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..2_000_000i64).prop_map(|minor| Decimal::new(minor, 2))
}

/// Strategy for amounts that straddle the fraud threshold
pub fn total_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        3 => Just(Decimal::ZERO),
        5 => amount_strategy(),
        1 => (4_000_000i64..8_000_000i64).prop_map(|minor| Decimal::new(minor, 2)),
    ]
}

pub fn category_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "Consultation",
        "Pharmacy",
        "Diagnostic",
        "Dental",
        "Vision",
        "Alternative Medicine",
        "Cosmetic",
        "Other",
    ])
}

pub fn item_name_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "Consultation Fee",
        "Medicines",
        "Blood Test",
        "Root Canal",
        "Teeth Whitening",
        "Spectacles",
        "Panchakarma",
        "Weight Loss Program",
        "Dressing",
    ])
}

pub fn line_item_strategy() -> impl Strategy<Value = LineItem> {
    (item_name_strategy(), amount_strategy(), category_strategy())
        .prop_map(|(name, amount, category)| LineItem::new(name, Money::new(amount), category))
}

pub fn diagnosis_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of(
        prop::sample::select(vec![
            "Viral fever",
            "Type 2 Diabetes",
            "tooth decay requiring root canal",
            "Cataract",
            "Hypertension",
            "Gastroenteritis",
        ])
        .prop_map(str::to_string),
    )
}

/// Dates in every accepted shape plus some that do not parse
pub fn raw_date_strategy() -> impl Strategy<Value = RawDate> {
    prop_oneof![
        (2023i32..2026, 1u32..13, 1u32..29)
            .prop_map(|(y, m, d)| RawDate::Text(format!("{:04}-{:02}-{:02}", y, m, d))),
        (2023i32..2026, 1u32..13, 1u32..29)
            .prop_map(|(y, m, d)| RawDate::Text(format!("{:02}/{:02}/{:04}", d, m, y))),
        (1_672_531_200i64..1_767_225_600i64).prop_map(|secs| RawDate::Epoch(secs as f64)),
        Just(RawDate::Text("not a date".to_string())),
    ]
}

pub fn doctor_reg_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of(
        prop::sample::select(vec!["KA/45678/2015", "AYUR/KL/2345/2019", "MH-23456-2018", "12345"])
            .prop_map(str::to_string),
    )
}

pub fn document_strategy() -> impl Strategy<Value = SupportingDocument> {
    (
        prop::sample::select(vec!["prescription", "bill", "lab_report"]),
        doctor_reg_strategy(),
    )
        .prop_map(|(doc_type, doctor_reg)| SupportingDocument {
            doctor_reg,
            ..SupportingDocument::of_type(doc_type)
        })
}

pub fn hospital_strategy() -> impl Strategy<Value = Option<Hospital>> {
    prop::option::of(
        prop::sample::select(vec!["Apollo Hospitals", "Fortis Healthcare Delhi", "City Care Clinic"])
            .prop_map(|name| Hospital {
                name: Some(name.to_string()),
                ..Default::default()
            }),
    )
}

/// Strategy for arbitrary claims
pub fn claim_strategy() -> impl Strategy<Value = ClaimRecord> {
    (
        prop::option::of(raw_date_strategy()),
        total_strategy(),
        prop::collection::vec(line_item_strategy(), 0..5),
        prop::collection::vec(document_strategy(), 0..3),
        prop::option::of(raw_date_strategy()),
        hospital_strategy(),
        diagnosis_strategy(),
        0u32..5,
        prop::option::of(0.0f64..1.0),
    )
        .prop_map(
            |(treatment_date, total, items, documents, join_date, hospital, diagnosis, same_day, conf)| {
                ClaimRecord {
                    treatment_date,
                    total_amount: Money::new(total),
                    items,
                    documents,
                    member: Some(Member {
                        member_id: Some("EMP-PROP".to_string()),
                        join_date,
                        ..Default::default()
                    }),
                    hospital,
                    diagnosis,
                    prev_claims_same_day: same_day,
                    extraction_confidence: conf,
                    ..Default::default()
                }
            },
        )
}
