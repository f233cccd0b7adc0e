use chrono::NaiveDate;
use cpa_intake::summary::{self, RenderError};
use cpa_intake::wizard::{Complexity, ContactPreference, ResponseRecord, Situation, Timeline};
use lopdf::Document;

fn summary_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid summary date")
}

fn full_record() -> ResponseRecord {
    ResponseRecord {
        situation: Situation::PersonalTaxes,
        timeline: Timeline::Immediately,
        complexity: Complexity::new(4).expect("valid complexity"),
        main_concern: Some("Whether I need to file estimated payments".to_string()),
        contact_pref: ContactPreference::PhoneCall,
        email: Some("pat@example.com".to_string()),
        phone: Some("555-1234".to_string()),
        interest_confirm: true,
    }
}

fn parse(bytes: &[u8]) -> Document {
    Document::load_mem(bytes).expect("summary parses as PDF")
}

fn pdf_text(bytes: &[u8]) -> String {
    let doc = parse(bytes);
    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    doc.extract_text(&pages).expect("text extracts")
}

#[test]
fn identical_inputs_render_identical_bytes() {
    let first = summary::render(&full_record(), summary_date()).expect("renders");
    let second = summary::render(&full_record(), summary_date()).expect("renders");
    assert_eq!(first, second);

    let other_day = NaiveDate::from_ymd_opt(2026, 10, 20).expect("valid date");
    let third = summary::render(&full_record(), other_day).expect("renders");
    assert_ne!(first, third);
}

#[test]
fn typical_record_fits_on_one_page() {
    let bytes = summary::render(&full_record(), summary_date()).expect("renders");
    assert_eq!(parse(&bytes).get_pages().len(), 1);
}

#[test]
fn parsed_text_contains_title_date_and_every_value() {
    let bytes = summary::render(&full_record(), summary_date()).expect("renders");
    let text = pdf_text(&bytes);

    for expected in [
        "Prospective Client Interest Summary",
        "Date: October 19, 2026",
        "This is a preliminary summary from the initial interest form.",
        "Reason for reaching out: Looking for help with personal or family taxes",
        "Timeline: Immediately / within the next 30 days",
        "Complexity level: 4/5",
        "Main concern: Whether I need to file estimated payments",
        "Preferred contact: Phone call",
        "Email: pat@example.com",
        "Phone: 555-1234",
        "Note: This is not a formal engagement or signed document.",
        "Next steps will be discussed after review.",
    ] {
        assert!(text.contains(expected), "missing {expected:?} in {text:?}");
    }
}

#[test]
fn absent_optional_fields_render_placeholders() {
    let record = ResponseRecord {
        main_concern: None,
        email: None,
        phone: None,
        ..full_record()
    };
    let text = pdf_text(&summary::render(&record, summary_date()).expect("renders"));

    assert!(text.contains("Main concern: None provided"));
    assert!(text.contains("Email: Not provided"));
    assert!(text.contains("Phone: Not provided"));
}

#[test]
fn long_concerns_continue_on_another_page() {
    let record = ResponseRecord {
        main_concern: Some("We sold a rental property this year.\n".repeat(60)),
        ..full_record()
    };
    let bytes = summary::render(&record, summary_date()).expect("renders");
    let doc = parse(&bytes);

    assert!(doc.get_pages().len() > 1);
    assert!(pdf_text(&bytes).contains("Next steps will be discussed after review."));
}

#[test]
fn characters_outside_the_font_encoding_are_rejected() {
    let record = ResponseRecord {
        phone: Some("\u{260E} 555-1234".to_string()),
        ..full_record()
    };
    match summary::render(&record, summary_date()) {
        Err(RenderError::UnsupportedCharacter { character, field }) => {
            assert_eq!(character, '\u{260E}');
            assert_eq!(field, "phone");
        }
        other => panic!("expected unsupported character error, got {other:?}"),
    }
}

#[test]
fn accented_and_typographic_characters_are_accepted() {
    let record = ResponseRecord {
        main_concern: Some("Ren\u{e9}e\u{2019}s caf\u{e9} \u{2013} \u{20ac}12k".to_string()),
        situation: Situation::NotSure,
        ..full_record()
    };
    let bytes = summary::render(&record, summary_date()).expect("renders");
    assert!(bytes.starts_with(b"%PDF-1.4"));
}

#[test]
fn repeated_and_leading_spaces_print_as_supplied() {
    let record = ResponseRecord {
        main_concern: Some("  Two  spaces   here".to_string()),
        phone: Some("(555)  123-4567".to_string()),
        ..full_record()
    };
    let bytes = summary::render(&record, summary_date()).expect("renders");
    let text = pdf_text(&bytes);

    assert!(text.contains("Phone: (555)  123-4567"), "{text:?}");
    assert!(text.contains("Main concern:   Two  spaces   here"), "{text:?}");
}
