//! Parsing of realistic completion bodies, as returned by the upstream model.

use derm_core::{GuidanceRecord, clean, parse};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const ACNE: &str = "Medical Description:\nAcne is a skin condition.\nSymptoms & Signs:\n- Redness\n- Pimples\nTreatment Options:\n* Topical cream\nWhen to Seek Medical Care:\nPersistent scarring\nPrevention & Management:\n- Wash face daily";

/// Reasoning models tend to wrap the whole answer in `\boxed{ ... }` and
/// sprinkle markdown despite being told not to.
const BOXED_MARKDOWN: &str = r"\boxed{
**Medical Description:**
Eczema is a chronic inflammatory skin condition.
It often starts in childhood.

**Symptoms & Signs:**
- Dry, itchy skin
- Red patches
```

**Treatment Options:**
1. Emollients
2. Topical corticosteroids

**When to Seek Medical Care:**
• Signs of infection

**Prevention & Management:**
* Avoid harsh soaps
* Moisturize daily
}";

/// Output cut off mid-way through the symptom list
const TRUNCATED: &str = "Medical Description:\nPsoriasis is an autoimmune condition.\nSymptoms & Signs:\nScaly plaques\nJoint pain``\\";

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn test_acne_example() {
    let record = parse(ACNE);

    assert_eq!(
        record,
        GuidanceRecord {
            overview: "Acne is a skin condition.".to_string(),
            symptoms: vec!["Redness".to_string(), "Pimples".to_string()],
            treatment: vec!["Topical cream".to_string()],
            medical_care: vec!["Persistent scarring".to_string()],
            prevention: vec!["Wash face daily".to_string()],
        }
    );
}

#[test]
fn test_boxed_markdown_completion() {
    let record = parse(BOXED_MARKDOWN);

    assert_eq!(
        record.overview,
        "Eczema is a chronic inflammatory skin condition.\nIt often starts in childhood."
    );
    assert_eq!(record.symptoms, vec!["Dry, itchy skin", "Red patches"]);
    // Numbered items are not list markers and are kept verbatim
    assert_eq!(
        record.treatment,
        vec!["1. Emollients", "2. Topical corticosteroids"]
    );
    assert_eq!(record.medical_care, vec!["Signs of infection"]);
    assert_eq!(record.prevention, vec!["Avoid harsh soaps", "Moisturize daily"]);
}

#[test]
fn test_truncated_completion() {
    let record = parse(TRUNCATED);

    assert_eq!(record.overview, "Psoriasis is an autoimmune condition.");
    assert_eq!(record.symptoms, vec!["Scaly plaques", "Joint pain"]);
    assert!(record.treatment.is_empty());
    assert!(record.medical_care.is_empty());
    assert!(record.prevention.is_empty());
}

#[test]
fn test_reordered_sections() {
    let doc = "Prevention & Management:\nSunscreen\nMedical Description:\nVitiligo causes pigment loss.";
    let record = parse(doc);

    assert_eq!(record.overview, "Vitiligo causes pigment loss.");
    assert_eq!(record.prevention, vec!["Sunscreen"]);
}

#[test]
fn test_headerless_completion() {
    let record = parse("I'm sorry, I can't help with that.");
    assert!(record.is_empty());
}

#[test]
fn test_parsed_items_are_already_clean() {
    for doc in [ACNE, BOXED_MARKDOWN, TRUNCATED] {
        let record = parse(doc);
        let items = record
            .symptoms
            .iter()
            .chain(&record.treatment)
            .chain(&record.medical_care)
            .chain(&record.prevention);
        for item in items {
            assert_eq!(&clean(item), item);
        }
    }
}
