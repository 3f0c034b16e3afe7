use std::collections::HashSet;

use manuscript_core::{slugify, Slugger};
use pretty_assertions::assert_eq;

#[test]
fn slugify_lowercases_and_hyphenates() {
    assert_eq!(slugify("Heading"), "heading");
    assert_eq!(slugify("Hello, World!"), "hello-world");
    assert_eq!(slugify("What’s “new” in React 17?"), "whats-new-in-react-17");
    assert_eq!(slugify("snake_case and-kebab"), "snake_case-and-kebab");
    assert_eq!(slugify("Ünïcödé Heading"), "ünïcödé-heading");
}

#[test]
fn repeated_headings_get_numeric_suffixes() {
    let mut slugger = Slugger::new();
    assert_eq!(slugger.slug("Intro"), "intro");
    assert_eq!(slugger.slug("Intro"), "intro-1");
    assert_eq!(slugger.slug("Intro"), "intro-2");
}

#[test]
fn suffixes_skip_slugs_taken_by_literal_headings() {
    let mut slugger = Slugger::new();
    assert_eq!(slugger.slug("Intro 1"), "intro-1");
    assert_eq!(slugger.slug("Intro"), "intro");
    assert_eq!(slugger.slug("Intro"), "intro-2");
}

#[test]
fn slugs_are_unique_within_a_document() {
    let headings = [
        "Setup", "Setup", "Setup 1", "setup", "Setup-1", "", "", "Setup 2", "SETUP",
    ];
    let mut slugger = Slugger::new();
    let slugs: Vec<String> = headings.iter().map(|h| slugger.slug(h)).collect();
    let unique: HashSet<&String> = slugs.iter().collect();
    assert_eq!(unique.len(), slugs.len(), "duplicate slug in {slugs:?}");
}

#[test]
fn reset_starts_a_new_document() {
    let mut slugger = Slugger::new();
    slugger.slug("Intro");
    slugger.reset();
    assert_eq!(slugger.slug("Intro"), "intro");
}
