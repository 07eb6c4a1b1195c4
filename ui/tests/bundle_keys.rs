use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use ui::i18n::{Bundle, Locale, SUBTITLE_KEY};

/// Root (relative to crate) for locale bundles.
const I18N_DIR: &str = "i18n";

/// Keys the views read without a `data-key` attribute.
const IMPLICIT_KEYS: &[&str] = &[
    "page_title",
    SUBTITLE_KEY,
    "highlight_prefix",
    "view_code_btn",
    "contact_email",
];

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn load_bundle(locale: Locale) -> Bundle {
    let path = crate_root().join(I18N_DIR).join(locale.file_name());
    let src = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("Cannot read {}: {err}", path.display()));
    Bundle::from_json(&src).unwrap_or_else(|err| panic!("{} is not a valid bundle: {err}", path.display()))
}

/// Extract every `"data-key": "..."` literal from source files under `src/`.
/// Only direct literals are matched; that is the only form the views use.
fn data_keys_in_source(src_root: &Path) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack = vec![src_root.to_path_buf()];
    let needle = "\"data-key\": \"";

    while let Some(path) = stack.pop() {
        if path.is_dir() {
            if let Ok(read_dir) = fs::read_dir(&path) {
                for entry in read_dir.flatten() {
                    stack.push(entry.path());
                }
            }
            continue;
        }
        if path.extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };

        let mut rest = content.as_str();
        while let Some(pos) = rest.find(needle) {
            let after = &rest[pos + needle.len()..];
            if let Some(end) = after.find('"') {
                found.insert(after[..end].to_string());
                rest = &after[end..];
            } else {
                break;
            }
        }
    }

    found
}

#[test]
fn every_locale_defines_the_same_text_keys() {
    let reference = load_bundle(Locale::Es);
    let reference_keys: HashSet<&String> = reference.main.keys().collect();
    assert!(!reference_keys.is_empty(), "Default bundle (es) has no keys.");

    let mut failures = Vec::new();
    for locale in Locale::ALL.into_iter().filter(|l| *l != Locale::Es) {
        let bundle = load_bundle(locale);
        let keys: HashSet<&String> = bundle.main.keys().collect();

        let missing: BTreeSet<_> = reference_keys.difference(&keys).collect();
        let extra: BTreeSet<_> = keys.difference(&reference_keys).collect();
        if !missing.is_empty() {
            failures.push(format!("{locale} is missing: {missing:?}"));
        }
        if !extra.is_empty() {
            failures.push(format!("{locale} has keys unknown to es: {extra:?}"));
        }
    }

    if !failures.is_empty() {
        panic!(
            "Bundle key mismatch:\n  {}\n\nHint: copy the missing keys from es.json, then translate.",
            failures.join("\n  ")
        );
    }
}

#[test]
fn every_data_key_used_in_source_is_translated() {
    let used = data_keys_in_source(&crate_root().join("src"));
    assert!(
        used.len() > 10,
        "Found suspiciously few data-key attributes ({}); did the scan break?",
        used.len()
    );

    for locale in Locale::ALL {
        let bundle = load_bundle(locale);
        let missing: Vec<_> = used
            .iter()
            .map(String::as_str)
            .chain(IMPLICIT_KEYS.iter().copied())
            .filter(|key| bundle.text(key).is_none())
            .collect();
        assert!(
            missing.is_empty(),
            "{locale}.json lacks text for: {}",
            missing.join(", ")
        );
    }
}

#[test]
fn list_sections_are_populated_in_every_locale() {
    let reference = load_bundle(Locale::Es);
    for locale in Locale::ALL {
        let bundle = load_bundle(locale);
        assert!(!bundle.skills.is_empty(), "{locale}: no skills");
        assert_eq!(
            bundle.experience.len(),
            reference.experience.len(),
            "{locale}: experience entries differ from es"
        );
        assert_eq!(
            bundle.projects.len(),
            reference.projects.len(),
            "{locale}: project entries differ from es"
        );
        for project in &bundle.projects {
            assert!(!project.code_url.is_empty(), "{locale}: {} has no code_url", project.title);
        }
    }
}
