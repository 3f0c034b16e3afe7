use std::collections::HashMap;

/// GitHub-style heading slug: lowercase, punctuation dropped, spaces to hyphens.
///
/// Letters and digits from any script are kept, as are `-` and `_`. Each space
/// becomes one hyphen; runs are not collapsed.
pub fn slugify(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}

/// Issues unique slugs within one document.
///
/// A repeated base slug gets `-1`, `-2`, ... appended; every candidate is
/// checked against all slugs issued so far, so a heading literally named
/// `Intro 1` cannot collide with the second `Intro`.
#[derive(Debug, Default, Clone)]
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut candidate = base.clone();
        while self.occurrences.contains_key(&candidate) {
            let count = self.occurrences.entry(base.clone()).or_insert(0);
            *count += 1;
            candidate = format!("{base}-{count}");
        }
        self.occurrences.insert(candidate.clone(), 0);
        candidate
    }

    pub fn reset(&mut self) {
        self.occurrences.clear();
    }
}
