//! Template filling for generated prose.
//!
//! A template holds `{name}` placeholders. A [`TemplateContext`] maps names to
//! [`Candidates`]; resolution draws one value per distinct placeholder, in
//! order of first appearance, and substitutes it for every occurrence.
//! Placeholders missing from the context are copied through unchanged.

use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::{BTreeMap, HashMap};

/// Values a placeholder may take.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidates {
    Uniform(Vec<String>),
    Weighted(Vec<(String, f64)>),
}

impl Candidates {
    pub fn uniform<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Candidates::Uniform(values.into_iter().map(Into::into).collect())
    }

    pub fn weighted<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Candidates::Weighted(values.into_iter().map(|(v, w)| (v.into(), w)).collect())
    }

    /// A single value that is always chosen.
    pub fn fixed(value: impl Into<String>) -> Self {
        Candidates::Uniform(vec![value.into()])
    }

    /// `None` when there is nothing to draw from (empty list or unusable weights).
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        match self {
            Candidates::Uniform(values) => values.choose(rng).map(String::as_str),
            Candidates::Weighted(values) => values
                .choose_weighted(rng, |(_, weight)| *weight)
                .ok()
                .map(|(value, _)| value.as_str()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateContext {
    entries: BTreeMap<String, Candidates>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, candidates: Candidates) -> Self {
        self.insert(name, candidates);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, candidates: Candidates) {
        self.entries.insert(name.into(), candidates);
    }

    pub fn get(&self, name: &str) -> Option<&Candidates> {
        self.entries.get(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

fn scan(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find(['{', '}']) {
            Some(close) if close > 0 && after[close..].starts_with('}') => {
                if open > 0 {
                    segments.push(Segment::Text(&rest[..open]));
                }
                segments.push(Segment::Placeholder(&after[..close]));
                rest = &after[close + 1..];
            }
            _ => {
                segments.push(Segment::Text(&rest[..=open]));
                rest = after;
            }
        }
    }
    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }

    segments
}

/// Distinct placeholder names in order of first appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for segment in scan(template) {
        if let Segment::Placeholder(name) = segment
            && !names.contains(&name)
        {
            names.push(name);
        }
    }
    names
}

pub fn resolve<R: Rng + ?Sized>(template: &str, context: &TemplateContext, rng: &mut R) -> String {
    let segments = scan(template);

    let mut chosen: HashMap<&str, &str> = HashMap::new();
    for segment in &segments {
        if let Segment::Placeholder(name) = *segment
            && !chosen.contains_key(name)
            && let Some(value) = context.get(name).and_then(|c| c.draw(rng))
        {
            chosen.insert(name, value);
        }
    }

    let mut output = String::with_capacity(template.len());
    for segment in segments {
        match segment {
            Segment::Text(text) => output.push_str(text),
            Segment::Placeholder(name) => match chosen.get(name) {
                Some(value) => output.push_str(value),
                None => {
                    output.push('{');
                    output.push_str(name);
                    output.push('}');
                }
            },
        }
    }

    output
}
