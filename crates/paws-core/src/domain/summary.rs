//! Preference summary derived from the liked collection.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use super::image::ImageRecord;

pub const NO_LIKES_MESSAGE: &str = "You didn't like any cats this time!";
pub const NO_TAGS_MESSAGE: &str =
    "You liked some cats, but we couldn't identify specific preferences.";

/// Tag occurrence counts, in the order tags were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFrequency {
    counts: Vec<(String, usize)>,
}

impl TagFrequency {
    /// Counts every tag of every record, scanning in decision order.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ImageRecord>,
    {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(String, usize)> = Vec::new();
        for record in records {
            for tag in &record.tags {
                match index.get(tag.as_str()) {
                    Some(&i) => counts[i].1 += 1,
                    None => {
                        index.insert(tag.as_str(), counts.len());
                        counts.push((tag.clone(), 1));
                    }
                }
            }
        }
        Self { counts }
    }

    pub fn get(&self, tag: &str) -> usize {
        self.counts
            .iter()
            .find(|(t, _)| t == tag)
            .map_or(0, |(_, n)| *n)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Distinct tags counted.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Highest counts first; ties keep first-seen order.
    pub fn top(&self, n: usize) -> Vec<&str> {
        let mut ranked: Vec<&(String, usize)> = self.counts.iter().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(n).map(|(t, _)| t.as_str()).collect()
    }
}

/// What the summary screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub liked_count: usize,
    pub deck_len: usize,
    pub top_tags: Vec<String>,
    pub message: String,
}

impl Summary {
    pub fn build(liked: &[Arc<ImageRecord>], deck_len: usize) -> Self {
        let frequency = TagFrequency::from_records(liked.iter().map(|r| r.as_ref()));
        let top_tags: Vec<String> = frequency.top(2).into_iter().map(str::to_owned).collect();
        let message = preference_message(liked.len(), &top_tags);
        Self {
            liked_count: liked.len(),
            deck_len,
            top_tags,
            message,
        }
    }

    pub fn headline(&self) -> String {
        format!(
            "You liked {} out of {} cats!",
            self.liked_count, self.deck_len
        )
    }
}

fn preference_message(liked_count: usize, top_tags: &[String]) -> String {
    match (liked_count, top_tags) {
        (0, _) => NO_LIKES_MESSAGE.to_string(),
        (_, []) => NO_TAGS_MESSAGE.to_string(),
        (_, [only]) => format!("You prefer {only} cats!"),
        (_, [first, second, ..]) => format!("You prefer {first} and {second} cats!"),
    }
}
