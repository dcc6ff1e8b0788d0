//! Rendering of inference responses
//!
//! The response shape depends on the model family, so the payload is first
//! classified into a [`SentimentShape`] and then rendered. Rendering never
//! fails: anything that is not a list of label/score pairs is pretty-printed.

use serde::Deserialize;
use serde_json::Value;

/// Prefix some models put in front of their class names
pub const LABEL_PREFIX: &str = "LABEL_";

/// One classification entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    /// Score as a percentage with two decimals, e.g. `"98.70%"`
    pub fn percentage(&self) -> String {
        format!("{:.2}%", self.score * 100.0)
    }
}

/// Structural classification of a response payload
#[derive(Debug, Clone, PartialEq)]
pub enum SentimentShape {
    /// `[[{label, score}, ...], ...]`: the first inner list, in response order
    LabeledScoreList(Vec<LabelScore>),
    /// A non-empty list of something else: its first element
    SingleObject(Value),
    /// Anything else, kept whole
    Opaque(Value),
}

impl SentimentShape {
    pub fn classify(payload: &Value) -> Self {
        match payload {
            Value::Array(items) => match items.first() {
                Some(first) => match labeled_scores(first) {
                    Some(scores) => Self::LabeledScoreList(scores),
                    None => Self::SingleObject(first.clone()),
                },
                None => Self::Opaque(payload.clone()),
            },
            other => Self::Opaque(other.clone()),
        }
    }
}

/// Extract `{label, score}` entries if every element of `value` has them
///
/// An empty list does not count. Scores must lie in `[0, 1]`.
fn labeled_scores(value: &Value) -> Option<Vec<LabelScore>> {
    let entries = value.as_array()?;
    if entries.is_empty() {
        return None;
    }

    entries
        .iter()
        .map(|entry| {
            let label = entry.get("label")?.as_str()?;
            let score = entry.get("score")?.as_f64()?;
            (0.0..=1.0).contains(&score).then(|| LabelScore {
                label: label.to_string(),
                score,
            })
        })
        .collect()
}

/// Strip the `LABEL_` prefix and turn underscores into spaces
pub fn clean_label(label: &str) -> String {
    label
        .strip_prefix(LABEL_PREFIX)
        .unwrap_or(label)
        .replace('_', " ")
        .trim()
        .to_string()
}

/// Marker shown in front of a cleaned label
fn label_emoji(label: &str) -> &'static str {
    let lower = label.to_lowercase();
    if lower.starts_with("pos") {
        return "😊";
    }
    if lower.starts_with("neg") {
        return "😞";
    }
    if lower.starts_with("neu") {
        return "😐";
    }
    // Star ratings ("1 star" .. "5 stars")
    match lower.chars().next().and_then(|c| c.to_digit(10)) {
        Some(stars) if lower.contains("star") && stars >= 4 => "😊",
        Some(stars) if lower.contains("star") && stars <= 2 => "😞",
        Some(_) if lower.contains("star") => "😐",
        _ => "•",
    }
}

/// Render one label/score line
pub fn format_label_score(entry: &LabelScore) -> String {
    let label = clean_label(&entry.label);
    format!("  {} {}: {}", label_emoji(&label), label, entry.percentage())
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Render a classified payload
pub fn format_shape(shape: &SentimentShape) -> String {
    match shape {
        SentimentShape::LabeledScoreList(scores) => scores
            .iter()
            .map(format_label_score)
            .collect::<Vec<_>>()
            .join("\n"),
        SentimentShape::SingleObject(value) | SentimentShape::Opaque(value) => pretty(value),
    }
}

/// Classify and render a response payload
pub fn format_payload(payload: &Value) -> String {
    format_shape(&SentimentShape::classify(payload))
}
