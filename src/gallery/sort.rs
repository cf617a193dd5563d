use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::project::Project;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Default,
    YearDesc,
    Client,
}

impl SortKey {
    /// Unrecognized keys fall back to the fetch order.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "year-desc" => Self::YearDesc,
            "client" => Self::Client,
            _ => Self::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::YearDesc => "year-desc",
            Self::Client => "client",
        }
    }
}

/// Primary collation weight of one character under Spanish rules: case and
/// vowel accents (including `ü`) are ignored, `ñ` is a letter of its own
/// between `n` and `o`.
fn primary_weight(c: char) -> u32 {
    let folded = match c {
        'á' | 'à' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => return ('n' as u32) * 2 + 1,
        other => other,
    };
    (folded as u32) * 2
}

fn primary_key(s: &str) -> Vec<u32> {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(primary_weight)
        .collect()
}

/// Spanish collation: "álvarez" and "Alvarez" share a primary key, and
/// "Ñandú" sorts after every "N" name. Remaining ties compare lowercase,
/// then raw text.
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Ordered view over `projects`. The input slice is never reordered.
/// Both sorts are stable, so equal keys keep their fetch order.
pub fn sort(projects: &[Project], key: SortKey) -> Vec<&Project> {
    let mut view: Vec<&Project> = projects.iter().collect();
    match key {
        SortKey::Default => {}
        SortKey::YearDesc => view.sort_by(|a, b| b.year.cmp(&a.year)),
        SortKey::Client => {
            view.sort_by(|a, b| collate(a.client_or_empty(), b.client_or_empty()))
        }
    }
    view
}
