use crate::domain::model::{CandidateLines, MessageGroup, Query};
use crate::utils::error::{ResolverError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

pub const DEFAULT_FUZZY_THRESHOLD: u8 = 80;

const AUTOJUNK_MIN_LEN: usize = 200;

lazy_static! {
    // 數字 + 可選 k/m/b + 可選貨幣單位，或 N/M 分數
    static ref PRICE_REGEX: Regex = Regex::new(
        r"(?i)(\d+(?:[.,]\d+)?(?:k|m|b)?\s*(?:wl|dl|bgl)?)|(\d+/\d+)"
    )
    .unwrap();
}

pub fn looks_like_price(line: &str) -> bool {
    PRICE_REGEX.is_match(line)
}

/// Lowercases and drops everything except ASCII letters, digits and whitespace.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// `(a_start, b_start, len)` runs shared by `a` and `b`, found longest-first
/// and returned in order, followed by a `(a.len(), b.len(), 0)` sentinel.
fn matching_blocks(a: &[char], b: &[char]) -> Vec<(usize, usize, usize)> {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        b2j.entry(*c).or_default().push(j);
    }
    // 長字串中過於常見的字元不作為錨點
    if b.len() >= AUTOJUNK_MIN_LEN {
        let limit = b.len() / 100 + 1;
        b2j.retain(|_, js| js.len() <= limit);
    }

    let mut blocks = Vec::new();
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, b, &b2j, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        blocks.push((i, j, k));
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    blocks.sort_unstable();

    let mut merged: Vec<(usize, usize, usize)> = Vec::with_capacity(blocks.len() + 1);
    for (i, j, k) in blocks {
        match merged.last_mut() {
            Some(last) if last.0 + last.2 == i && last.1 + last.2 == j => last.2 += k,
            _ => merged.push((i, j, k)),
        }
    }
    merged.push((a.len(), b.len(), 0));
    merged
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]`, earliest in `a`
/// on ties, then widened over characters dropped from the index.
fn longest_match(
    a: &[char],
    b: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut besti, mut bestj, mut bestk) = (alo, blo, 0);
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next = HashMap::new();
        for &j in b2j.get(c).map(Vec::as_slice).unwrap_or_default() {
            if j < blo {
                continue;
            }
            if j >= bhi {
                break;
            }
            let k = j
                .checked_sub(1)
                .and_then(|prev| j2len.get(&prev))
                .copied()
                .unwrap_or(0)
                + 1;
            next.insert(j, k);
            if k > bestk {
                besti = i + 1 - k;
                bestj = j + 1 - k;
                bestk = k;
            }
        }
        j2len = next;
    }

    while besti > alo && bestj > blo && a[besti - 1] == b[bestj - 1] {
        besti -= 1;
        bestj -= 1;
        bestk += 1;
    }
    while besti + bestk < ahi && bestj + bestk < bhi && a[besti + bestk] == b[bestj + bestk] {
        bestk += 1;
    }

    (besti, bestj, bestk)
}

/// Insert/delete similarity `2 * LCS / (|a| + |b|)` in `0.0..=1.0`.
fn indel_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    for x in a {
        for (j, y) in b.iter().enumerate() {
            cur[j + 1] = if x == y {
                prev[j] + 1
            } else {
                prev[j + 1].max(cur[j])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    (2 * prev[b.len()]) as f64 / total as f64
}

/// Best-aligned substring similarity (0..=100). The shorter string is
/// scored against one window of the longer per matching block, each window
/// starting where that block would line the two strings up.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let (shorter, longer): (Vec<char>, Vec<char>) = if a.chars().count() <= b.chars().count() {
        (a.chars().collect(), b.chars().collect())
    } else {
        (b.chars().collect(), a.chars().collect())
    };

    if shorter.is_empty() {
        return 0;
    }

    let mut best = 0.0_f64;
    for (i, j, _) in matching_blocks(&shorter, &longer) {
        let start = j.saturating_sub(i).min(longer.len());
        let end = (start + shorter.len()).min(longer.len());
        let score = indel_ratio(&shorter, &longer[start..end]);
        if score > 0.995 {
            return 100;
        }
        best = best.max(score);
    }

    (best * 100.0).round() as u8
}

/// Similarity of an item name and a chat line after normalisation.
pub fn fuzzy_score(item_name: &str, line: &str) -> u8 {
    partial_ratio(&normalize(item_name), &normalize(line))
}

#[derive(Debug, Clone, Copy)]
pub struct LineFilter {
    threshold: u8,
}

impl Default for LineFilter {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZY_THRESHOLD)
    }
}

impl LineFilter {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn accepts(&self, query: &Query, line: &str) -> bool {
        looks_like_price(line) && fuzzy_score(query.as_str(), line) >= self.threshold
    }

    /// Collects matching lines from the first message of every group.
    /// An empty result is reported as `NoMatch`.
    pub fn filter(&self, query: &Query, groups: &[MessageGroup]) -> Result<CandidateLines> {
        let mut lines = CandidateLines::new();
        let mut scanned = 0usize;

        for group in groups {
            let Some(content) = group.first().and_then(|m| m.content.as_deref()) else {
                continue;
            };
            if content.is_empty() {
                continue;
            }

            for line in content.lines() {
                scanned += 1;
                if self.accepts(query, line) {
                    lines.insert(line);
                }
            }
        }

        tracing::debug!(
            "Filtered {} candidate lines out of {} scanned (threshold {})",
            lines.len(),
            scanned,
            self.threshold
        );

        if lines.is_empty() {
            return Err(ResolverError::NoMatch {
                item: query.to_string(),
            });
        }

        Ok(lines)
    }
}
