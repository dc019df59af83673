//! Dashboard-wide statistics computed from the session list.

use std::collections::{BTreeMap, HashMap};

use crate::sessions::CookingSession;
use crate::util::time::month_label;

pub const UNDATED_GROUP: &str = "Undated";

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup {
    pub label: String,
    pub sessions: Vec<CookingSession>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_sessions: usize,
    /// Keyed by style; iteration order is the sorted display order.
    pub style_counts: BTreeMap<String, usize>,
    /// Most frequent first; equal counts keep first-encounter order.
    pub ingredient_counts: Vec<(String, usize)>,
    pub months: Vec<MonthGroup>,
}

impl DashboardStats {
    pub fn compute(sessions: &[CookingSession]) -> Self {
        Self {
            total_sessions: sessions.len(),
            style_counts: style_histogram(sessions),
            ingredient_counts: ingredient_histogram(sessions),
            months: group_by_month(sessions),
        }
    }

    pub fn styles(&self) -> impl Iterator<Item = &str> {
        self.style_counts.keys().map(String::as_str)
    }

    pub fn ingredients(&self) -> impl Iterator<Item = &str> {
        self.ingredient_counts.iter().map(|(name, _)| name.as_str())
    }
}

pub fn style_histogram(sessions: &[CookingSession]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for style in sessions.iter().filter_map(|s| s.cooking_style.as_ref()) {
        *counts.entry(style.clone()).or_insert(0) += 1;
    }
    counts
}

pub fn ingredient_histogram(sessions: &[CookingSession]) -> Vec<(String, usize)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for ingredient in sessions.iter().flat_map(|s| s.ingredients.iter()) {
        match slots.get(ingredient.as_str()) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(ingredient.as_str(), counts.len());
                counts.push((ingredient.clone(), 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Groups sessions by calendar month, latest first. Sessions are sorted by
/// datetime descending before grouping so each group is internally ordered
/// and groups appear in the order their month is first seen.
pub fn group_by_month(sessions: &[CookingSession]) -> Vec<MonthGroup> {
    let mut ordered: Vec<&CookingSession> = sessions.iter().collect();
    ordered.sort_by(|a, b| b.date_time.cmp(&a.date_time));

    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<MonthGroup> = Vec::new();
    for session in ordered {
        let label = session
            .date_time
            .as_ref()
            .map(month_label)
            .unwrap_or_else(|| UNDATED_GROUP.to_owned());
        let slot = match slots.get(&label) {
            Some(&slot) => slot,
            None => {
                slots.insert(label.clone(), groups.len());
                groups.push(MonthGroup {
                    label,
                    sessions: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[slot].sessions.push(session.clone());
    }
    groups
}
