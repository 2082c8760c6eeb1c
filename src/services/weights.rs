//! Category weight engine
//!
//! Habit frequencies arrive per week, month or year. They are normalized to
//! a monthly count and then to weights summing to 1. Iteration is always in
//! `BTreeMap` key order so the floating-point work is reproducible.

use std::collections::BTreeMap;

use crate::models::{HabitFrequency, Money};

/// Normalize habits to monthly occurrence counts
pub fn monthly_frequencies(habits: &BTreeMap<String, HabitFrequency>) -> BTreeMap<String, f64> {
    habits
        .iter()
        .map(|(name, habit)| (name.clone(), habit.monthly_count()))
        .collect()
}

/// Turn monthly frequencies into weights that sum to 1
///
/// When the frequencies sum to zero (no habits, or every habit at zero) the
/// weights are uniform over `fallback`, so every known category still gets
/// a share. An empty `fallback` leaves the reported categories as the only
/// candidates.
pub fn compute_weights(
    frequencies: &BTreeMap<String, f64>,
    fallback: &[String],
) -> BTreeMap<String, f64> {
    let total: f64 = frequencies.values().sum();

    if total > 0.0 {
        return frequencies
            .iter()
            .map(|(name, freq)| (name.clone(), freq / total))
            .collect();
    }

    let names: Vec<&String> = if fallback.is_empty() {
        frequencies.keys().collect()
    } else {
        fallback.iter().collect()
    };
    tracing::debug!(
        reported = frequencies.len(),
        count = names.len(),
        "no habit frequency reported, uniform weights"
    );

    if names.is_empty() {
        return BTreeMap::new();
    }

    let weight = 1.0 / names.len() as f64;
    names.into_iter().map(|name| (name.clone(), weight)).collect()
}

/// Apply weights to the discretionary pool, rounding each share to cents
pub fn apply_weights(pool: Money, weights: &BTreeMap<String, f64>) -> BTreeMap<String, Money> {
    weights
        .iter()
        .map(|(name, weight)| (name.clone(), pool.weighted(*weight)))
        .collect()
}
