use std::collections::BTreeMap;
use crate::agents::SPECIALISTS;
use crate::models::{ClassifierResult, Specialist};

/// Weighted severity across the three specialists, in `0..=100`.
///
/// Absent or failed entries count as zero. The sum is kept in tenths so the
/// result is exact, then rounded half-to-even (`0.5 -> 0`, `1.5 -> 2`).
pub fn compute_cumulative_severity(results: &BTreeMap<Specialist, ClassifierResult>) -> u8 {
    let tenths: u32 = SPECIALISTS
        .iter()
        .map(|def| {
            let score = results
                .get(&def.specialist)
                .map(ClassifierResult::severity_score)
                .unwrap_or(0);
            def.weight_tenths * u32::from(score)
        })
        .sum();

    round_half_to_even(tenths).min(100) as u8
}

fn round_half_to_even(tenths: u32) -> u32 {
    let (whole, frac) = (tenths / 10, tenths % 10);
    if frac > 5 || (frac == 5 && whole % 2 == 1) {
        whole + 1
    } else {
        whole
    }
}
