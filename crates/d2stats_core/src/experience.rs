//! Experience thresholds per character level.

use crate::model::MAX_LEVEL;

/// Minimum experience for each level; index is the level, index 0 unused.
#[rustfmt::skip]
pub const LEVEL_THRESHOLDS: [u64; 100] = [
    0, 0, 500, 1500, 3750, 7875, 14175, 22680, 32886, 44396,
    57715, 72144, 90180, 112725, 140906, 176132, 220165, 275207, 344008, 430010,
    537513, 671891, 839864, 1049830, 1312287, 1640359, 2050449, 2563061, 3203826, 3902260,
    4663553, 5493363, 6397885, 7383752, 8458379, 9629723, 10906488, 12298162, 13815086, 15468534,
    17270791, 19235252, 21376515, 23710491, 26254525, 29027522, 32050088, 35344686, 38935798, 42850109,
    47116709, 51767302, 56836449, 62361819, 68384473, 74949165, 82104680, 89904191, 98405658, 107672256,
    117772849, 128782495, 140783010, 153863570, 168121381, 183662396, 200602101, 219066380, 239192444, 261129853,
    285041630, 311105466, 339515048, 370481492, 404234916, 441026148, 481128591, 524840254, 572485967, 624419793,
    681027665, 742730244, 809986056, 883294891, 963201521, 1050299747, 1145236814, 1248718217, 1361512946, 1484459201,
    1618470619, 1764543065, 1923762030, 2097310703, 2286478756, 2492671933, 2717422497, 2962400612, 3229426756, 3520485254,
];

/// Progress towards the next level as a display string.
///
/// Level 99 reads "100"; otherwise one decimal place.
pub fn level_percentage(level: u8, experience: u64) -> String {
    if level >= MAX_LEVEL || level == 0 {
        return "100".to_string();
    }
    let current = LEVEL_THRESHOLDS[level as usize];
    let next = LEVEL_THRESHOLDS[level as usize + 1];
    let span = next.saturating_sub(current);
    if span == 0 {
        return "0.0".to_string();
    }
    let earned = experience.saturating_sub(current);
    format!("{:.1}", earned as f64 * 100.0 / span as f64)
}

/// Highest level whose threshold does not exceed `experience`.
pub fn level_for_experience(experience: u64) -> u8 {
    let mut level = 1u8;
    for (candidate, threshold) in LEVEL_THRESHOLDS.iter().enumerate().skip(2) {
        if experience < *threshold {
            break;
        }
        level = candidate as u8;
    }
    level
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_uses_one_decimal() {
        assert_eq!(level_percentage(1, 250), "50.0");
        assert_eq!(level_percentage(2, 500), "0.0");
        assert_eq!(level_percentage(16, 220165 + 5504), "10.0");
    }

    #[test]
    fn max_level_reads_one_hundred() {
        assert_eq!(level_percentage(99, 3520485254), "100");
    }

    #[test]
    fn level_walk_over_thresholds() {
        assert_eq!(level_for_experience(0), 1);
        assert_eq!(level_for_experience(499), 1);
        assert_eq!(level_for_experience(500), 2);
        assert_eq!(level_for_experience(1500), 3);
        assert_eq!(level_for_experience(u64::MAX), 99);
    }
}
