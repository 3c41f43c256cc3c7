use crate::models::interview::Difficulty;

/// Mean used before any answer has been scored.
pub const NEUTRAL_SCORE: f64 = 50.0;
pub const HARD_THRESHOLD: f64 = 80.0;
pub const EASY_THRESHOLD: f64 = 50.0;

pub fn mean_score(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        NEUTRAL_SCORE
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// Three buckets over the running mean: >= 80 HARD, < 50 EASY, otherwise MEDIUM.
pub fn suggest_difficulty(scores: &[f64]) -> Difficulty {
    let mean = mean_score(scores);
    if mean >= HARD_THRESHOLD {
        Difficulty::Hard
    } else if mean < EASY_THRESHOLD {
        Difficulty::Easy
    } else {
        Difficulty::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_answers_raise_difficulty() {
        assert_eq!(suggest_difficulty(&[90.0, 85.0]), Difficulty::Hard);
    }

    #[test]
    fn test_weak_answer_lowers_difficulty() {
        assert_eq!(suggest_difficulty(&[30.0]), Difficulty::Easy);
    }

    #[test]
    fn test_no_history_is_medium() {
        assert_eq!(mean_score(&[]), NEUTRAL_SCORE);
        assert_eq!(suggest_difficulty(&[]), Difficulty::Medium);
    }

    #[test]
    fn test_bucket_edges() {
        assert_eq!(suggest_difficulty(&[80.0]), Difficulty::Hard);
        assert_eq!(suggest_difficulty(&[79.9]), Difficulty::Medium);
        assert_eq!(suggest_difficulty(&[50.0]), Difficulty::Medium);
        assert_eq!(suggest_difficulty(&[49.9]), Difficulty::Easy);
    }

    #[test]
    fn test_mean_over_all_rounds() {
        // (100 + 60 + 70) / 3 = 76.67
        assert_eq!(suggest_difficulty(&[100.0, 60.0, 70.0]), Difficulty::Medium);
    }
}
