//! Toy Elo-style team rating and win predictions.
//!
//! Only one team is rated. Every opponent is treated as a fixed 1500-rated
//! side, both when folding results into the rating and when predicting a
//! future game. A real multi-team system would need a shared ratings table
//! keyed by opponent; that is out of scope here.
//!
//! The rating is never stored. It is recomputed from the full, chronological
//! history each time it is needed.

use std::cmp::Ordering;

use crate::game::GameResult;
use tracing::debug;

/// Rating every team starts at
pub const BASELINE_RATING: f64 = 1500.0;

/// Rating assumed for every opponent
pub const OPPONENT_RATING: f64 = 1500.0;

/// Step size of a single update
pub const K_FACTOR: f64 = 18.0;

/// Rating points added when playing at home
pub const HOME_EDGE: f64 = 50.0;

/// Point margin at which the margin bonus stops growing
const MARGIN_CAP: u32 = 10;

/// Weight of the margin bonus (a capped blowout scales the step by 1.6)
const MARGIN_WEIGHT: f64 = 0.6;

/// Logistic expectation of beating a side rated `opponent`
fn logistic(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((opponent - rating) / 400.0))
}

/// Expected outcome of a game for a team at `rating`
pub fn expected_outcome(rating: f64) -> f64 {
    logistic(rating, OPPONENT_RATING)
}

/// 1.0 for a win, 0.0 for a loss, 0.5 for a tie
fn outcome(self_score: u32, opponent_score: u32) -> f64 {
    match self_score.cmp(&opponent_score) {
        Ordering::Greater => 1.0,
        Ordering::Less => 0.0,
        Ordering::Equal => 0.5,
    }
}

/// Margin of victory (or defeat) scaled into 0.0..=1.0
fn margin_factor(self_score: u32, opponent_score: u32) -> f64 {
    f64::from(self_score.abs_diff(opponent_score).min(MARGIN_CAP)) / f64::from(MARGIN_CAP)
}

/// Fold a single game into `rating`.
///
/// Games without both scores leave the rating untouched.
pub fn update(rating: f64, game: &GameResult) -> f64 {
    let Some((self_score, opponent_score)) = game.scores() else {
        return rating;
    };

    let expected = expected_outcome(rating);
    let margin = margin_factor(self_score, opponent_score);
    let next = rating
        + K_FACTOR
            * (outcome(self_score, opponent_score) - expected)
            * (1.0 + margin * MARGIN_WEIGHT);

    debug!(
        self_score,
        opponent_score,
        expected,
        from = rating,
        to = next,
        "rating step"
    );

    next
}

/// Compute the team rating from its games, oldest first.
///
/// Returns exactly [`BASELINE_RATING`] when no game is completed. The result
/// depends on the order of the games.
pub fn compute_rating<'a, I>(history: I) -> f64
where
    I: IntoIterator<Item = &'a GameResult>,
{
    history.into_iter().fold(BASELINE_RATING, update)
}

/// Probability of winning a game against a 1500-rated opponent.
///
/// The logistic curve keeps the result inside (0, 1) without clamping.
pub fn predict_win_probability(rating: f64, is_home: bool) -> f64 {
    let home_edge = if is_home { HOME_EDGE } else { 0.0 };
    logistic(rating + home_edge, OPPONENT_RATING)
}

/// Win probability as a whole percentage, the way it is shown on a card
pub fn as_percent(probability: f64) -> u8 {
    (probability * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_history_is_baseline() {
        let history: Vec<GameResult> = Vec::new();
        assert_eq!(compute_rating(&history), BASELINE_RATING);
    }

    #[test]
    fn only_unplayed_games_is_baseline() {
        let history = vec![GameResult::unplayed(), GameResult::unplayed()];
        assert_eq!(compute_rating(&history), BASELINE_RATING);
    }

    #[test]
    fn half_scored_game_is_skipped() {
        let history = vec![GameResult {
            self_score: Some(70),
            opponent_score: None,
        }];
        assert_eq!(compute_rating(&history), BASELINE_RATING);
    }

    #[test]
    fn capped_blowout_win_from_baseline() {
        // 18 * (1 - 0.5) * (1 + 1.0 * 0.6)
        let rating = compute_rating(&[GameResult::new(100, 60)]);
        assert!(approx(rating, 1514.4), "got {rating}");
    }

    #[test]
    fn tie_at_baseline_does_not_move() {
        let rating = compute_rating(&[GameResult::new(70, 70)]);
        assert!(approx(rating, BASELINE_RATING), "got {rating}");
    }

    #[test]
    fn win_then_loss_lands_between_steps() {
        let first = update(BASELINE_RATING, &GameResult::new(80, 70));
        let rating = compute_rating(&[GameResult::new(80, 70), GameResult::new(60, 65)]);

        assert!(approx(first, 1514.4), "got {first}");
        assert!(rating > BASELINE_RATING && rating < first, "got {rating}");
        assert!((rating - 1502.2154).abs() < 1e-3, "got {rating}");
    }

    #[test]
    fn order_matters() {
        let forward = compute_rating(&[GameResult::new(80, 70), GameResult::new(60, 65)]);
        let reversed = compute_rating(&[GameResult::new(60, 65), GameResult::new(80, 70)]);

        assert!((reversed - 1503.1847).abs() < 1e-3, "got {reversed}");
        assert_ne!(forward, reversed);
    }

    #[test]
    fn unplayed_game_anywhere_changes_nothing() {
        let base = vec![
            GameResult::new(80, 70),
            GameResult::new(60, 65),
            GameResult::new(75, 75),
        ];
        let expected = compute_rating(&base);

        for position in 0..=base.len() {
            let mut history = base.clone();
            history.insert(position, GameResult::unplayed());
            assert_eq!(compute_rating(&history), expected);
        }
    }

    #[test]
    fn even_rating_on_the_road_is_a_coin_flip() {
        assert_eq!(predict_win_probability(1500.0, false), 0.5);
    }

    #[test]
    fn home_edge_is_fifty_points() {
        let p = predict_win_probability(1500.0, true);
        assert!((p - 0.571_463).abs() < 1e-6, "got {p}");
        assert_eq!(p, predict_win_probability(1550.0, false));
    }

    #[test]
    fn percent_rounds_like_the_card() {
        assert_eq!(as_percent(0.5), 50);
        assert_eq!(as_percent(0.571_463), 57);
        assert_eq!(as_percent(0.999_9), 100);
    }

    proptest! {
        #[test]
        fn home_beats_away(rating in -2500.0f64..5500.0) {
            let home = predict_win_probability(rating, true);
            prop_assert!(home > predict_win_probability(rating, false));
        }

        #[test]
        fn probability_stays_open_unit(rating in -2500.0f64..5500.0, is_home in any::<bool>()) {
            let p = predict_win_probability(rating, is_home);
            prop_assert!(p > 0.0 && p < 1.0);
        }

        #[test]
        fn swapping_different_margins_changes_rating(
            a in (0u32..120, 0u32..120),
            b in (0u32..120, 0u32..120),
        ) {
            let first = GameResult::new(a.0, a.1);
            let second = GameResult::new(b.0, b.1);
            let margin = |g: &GameResult| g.scores().map(|(s, o)| s.abs_diff(o).min(MARGIN_CAP));
            prop_assume!(margin(&first) != margin(&second));

            let forward = compute_rating(&[first, second]);
            let reversed = compute_rating(&[second, first]);
            prop_assert_ne!(forward, reversed);
        }
    }
}
