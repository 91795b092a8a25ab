//! Deterministic match-outcome resolution.
//!
//! Several terminal conditions can hold at once (all out *and* scores level),
//! so they live in one ordered table evaluated top to bottom. Only when no
//! rule fires is the classifier consulted.

use tracing::debug;

use super::error::ClassifierError;
use super::models::{
    DecisionReason, DerivedFeatures, FeatureVector, MatchState, MatchWinner, PredictionResult,
    MAX_WICKETS,
};
use crate::classifier::WinClassifier;

/// A condition under which the match is already over.
pub struct TerminalRule {
    pub winner: MatchWinner,
    pub reason: DecisionReason,
    condition: fn(&MatchState, &DerivedFeatures) -> bool,
}

impl TerminalRule {
    pub fn applies(&self, state: &MatchState, features: &DerivedFeatures) -> bool {
        (self.condition)(state, features)
    }
}

/// Terminal rules in precedence order. First match wins.
pub static TERMINAL_RULES: [TerminalRule; 7] = [
    TerminalRule {
        winner: MatchWinner::Draw,
        reason: DecisionReason::AllOutScoresLevel,
        condition: all_out_level,
    },
    TerminalRule {
        winner: MatchWinner::Batting,
        reason: DecisionReason::ChasedBeforeAllOut,
        condition: all_out_ahead,
    },
    TerminalRule {
        winner: MatchWinner::Bowling,
        reason: DecisionReason::AllOut,
        condition: all_out_behind,
    },
    TerminalRule {
        winner: MatchWinner::Batting,
        reason: DecisionReason::TargetChased,
        condition: target_reached,
    },
    TerminalRule {
        winner: MatchWinner::Batting,
        reason: DecisionReason::LastBallFinish,
        condition: overs_done_ahead,
    },
    // Shadowed by `target_reached`; kept so reordering cannot lose the draw.
    TerminalRule {
        winner: MatchWinner::Draw,
        reason: DecisionReason::LevelAtOverLimit,
        condition: overs_done_level,
    },
    TerminalRule {
        winner: MatchWinner::Bowling,
        reason: DecisionReason::OversExhausted,
        condition: overs_done_behind,
    },
];

fn all_out(state: &MatchState) -> bool {
    state.wickets_lost == MAX_WICKETS
}

fn all_out_level(state: &MatchState, _: &DerivedFeatures) -> bool {
    all_out(state) && state.current_score == state.target
}

fn all_out_ahead(state: &MatchState, _: &DerivedFeatures) -> bool {
    all_out(state) && state.current_score > state.target
}

fn all_out_behind(state: &MatchState, _: &DerivedFeatures) -> bool {
    all_out(state) && state.current_score < state.target
}

fn target_reached(state: &MatchState, _: &DerivedFeatures) -> bool {
    state.current_score == state.target
}

fn overs_done_ahead(state: &MatchState, features: &DerivedFeatures) -> bool {
    features.balls_left == 0 && state.current_score > state.target
}

fn overs_done_level(state: &MatchState, features: &DerivedFeatures) -> bool {
    features.balls_left == 0 && state.current_score == state.target
}

fn overs_done_behind(state: &MatchState, features: &DerivedFeatures) -> bool {
    features.balls_left == 0 && state.current_score < state.target
}

/// First terminal rule matching the state, if the match is already over.
pub fn decide(state: &MatchState, features: &DerivedFeatures) -> Option<&'static TerminalRule> {
    TERMINAL_RULES
        .iter()
        .find(|rule| rule.applies(state, features))
}

/// Resolve a validated match state. The classifier is called at most once.
pub fn resolve(
    state: &MatchState,
    classifier: &dyn WinClassifier,
) -> Result<PredictionResult, ClassifierError> {
    let features = DerivedFeatures::derive(state);

    if let Some(rule) = decide(state, &features) {
        debug!(
            "Match decided: {:?} ({}) at {}/{} in {} overs",
            rule.winner,
            rule.reason.describe(),
            state.current_score,
            state.wickets_lost,
            state.overs
        );
        return Ok(PredictionResult::Decided {
            winner: rule.winner,
            reason: rule.reason,
        });
    }

    let vector = FeatureVector::new(state, &features);
    let [loss_prob, win_prob] = classifier.predict_proba(&vector)?;
    debug!(
        "{} win probability from {}: {:.4}",
        state.batting_team,
        classifier.name(),
        win_prob
    );

    Ok(PredictionResult::Probabilistic {
        batting_win_prob: win_prob,
        bowling_win_prob: loss_prob,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::stub::RecordingClassifier;
    use crate::predictor::models::chase;
    use approx::assert_relative_eq;

    fn decided(winner: MatchWinner, reason: DecisionReason) -> PredictionResult {
        PredictionResult::Decided { winner, reason }
    }

    #[test]
    fn rule_table_order() {
        let reasons: Vec<DecisionReason> = TERMINAL_RULES.iter().map(|r| r.reason).collect();
        assert_eq!(
            reasons,
            [
                DecisionReason::AllOutScoresLevel,
                DecisionReason::ChasedBeforeAllOut,
                DecisionReason::AllOut,
                DecisionReason::TargetChased,
                DecisionReason::LastBallFinish,
                DecisionReason::LevelAtOverLimit,
                DecisionReason::OversExhausted,
            ]
        );
    }

    #[test]
    fn mid_chase_queries_classifier_once() {
        // target=180, score=50 after 5 overs, 2 down
        let clf = RecordingClassifier::new(0.3);
        let state = chase(180, 50, 5.0, 2);
        let result = resolve(&state, &clf).unwrap();

        let calls = clf.calls();
        assert_eq!(calls.len(), 1);
        let fv = &calls[0];
        assert_eq!(fv.runs_left, 130);
        assert_eq!(fv.balls_left, 90);
        assert_eq!(fv.wickets, 8);
        assert_eq!(fv.total_runs_x, 180);
        assert_eq!(fv.batting_team, "Team Alpha");
        assert_eq!(fv.bowling_team, "Team Beta");
        assert_eq!(fv.city, "Springfield");
        assert_relative_eq!(fv.crr, 10.0, epsilon = 1e-9);
        assert_relative_eq!(fv.rrr, 130.0 * 6.0 / 90.0, epsilon = 1e-9);

        match result {
            PredictionResult::Probabilistic {
                batting_win_prob,
                bowling_win_prob,
            } => {
                assert_relative_eq!(batting_win_prob, 0.3, epsilon = 1e-9);
                assert_relative_eq!(bowling_win_prob, 0.7, epsilon = 1e-9);
                assert_relative_eq!(batting_win_prob + bowling_win_prob, 1.0, epsilon = 1e-6);
            }
            other => panic!("expected probabilistic result, got {:?}", other),
        }
    }

    #[test]
    fn exact_chase_wins_without_classifier() {
        let clf = RecordingClassifier::new(0.5);
        let result = resolve(&chase(150, 150, 18.2, 3), &clf).unwrap();
        assert_eq!(result, decided(MatchWinner::Batting, DecisionReason::TargetChased));
        assert!(clf.calls().is_empty());
    }

    #[test]
    fn overs_exhausted_short_of_target() {
        let clf = RecordingClassifier::new(0.5);
        let result = resolve(&chase(160, 140, 20.0, 6), &clf).unwrap();
        assert_eq!(result, decided(MatchWinner::Bowling, DecisionReason::OversExhausted));
        assert!(clf.calls().is_empty());
    }

    #[test]
    fn all_out_level_is_draw_before_over_limit_rules() {
        let clf = RecordingClassifier::new(0.5);
        let result = resolve(&chase(160, 160, 20.0, 10), &clf).unwrap();
        assert_eq!(result, decided(MatchWinner::Draw, DecisionReason::AllOutScoresLevel));
    }

    #[test]
    fn all_out_ahead_of_target() {
        let clf = RecordingClassifier::new(0.5);
        let result = resolve(&chase(150, 154, 19.4, 10), &clf).unwrap();
        assert_eq!(
            result,
            decided(MatchWinner::Batting, DecisionReason::ChasedBeforeAllOut)
        );
    }

    #[test]
    fn all_out_behind_target() {
        let clf = RecordingClassifier::new(0.5);
        let result = resolve(&chase(150, 97, 14.1, 10), &clf).unwrap();
        assert_eq!(result, decided(MatchWinner::Bowling, DecisionReason::AllOut));
        assert!(clf.calls().is_empty());
    }

    #[test]
    fn last_ball_finish_past_target() {
        let clf = RecordingClassifier::new(0.5);
        let result = resolve(&chase(150, 155, 20.0, 7), &clf).unwrap();
        assert_eq!(result, decided(MatchWinner::Batting, DecisionReason::LastBallFinish));
    }

    #[test]
    fn level_at_over_limit_rule_describes_a_draw() {
        // Unreachable through `resolve`: TargetChased fires first.
        let state = chase(160, 160, 20.0, 4);
        let features = DerivedFeatures::derive(&state);
        let rule = &TERMINAL_RULES[5];
        assert_eq!(rule.reason, DecisionReason::LevelAtOverLimit);
        assert_eq!(rule.winner, MatchWinner::Draw);
        assert!(rule.applies(&state, &features));
        assert_eq!(decide(&state, &features).unwrap().reason, DecisionReason::TargetChased);
    }

    #[test]
    fn score_past_target_with_balls_left_still_queries_classifier() {
        // Neither all out nor overs done, and not exactly level.
        let clf = RecordingClassifier::new(0.99);
        let result = resolve(&chase(150, 153, 18.0, 4), &clf).unwrap();
        assert!(matches!(result, PredictionResult::Probabilistic { .. }));
        let calls = clf.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].runs_left, 0);
        assert_relative_eq!(calls[0].rrr, 0.0);
    }

    #[test]
    fn classifier_failure_is_an_error() {
        let clf = RecordingClassifier::failing();
        let err = resolve(&chase(180, 50, 5.0, 2), &clf).unwrap_err();
        assert!(matches!(err, ClassifierError::Artifact(_)));
    }

    #[test]
    fn all_out_outcomes_follow_score_for_every_over_count() {
        let clf = RecordingClassifier::new(0.5);
        for tenth in 1..=200u32 {
            let overs = tenth as f64 / 10.0;
            for (score, expected) in [
                (140, decided(MatchWinner::Draw, DecisionReason::AllOutScoresLevel)),
                (141, decided(MatchWinner::Batting, DecisionReason::ChasedBeforeAllOut)),
                (139, decided(MatchWinner::Bowling, DecisionReason::AllOut)),
            ] {
                let result = resolve(&chase(140, score, overs, 10), &clf).unwrap();
                assert_eq!(result, expected, "score {} at {} overs", score, overs);
            }
        }
        assert!(clf.calls().is_empty());
    }

    #[test]
    fn level_scores_with_wickets_in_hand_always_batting_win() {
        let clf = RecordingClassifier::new(0.5);
        for wickets in 0..MAX_WICKETS {
            for tenth in 1..=200u32 {
                let overs = tenth as f64 / 10.0;
                let result = resolve(&chase(175, 175, overs, wickets), &clf).unwrap();
                assert_eq!(result, decided(MatchWinner::Batting, DecisionReason::TargetChased));
            }
        }
        assert!(clf.calls().is_empty());
    }

    #[test]
    fn open_states_always_have_runs_and_balls_left() {
        let clf = RecordingClassifier::new(0.42);
        let mut expected_calls = 0;
        for wickets in 0..MAX_WICKETS {
            for score in (0..190u32).step_by(13) {
                for overs in [0.1, 3.4, 9.0, 15.5, 19.5] {
                    let state = chase(190, score, overs, wickets);
                    let result = resolve(&state, &clf).unwrap();
                    expected_calls += 1;
                    let PredictionResult::Probabilistic {
                        batting_win_prob,
                        bowling_win_prob,
                    } = result
                    else {
                        panic!("expected classifier query for {:?}", state);
                    };
                    assert_relative_eq!(batting_win_prob + bowling_win_prob, 1.0, epsilon = 1e-6);
                    let fv = clf.calls().pop().unwrap();
                    assert!(fv.runs_left > 0);
                    assert!(fv.balls_left > 0);
                }
            }
        }
        assert_eq!(clf.calls().len(), expected_calls);
    }
}
