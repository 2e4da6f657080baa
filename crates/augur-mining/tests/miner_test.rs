use augur_core::config::MiningConfig;
use augur_core::models::{
    AverageBand, Condition, Formula, Label, Mode, Observation, Prediction, RuleFamily,
};
use augur_mining::{FeatureExtractor, FeatureSequence, ForecastSource, RuleApplier, RuleMiner};
use chrono::{TimeZone, Utc};

use Label::{Green as G, High as H, Low as L, Red as R};

fn wide_miner() -> RuleMiner {
    RuleMiner::new(MiningConfig {
        max_formulas: 10_000,
        ..MiningConfig::default()
    })
}

fn color_seq(labels: Vec<Label>) -> FeatureSequence {
    let n = labels.len();
    FeatureSequence::new(Mode::Color, labels, vec![5; n]).unwrap()
}

fn repeat_block(block: &[Label], times: usize) -> Vec<Label> {
    block.iter().copied().cycle().take(block.len() * times).collect()
}

#[test]
fn streak_of_four_yields_reversal_rule() {
    let seq = color_seq(repeat_block(&[R, R, R, R, G], 6));
    let formulas = wide_miner().mine(&seq);

    let streak = formulas
        .iter()
        .find(|f| f.condition == Condition::Streak { length: 4, label: R })
        .expect("streak-4 rule mined");
    assert_eq!(streak.family, RuleFamily::StreakReversal);
    assert_eq!(streak.prediction, Prediction::Fixed(G));
    assert_eq!(streak.support, 6);
    assert_eq!(streak.confidence, 1.0);
    assert_eq!(streak.id, "streak:4:RED->GREEN");

    // A streak of three is followed by RED as often as GREEN.
    assert!(formulas
        .iter()
        .all(|f| f.condition != Condition::Streak { length: 3, label: R }));
}

fn find<'a>(formulas: &'a [Formula], condition: &Condition, prediction: Prediction) -> &'a Formula {
    formulas
        .iter()
        .find(|f| &f.condition == condition && f.prediction == prediction)
        .unwrap_or_else(|| panic!("no formula for {condition:?} -> {prediction:?}"))
}

fn assert_rate(formula: &Formula, correct: u32, support: u32) {
    assert_eq!(formula.support, support, "{}", formula.id);
    let expected = f64::from(correct) / f64::from(support);
    assert!(
        (formula.confidence - expected).abs() < 1e-12,
        "{}: {} != {expected}",
        formula.id,
        formula.confidence
    );
}

#[test]
fn equal_scores_keep_discovery_order() {
    let seq = color_seq(repeat_block(&[R, R, R, R, G], 6));
    let miner = wide_miner();
    let formulas = miner.mine(&seq);

    let position = |condition: &Condition| {
        formulas
            .iter()
            .position(|f| &f.condition == condition && f.prediction == Prediction::Fixed(G))
            .unwrap()
    };
    let streak = position(&Condition::Streak { length: 4, label: R });
    let pattern = position(&Condition::Pattern {
        pattern: vec![R, R, R, R],
    });
    assert_eq!(formulas[streak].score(), 6.0);
    assert_eq!(formulas[pattern].score(), 6.0);
    assert!(streak < pattern);

    let generated: Vec<String> = miner.candidates(&seq).into_iter().map(|f| f.id).collect();
    let rank = |id: &str| generated.iter().position(|g| g == id).unwrap();
    for pair in formulas.windows(2) {
        if pair[0].score() == pair[1].score() {
            assert!(rank(&pair[0].id) < rank(&pair[1].id), "{} / {}", pair[0].id, pair[1].id);
        }
    }
}

#[test]
fn ngram_rules_count_every_occurrence() {
    let seq = color_seq(repeat_block(&[R, R, R, R, G], 6));
    let formulas = wide_miner().mine(&seq);

    let pattern = |labels: &[Label]| Condition::Pattern {
        pattern: labels.to_vec(),
    };
    assert_rate(find(&formulas, &pattern(&[R, G]), Prediction::Fixed(R)), 5, 5);
    assert_rate(find(&formulas, &pattern(&[R, R]), Prediction::Fixed(R)), 12, 18);
    // 6 of 18 is below the confidence floor.
    assert!(formulas
        .iter()
        .all(|f| !(f.condition == pattern(&[R, R]) && f.prediction == Prediction::Fixed(G))));
}

#[test]
fn imbalance_rules_predict_the_minority_label() {
    let seq = color_seq(repeat_block(&[R, R, R, R, G, G], 6));
    let formulas = wide_miner().mine(&seq);

    let imbalance = |window, threshold_pct| Condition::Imbalance {
        window,
        threshold_pct,
        label: R,
    };
    assert_rate(find(&formulas, &imbalance(5, 80), Prediction::Fixed(G)), 11, 11);
    assert_rate(find(&formulas, &imbalance(10, 70), Prediction::Fixed(G)), 10, 14);
    assert_rate(find(&formulas, &imbalance(10, 80), Prediction::Fixed(G)), 5, 5);
    for formula in &formulas {
        if let Condition::Imbalance { label, .. } = formula.condition {
            assert_eq!(formula.prediction, Prediction::Fixed(label.opposite()));
        }
    }
}

#[test]
fn number_clusters_score_each_band() {
    let numbers: Vec<i64> = [1, 1, 1, 1, 1, 8, 8, 8, 8, 8].repeat(3);
    let labels: Vec<Label> = numbers.iter().map(|n| if *n <= 4 { L } else { H }).collect();
    let seq = FeatureSequence::new(Mode::Size, labels, numbers).unwrap();
    let formulas = wide_miner().mine(&seq);

    let band = |band| Condition::AverageBand { window: 5, band };
    assert_rate(find(&formulas, &band(AverageBand::Low), Prediction::Fixed(H)), 6, 8);
    assert_rate(find(&formulas, &band(AverageBand::High), Prediction::Fixed(L)), 4, 7);
    // 2 of 8, 3 of 7 and 5 of 15 fall below the confidence floor.
    for (condition, prediction) in [
        (band(AverageBand::Low), Prediction::Fixed(L)),
        (band(AverageBand::High), Prediction::Fixed(H)),
        (band(AverageBand::Either), Prediction::FollowExtreme),
    ] {
        assert!(formulas
            .iter()
            .all(|f| !(f.condition == condition && f.prediction == prediction)));
    }
    // Wider windows always straddle both halves of the block.
    assert!(formulas.iter().all(|f| !matches!(
        f.condition,
        Condition::AverageBand { window: 8 | 10, .. }
    )));
}

#[test]
fn alternating_history_forecasts_the_other_label() {
    let seq = color_seq(repeat_block(&[R, G], 10));
    let formulas = wide_miner().mine(&seq);
    assert!(formulas
        .iter()
        .any(|f| f.family == RuleFamily::Alternation));

    let tail = FeatureSequence::new(Mode::Color, vec![R, G, R, G, R], vec![5; 5]).unwrap();
    let alternation: Vec<_> = formulas
        .iter()
        .filter(|f| f.condition == Condition::Alternating { length: 5 })
        .cloned()
        .collect();
    assert_eq!(alternation.len(), 1);
    let forecast = RuleApplier::new().apply(&alternation, &tail);
    assert_eq!(forecast.label, G);
    assert_eq!(forecast.rule_id(), Some(alternation[0].id.as_str()));
}

#[test]
fn default_cap_keeps_the_top_thirty() {
    let labels: Vec<Label> = (0..300u64)
        .map(|i| if ((i * 2_654_435_761) >> 7) % 3 == 0 { R } else { G })
        .collect();
    let seq = color_seq(labels);
    let all = wide_miner().mine(&seq);
    let capped = RuleMiner::default().mine(&seq);

    assert!(all.len() > 30, "fixture should produce more than 30 survivors");
    assert_eq!(capped.len(), 30);
    assert_eq!(&all[..30], capped.as_slice());
}

#[test]
fn mining_is_deterministic() {
    let labels: Vec<Label> = (0..150)
        .map(|i| if (i * i + 3 * i) % 5 < 2 { H } else { L })
        .collect();
    let numbers: Vec<i64> = labels
        .iter()
        .enumerate()
        .map(|(i, l)| if *l == L { (i % 5) as i64 } else { 5 + (i % 5) as i64 })
        .collect();
    let seq = FeatureSequence::new(Mode::Size, labels, numbers).unwrap();
    let miner = RuleMiner::default();
    let mined_at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

    let a = miner.mine_set(&seq, "a", mined_at).unwrap();
    let b = miner.mine_set(&seq, "b", mined_at).unwrap();
    assert_eq!(a.formulas, b.formulas);
    assert_eq!(a.fingerprint, b.fingerprint);
    assert_eq!(a.sequence_length, 150);
    assert!(!a.is_active);
    assert_eq!(a.counters.total_predictions, 0);
}

#[test]
fn repeated_block_uses_relaxed_support() {
    // [G,R,G,R] then G appears twice in 100 periods; the regular floor is 3.
    let mut labels = repeat_block(&[R, G, G], 30);
    labels.extend_from_slice(&[R, G, R, G, R, G, G, R, G, R]);
    let seq = color_seq(labels);
    let miner = RuleMiner::default();
    assert_eq!(miner.support_floor(seq.len()), 3);
    assert_eq!(miner.relaxed_support_floor(seq.len()), 2);

    let formulas = wide_miner().mine(&seq);
    let block = formulas
        .iter()
        .find(|f| f.condition == Condition::RepeatedBlock { block: vec![G, R] })
        .expect("repeated block rule survives the relaxed floor");
    assert_eq!(block.support, 2);
    assert_eq!(block.prediction, Prediction::Fixed(G));
    assert_eq!(block.confidence, 1.0);
}

#[test]
fn extractor_feeds_the_miner() {
    let observations: Vec<Observation> = (0..40)
        .map(|i| {
            let n = (i * 3 % 10) as i64;
            let color = if n % 2 == 0 { "red,violet" } else { "green" };
            Observation::new(format!("{:05}", 10_000 + i), n, color)
        })
        .collect();
    let extractor = FeatureExtractor::default();
    let color = extractor.extract(&observations, Mode::Color);
    let size = extractor.extract(&observations, Mode::Size);
    assert_eq!(color.len(), 40);
    assert!(color.labels.iter().all(|l| Mode::Color.accepts(*l)));
    assert!(size.labels.iter().all(|l| Mode::Size.accepts(*l)));

    let miner = RuleMiner::default();
    for formula in miner.mine(&size) {
        assert!(
            formula.support >= miner.support_floor(40)
                || formula.family == RuleFamily::RepeatedBlock
        );
    }
}

#[test]
fn applier_never_returns_a_foreign_label() {
    let seq = color_seq(repeat_block(&[R, R, G], 8));
    let formulas = RuleMiner::default().mine(&seq);
    let forecast = RuleApplier::new().apply(&formulas, &seq);
    assert!(Mode::Color.accepts(forecast.label));
    assert!(matches!(
        forecast.source,
        ForecastSource::Rule { .. } | ForecastSource::TransitionDefault
    ));
}
