mod common;

use common::show::finale::{Cue, FinaleChain, FinaleTiming};
use common::show::timeline::Timeline;

fn drain<T>(tl: &mut Timeline<T>, now: f64) -> Vec<(f64, T)> {
    std::iter::from_fn(|| tl.pop_due(now)).collect()
}

#[test]
fn drains_only_what_is_due() {
    let mut tl = Timeline::new();
    tl.schedule_at(300.0, "c");
    tl.schedule_at(100.0, "a");
    tl.schedule_at(200.0, "b");

    assert_eq!(drain(&mut tl, 200.0), vec![(100.0, "a"), (200.0, "b")]);
    assert_eq!(tl.len(), 1);
    assert_eq!(tl.next_due(), Some(300.0));

    assert_eq!(tl.pop_due(250.0), None);
}

#[test]
fn equal_deadlines_keep_insertion_order() {
    let mut tl = Timeline::new();
    for n in 0..5 {
        tl.schedule_after(1000.0, 400, n);
    }
    let order: Vec<i32> = drain(&mut tl, 1400.0).into_iter().map(|(_, n)| n).collect();
    assert_eq!(order, vec![0, 1, 2, 3, 4]);
    assert!(tl.is_empty());
    assert_eq!(tl.next_due(), None);
}

#[test]
fn chain_delays_are_relative_to_fire_time() {
    let chain = FinaleChain::new()
        .then(200, Cue::GlitchPulse)
        .then(400, Cue::ResetAndReveal)
        .then(0, Cue::Blackout);
    let mut tl = Timeline::new();
    chain.fire(1000.0, &mut tl);

    assert_eq!(
        drain(&mut tl, f64::MAX),
        vec![
            (1000.0, Cue::Blackout),
            (1200.0, Cue::GlitchPulse),
            (1400.0, Cue::ResetAndReveal),
        ]
    );
}

#[test]
fn completion_chain_glitches_then_resets_then_arms() {
    let t = FinaleTiming::default();
    let cues: Vec<(u32, Cue)> = FinaleChain::completion(&t)
        .steps()
        .iter()
        .map(|s| (s.delay_ms, s.cue))
        .collect();
    assert_eq!(
        cues,
        vec![
            (200, Cue::GlitchPulse),
            (400, Cue::ResetAndReveal),
            (400, Cue::ArmClip),
        ]
    );
}

#[test]
fn clip_chain_never_ends_before_it_starts() {
    let t = FinaleTiming::default();
    let end = |remaining: f64| {
        FinaleChain::clip(&t, remaining)
            .steps()
            .iter()
            .find(|s| s.cue == Cue::EndClip)
            .map(|s| s.delay_ms)
    };
    assert_eq!(end(10.0), Some(10_000));
    assert_eq!(end(0.5), Some(t.clip_start_delay_ms));
    assert_eq!(end(-3.0), Some(t.clip_start_delay_ms));
}

#[test]
fn closing_chain_ends_in_terminal_blackout() {
    let t = FinaleTiming::default();
    let chain = FinaleChain::closing(&t);
    let last = chain.steps().iter().max_by_key(|s| s.delay_ms).unwrap();
    assert_eq!(last.cue, Cue::EndNarrative);
    assert_eq!(last.delay_ms, 30_000);
    let hide = chain
        .steps()
        .iter()
        .find(|s| s.cue == Cue::HideText)
        .unwrap();
    assert!(hide.delay_ms < last.delay_ms);
}
