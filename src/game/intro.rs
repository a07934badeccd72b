use std::time::Duration;

use super::config::IntroTimings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroAction {
    RevealAll,
    Shuffle,
    /// Hide every card, start the countdown and open the board for taps.
    Finish,
}

/// Wait `delay`, then perform `action`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntroStep {
    pub delay: Duration,
    pub action: IntroAction,
}

/// The ordered reveal/shuffle/hide choreography played before each game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntroScript {
    steps: Vec<IntroStep>,
}

impl IntroScript {
    pub fn from_config(timings: &IntroTimings) -> Self {
        let mut steps = Vec::with_capacity(timings.shuffle_count as usize + 2);
        steps.push(IntroStep {
            delay: Duration::from_millis(timings.reveal_delay_ms),
            action: IntroAction::RevealAll,
        });
        for n in 0..timings.shuffle_count {
            let mut wait = timings.shuffle_interval_ms;
            if n == 0 {
                wait += timings.shuffle_lead_ms;
            }
            steps.push(IntroStep {
                delay: Duration::from_millis(wait),
                action: IntroAction::Shuffle,
            });
        }
        steps.push(IntroStep {
            delay: Duration::from_millis(timings.memorize_ms),
            action: IntroAction::Finish,
        });
        IntroScript { steps }
    }

    pub fn steps(&self) -> &[IntroStep] {
        &self.steps
    }

    pub fn step(&self, position: usize) -> Option<IntroStep> {
        self.steps.get(position).copied()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|step| step.delay).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_script_matches_timings() {
        let script = IntroScript::from_config(&IntroTimings::default());
        assert_eq!(script.len(), 12);

        let first = script.step(0).unwrap();
        assert_eq!(first.action, IntroAction::RevealAll);
        assert_eq!(first.delay, Duration::from_millis(400));

        let first_shuffle = script.step(1).unwrap();
        assert_eq!(first_shuffle.action, IntroAction::Shuffle);
        assert_eq!(first_shuffle.delay, Duration::from_millis(800));

        let shuffles = script
            .steps()
            .iter()
            .filter(|step| step.action == IntroAction::Shuffle)
            .count();
        assert_eq!(shuffles, 10);

        let last = script.step(script.len() - 1).unwrap();
        assert_eq!(last.action, IntroAction::Finish);
        assert_eq!(last.delay, Duration::from_millis(4000));

        assert_eq!(script.total_duration(), Duration::from_millis(8800));
    }

    #[test]
    fn no_shuffles_goes_straight_to_finish() {
        let timings = IntroTimings {
            shuffle_count: 0,
            ..IntroTimings::default()
        };
        let script = IntroScript::from_config(&timings);
        let actions: Vec<IntroAction> = script.steps().iter().map(|s| s.action).collect();
        assert_eq!(actions, vec![IntroAction::RevealAll, IntroAction::Finish]);
    }
}
