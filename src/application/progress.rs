//! Progress stages announced while a strategy is being generated.

use std::time::Duration;

use tokio::{sync::watch, time::MissedTickBehavior};

use crate::domain::state::RequestState;

/// Delay between two stage announcements.
pub const STAGE_INTERVAL: Duration = Duration::from_secs(5);

pub const PROGRESS_STAGES: [&str; 5] = [
    "Analyzing global market trends...",
    "Identifying low-competition niches...",
    "Synthesizing business model architecture...",
    "Drafting technical requirements...",
    "Finalizing strategic roadmap...",
];

/// Announce progress stages for every `Generating` phase seen on `updates`.
///
/// The first stage is announced as soon as generation starts, then the next
/// one every `period`, wrapping after the last. Announcements stop when the
/// state leaves `Generating`; the task ends once the sender is dropped.
pub async fn track_progress<F>(
    mut updates: watch::Receiver<RequestState>,
    period: Duration,
    mut announce: F,
) where
    F: FnMut(usize, &'static str),
{
    loop {
        if updates.wait_for(RequestState::is_generating).await.is_err() {
            return;
        }

        let mut stage = 0;
        announce(stage, PROGRESS_STAGES[stage]);

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;

                changed = updates.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    if !updates.borrow_and_update().is_generating() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    stage = (stage + 1) % PROGRESS_STAGES.len();
                    announce(stage, PROGRESS_STAGES[stage]);
                }
            }
        }
    }
}
