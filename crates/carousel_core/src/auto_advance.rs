use std::sync::Weak;

use tokio::time::sleep_until;
use tracing::trace;

use crate::controller::{Shared, Tick};

/// Timer loop for one auto-advance generation.
///
/// The loop re-reads its deadline on every wake-up because user navigation
/// may have pushed it back. It exits as soon as its generation is no longer
/// the active one or the controller is gone.
pub(crate) async fn run(shared: Weak<Shared>, generation: u64) {
    loop {
        let Some(deadline) = shared
            .upgrade()
            .and_then(|shared| shared.timer_deadline(generation))
        else {
            break;
        };

        sleep_until(deadline).await;

        let Some(live) = shared.upgrade() else {
            break;
        };
        match live.auto_advance_tick(generation) {
            Tick::Fired | Tick::Rearmed => {}
            Tick::Retired => break,
        }
    }

    trace!(generation, "auto-advance timer exited");
}
