//! Reaction event dispatcher
//!
//! Single consumer for the typed reaction events emitted by the platform
//! adapter. Handler errors are logged and never stop the loop.

use tokio::sync::{mpsc, watch};
use tracing::{error, info};

use pairweek_core::ReactionEvent;
use pairweek_service::{MatchLifecycleService, ServiceContext};

/// Consume reaction events until the channel closes or shutdown flips
pub async fn run_reaction_dispatcher(
    ctx: ServiceContext,
    mut events: mpsc::Receiver<ReactionEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    info!("Reaction dispatcher started");

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    info!("Reaction channel closed, dispatcher stopping");
                    return;
                };

                let lifecycle = MatchLifecycleService::new(&ctx);
                if let Err(e) = lifecycle.handle_reaction(event).await {
                    error!(
                        space_handle = %event.space_handle,
                        user_id = %event.user_id,
                        error = %e,
                        "Reaction handling failed"
                    );
                }
            }
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    info!("Reaction dispatcher shutting down");
                    return;
                }
            }
        }
    }
}
