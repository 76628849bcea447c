//! Telegraph countdown phase.
//!
//! A telegraph one tick from landing produces a forewarning line. A
//! lethal or catastrophic one also produces a critical threat line on that
//! same tick; the two are independent.

use super::context::TickContext;
use crate::state::{LogKind, Telegraph};

pub(super) fn run(ctx: &mut TickContext<'_>) {
    let landing: Vec<Telegraph> = ctx
        .state
        .telegraphs
        .iter_mut()
        .filter_map(|telegraph| (telegraph.advance() == 1).then(|| telegraph.clone()))
        .collect();
    ctx.state.telegraphs.retain(|t| t.remaining_ticks > 0);

    for telegraph in &landing {
        forewarn(ctx, telegraph);
    }

    tracing::debug!(active = ctx.state.telegraphs.len(), "telegraphs advanced");
}

/// Logs the one-tick-left lines for `telegraph`. Also used at intake for
/// telegraphs that start with a single tick remaining.
pub(super) fn forewarn(ctx: &mut TickContext<'_>, telegraph: &Telegraph) {
    let source = ctx.name_of(telegraph.source);
    ctx.log(
        LogKind::Telegraph,
        format!("{source}'s {} lands next tick", telegraph.action_name),
    );
    if telegraph.threat.is_severe() {
        let target = ctx.name_of(telegraph.target);
        ctx.log(
            LogKind::Threat,
            format!(
                "CRITICAL: {source}'s {} ({} threat) is about to hit {target}",
                telegraph.action_name, telegraph.threat
            ),
        );
    }
}
