//! CLI command implementations

pub mod book;
pub mod list;

use roomctl_core::selection;
use roomctl_domain::{Result, Room, TimeWindow};

use crate::cli::RunOptions;
use crate::context::AppContext;

/// Resolve availability and apply the selection pipeline: the rooms free
/// over `window`, narrowed by the floor/capacity constraints and ranked
/// for deterministic selection.
pub(crate) async fn resolve_candidates(
    ctx: &AppContext,
    options: &RunOptions,
    window: TimeWindow,
) -> Result<Vec<Room>> {
    let available = ctx.availability.resolve(&ctx.rooms, window).await?;
    let filtered = selection::filter(&available, options.floor, Some(options.min_capacity));
    Ok(selection::rank(&filtered))
}
