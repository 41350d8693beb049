//! Constraint catalog.
//!
//! The catalog is a closed list of generator descriptors. [`catalog`]
//! selects the generators that apply to a set of events and [`post`] turns
//! one descriptor into engine constraints.

mod event;
mod tournament;

#[cfg(test)]
mod tests;

use std::fmt;

use courtforge_core::{Event, MatchupMode};
use crate::encoder::EventVariables;
use crate::engine::{Model, SumTarget, Var};

/// A constraint generator, per event (by index) or tournament-wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintGenerator {
    /// Total number of match starts and occupied cells of the event.
    TotalMatches { event: usize },
    /// Every player starts `matches_per_player` matches.
    MatchesPerPlayer { event: usize },
    /// A localization holds nobody or a full match.
    LocalizationOccupation { event: usize },
    /// A match begins where a full window of occupancy begins.
    MatchStartMapping { event: usize },
    /// A player is in at most one place and one match at a time.
    NonOverlappingMatches { event: usize },
    /// Team members share every cell.
    Teams { event: usize },
    /// Pairs of players or teams meet at most once, or always.
    MatchupMode { event: usize },
    /// Predefined matchups happen the required number of times.
    PredefinedMatchups { event: usize },
    /// Events sharing a localization never use it at the same time.
    LocalizationCollision,
    /// A player of several events is in one event at a time.
    PlayerNotSimultaneous,
}

impl ConstraintGenerator {
    pub fn name(&self) -> &'static str {
        match self {
            ConstraintGenerator::TotalMatches { .. } => "TotalMatches",
            ConstraintGenerator::MatchesPerPlayer { .. } => "MatchesPerPlayer",
            ConstraintGenerator::LocalizationOccupation { .. } => "LocalizationOccupation",
            ConstraintGenerator::MatchStartMapping { .. } => "MatchStartMapping",
            ConstraintGenerator::NonOverlappingMatches { .. } => "NonOverlappingMatches",
            ConstraintGenerator::Teams { .. } => "Teams",
            ConstraintGenerator::MatchupMode { .. } => "MatchupMode",
            ConstraintGenerator::PredefinedMatchups { .. } => "PredefinedMatchups",
            ConstraintGenerator::LocalizationCollision => "LocalizationCollision",
            ConstraintGenerator::PlayerNotSimultaneous => "PlayerNotSimultaneous",
        }
    }

    /// Index of the event the generator applies to, if it is per event.
    pub fn event(&self) -> Option<usize> {
        match *self {
            ConstraintGenerator::TotalMatches { event }
            | ConstraintGenerator::MatchesPerPlayer { event }
            | ConstraintGenerator::LocalizationOccupation { event }
            | ConstraintGenerator::MatchStartMapping { event }
            | ConstraintGenerator::NonOverlappingMatches { event }
            | ConstraintGenerator::Teams { event }
            | ConstraintGenerator::MatchupMode { event }
            | ConstraintGenerator::PredefinedMatchups { event } => Some(event),
            ConstraintGenerator::LocalizationCollision
            | ConstraintGenerator::PlayerNotSimultaneous => None,
        }
    }
}

impl fmt::Display for ConstraintGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.event() {
            Some(event) => write!(f, "{}[{event}]", self.name()),
            None => f.write_str(self.name()),
        }
    }
}

/// Posts `Σ vars = size · used` for a fresh boolean `used`, so the sum is
/// either 0 or `size`, and returns `used`.
pub(crate) fn none_or(model: &mut Model, vars: &[Var], size: i32) -> Var {
    let used = model.new_bool(true);
    let mut terms: Vec<(i32, Var)> = vars.iter().map(|&var| (1, var)).collect();
    terms.push((-size, used));
    model.linear(&terms, SumTarget::Exactly(0));
    used
}

/// Returns true if the matchup mode adds pair constraints to the event.
pub(crate) fn restricts_pairs(event: &Event) -> bool {
    matches!(
        event.matchup_mode(),
        MatchupMode::AllDifferent | MatchupMode::AllEqual
    ) && event.matches_per_player() > 1
        && event.players_per_match() > 1
}

/// Generators that apply to the given events, per event first.
pub fn catalog(events: &[Event]) -> Vec<ConstraintGenerator> {
    let mut generators = Vec::new();
    for (index, event) in events.iter().enumerate() {
        generators.extend([
            ConstraintGenerator::TotalMatches { event: index },
            ConstraintGenerator::MatchesPerPlayer { event: index },
            ConstraintGenerator::LocalizationOccupation { event: index },
            ConstraintGenerator::MatchStartMapping { event: index },
            ConstraintGenerator::NonOverlappingMatches { event: index },
        ]);
        if event.has_teams() {
            generators.push(ConstraintGenerator::Teams { event: index });
        }
        if restricts_pairs(event) {
            generators.push(ConstraintGenerator::MatchupMode { event: index });
        }
        if event.has_predefined_matchups() {
            generators.push(ConstraintGenerator::PredefinedMatchups { event: index });
        }
    }
    if events.len() > 1 {
        generators.push(ConstraintGenerator::LocalizationCollision);
        generators.push(ConstraintGenerator::PlayerNotSimultaneous);
    }
    generators
}

/// Everything a generator needs to post its constraints.
#[derive(Debug)]
pub struct PostingContext<'a> {
    pub model: &'a mut Model,
    pub events: &'a [Event],
    pub vars: &'a [EventVariables],
}

/// Posts the constraints of one generator.
pub fn post(generator: ConstraintGenerator, ctx: &mut PostingContext<'_>) {
    let before = ctx.model.num_constraints();
    match generator {
        ConstraintGenerator::TotalMatches { event } => {
            event::total_matches(ctx.model, &ctx.events[event], &ctx.vars[event])
        }
        ConstraintGenerator::MatchesPerPlayer { event } => {
            event::matches_per_player(ctx.model, &ctx.events[event], &ctx.vars[event])
        }
        ConstraintGenerator::LocalizationOccupation { event } => {
            event::localization_occupation(ctx.model, &ctx.events[event], &ctx.vars[event])
        }
        ConstraintGenerator::MatchStartMapping { event } => {
            event::match_start_mapping(ctx.model, &ctx.events[event], &ctx.vars[event])
        }
        ConstraintGenerator::NonOverlappingMatches { event } => {
            event::non_overlapping_matches(ctx.model, &ctx.events[event], &ctx.vars[event])
        }
        ConstraintGenerator::Teams { event } => {
            event::teams(ctx.model, &ctx.events[event], &ctx.vars[event])
        }
        ConstraintGenerator::MatchupMode { event } => {
            event::matchup_mode(ctx.model, &ctx.events[event], &ctx.vars[event])
        }
        ConstraintGenerator::PredefinedMatchups { event } => {
            event::predefined_matchups(ctx.model, &ctx.events[event], &ctx.vars[event])
        }
        ConstraintGenerator::LocalizationCollision => {
            tournament::localization_collision(ctx.model, ctx.events, ctx.vars)
        }
        ConstraintGenerator::PlayerNotSimultaneous => {
            tournament::player_not_simultaneous(ctx.model, ctx.events, ctx.vars)
        }
    }
    tracing::trace!(
        generator = %generator,
        constraints = ctx.model.num_constraints() - before,
        "posted"
    );
}

/// Posts every generator of the catalog.
pub fn post_all(generators: &[ConstraintGenerator], ctx: &mut PostingContext<'_>) {
    for &generator in generators {
        post(generator, ctx);
    }
}
