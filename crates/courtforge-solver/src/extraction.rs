//! Match extraction.
//!
//! Decodes the solved occupancy of one event into its matches. A player's
//! occupancy row is split into match beginnings, then players beginning at
//! the same localization and timeslot are grouped, `players_per_match` at a
//! time.

use courtforge_core::{CourtForgeError, Event, Match, Result, Team};

/// Localization occupied by each player at each timeslot of an event,
/// indexed `[player][timeslot]`.
pub type Occupancy = Vec<Vec<Option<usize>>>;

/// Keeps only the first cell of every match in each player's row.
///
/// The `timeslots_per_match - 1` cells following an occupied cell belong to
/// the same match and are cleared.
pub fn beginnings(occupancy: &Occupancy, duration: usize) -> Occupancy {
    occupancy
        .iter()
        .map(|row| {
            let mut out = vec![None; row.len()];
            let mut t = 0;
            while t < row.len() {
                if let Some(court) = row[t] {
                    out[t] = Some(court);
                    t += duration.max(1);
                } else {
                    t += 1;
                }
            }
            out
        })
        .collect()
}

/// Reconstructs the matches of `event` from its occupancy matrix.
///
/// Within a timeslot, players beginning at the same localization are
/// grouped in player order until a full match is formed.
///
/// # Errors
///
/// Returns `Internal` if the matrix does not have the shape of the event
/// or does not describe valid matches.
pub fn extract_matches(event: &Event, occupancy: &Occupancy) -> Result<Vec<Match>> {
    let players = event.players();
    let timeslots = event.timeslots();
    if occupancy.len() != players.len() || occupancy.iter().any(|row| row.len() != timeslots.len())
    {
        return Err(CourtForgeError::Internal(format!(
            "occupancy of event {} does not match its players and timeslots",
            event.name()
        )));
    }

    let duration = event.timeslots_per_match();
    let per_match = event.players_per_match();
    let starts = beginnings(occupancy, duration);
    let mut matches = Vec::with_capacity(event.number_of_matches());

    for t in 0..timeslots.len() {
        let mut grouped = vec![false; players.len()];
        for p in 0..players.len() {
            let Some(court) = starts[p][t] else {
                continue;
            };
            if grouped[p] {
                continue;
            }
            let mut group = vec![p];
            grouped[p] = true;
            for q in p + 1..players.len() {
                if group.len() == per_match {
                    break;
                }
                if !grouped[q] && starts[q][t] == Some(court) {
                    group.push(q);
                    grouped[q] = true;
                }
            }
            if group.len() < per_match {
                continue;
            }

            let localization = event.localizations().get(court).ok_or_else(|| {
                CourtForgeError::Internal(format!("localization index {court} out of range"))
            })?;
            let end = (t + duration - 1).min(timeslots.len() - 1);
            let game = Match::new(
                group.iter().map(|&i| players[i].clone()).collect(),
                localization.clone(),
                timeslots[t].clone(),
                timeslots[end].clone(),
                duration,
            )?;
            let game = if event.has_teams() {
                let teams = teams_of(event, &game);
                game.with_teams(teams)
            } else {
                game
            };
            matches.push(game);
        }
    }
    Ok(matches)
}

/// Distinct teams of a match's players, in discovery order.
fn teams_of(event: &Event, game: &Match) -> Vec<Team> {
    let mut teams: Vec<Team> = Vec::new();
    for player in game.players() {
        if let Some(team) = event.team_of(player) {
            if !teams.contains(team) {
                teams.push(team.clone());
            }
        }
    }
    teams
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtforge_core::{localizations, players, timeslots, Team};

    fn event(players_count: usize, duration: usize, per_match: usize) -> Event {
        Event::builder("Open")
            .players(players(players_count))
            .localizations(localizations(2))
            .timeslots(timeslots(4))
            .timeslots_per_match(duration)
            .players_per_match(per_match)
            .build()
            .unwrap()
    }

    #[test]
    fn test_beginnings_skip_match_continuation() {
        let occupancy = vec![vec![Some(0), Some(0), Some(1), Some(1)]];
        let starts = beginnings(&occupancy, 2);
        assert_eq!(starts, vec![vec![Some(0), None, Some(1), None]]);
    }

    #[test]
    fn test_extracts_two_matches() {
        let e = event(4, 2, 2);
        let occupancy = vec![
            vec![Some(0), Some(0), None, None],
            vec![None, None, Some(1), Some(1)],
            vec![Some(0), Some(0), None, None],
            vec![None, None, Some(1), Some(1)],
        ];
        let matches = extract_matches(&e, &occupancy).unwrap();
        assert_eq!(matches.len(), 2);

        let roster = players(4);
        let slots = timeslots(4);
        let courts = localizations(2);
        assert_eq!(matches[0].players(), &[roster[0].clone(), roster[2].clone()]);
        assert_eq!(matches[0].localization(), &courts[0]);
        assert_eq!(matches[0].start(), &slots[0]);
        assert_eq!(matches[0].end(), &slots[1]);
        assert_eq!(matches[1].players(), &[roster[1].clone(), roster[3].clone()]);
        assert_eq!(matches[1].start(), &slots[2]);
        assert_eq!(matches[1].duration(), 2);
    }

    #[test]
    fn test_simultaneous_matches_group_by_localization() {
        let e = event(4, 1, 2);
        let occupancy = vec![
            vec![Some(1), None, None, None],
            vec![Some(0), None, None, None],
            vec![Some(1), None, None, None],
            vec![Some(0), None, None, None],
        ];
        let matches = extract_matches(&e, &occupancy).unwrap();
        assert_eq!(matches.len(), 2);
        let roster = players(4);
        assert_eq!(matches[0].players(), &[roster[0].clone(), roster[2].clone()]);
        assert_eq!(matches[1].players(), &[roster[1].clone(), roster[3].clone()]);
        assert_eq!(matches[1].localization().name(), "Court 1");
    }

    #[test]
    fn test_single_player_matches() {
        let e = event(2, 1, 1);
        let occupancy = vec![
            vec![None, Some(0), None, None],
            vec![None, Some(1), None, None],
        ];
        let matches = extract_matches(&e, &occupancy).unwrap();
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.players().len() == 1));
    }

    #[test]
    fn test_teams_are_resolved_once() {
        let mut e = event(4, 1, 4);
        let roster = players(4);
        e.add_team(Team::of(vec![roster[0].clone(), roster[1].clone()]).unwrap())
            .unwrap();
        e.add_team(Team::of(vec![roster[2].clone(), roster[3].clone()]).unwrap())
            .unwrap();
        let occupancy = vec![vec![Some(0), None, None, None]; 4];

        let matches = extract_matches(&e, &occupancy).unwrap();
        assert_eq!(matches.len(), 1);
        let names: Vec<_> = matches[0].teams().iter().map(Team::name).collect();
        assert_eq!(names, vec!["Player 1-Player 2", "Player 3-Player 4"]);
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let e = event(2, 1, 2);
        assert!(extract_matches(&e, &vec![vec![None; 4]]).is_err());
    }
}
