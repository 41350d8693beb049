//! Tests for the domain model.

use super::*;
use crate::CourtForgeError;

fn singles() -> Event {
    Event::new("Singles", players(8), localizations(2), timeslots(6)).unwrap()
}

// ============================================================================
// Entity Tests
// ============================================================================

mod entity_tests {
    use super::*;

    #[test]
    fn test_timeslots_order_by_chronological_order() {
        let early = Timeslot::labelled(1, "10:00");
        let late = Timeslot::generic(2);
        assert!(early < late);
        assert!(early.is_before(&late));
        assert!(!late.is_before(&early));
    }

    #[test]
    fn test_timeslot_label_breaks_ties() {
        let a = Timeslot::labelled(3, "A");
        let b = Timeslot::labelled(3, "B");
        assert!(a < b);
        assert_ne!(a, b);
    }

    #[test]
    fn test_helpers_name_entities() {
        let p = players(3);
        assert_eq!(p[0].name(), "Player 1");
        assert_eq!(p[2].to_string(), "Player 3");
        assert_eq!(localizations(2)[1].name(), "Court 2");
        assert_eq!(timeslots(4)[3].chronological_order(), 3);
    }
}

// ============================================================================
// Event Tests
// ============================================================================

mod event_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let event = singles();
        assert_eq!(event.matches_per_player(), 1);
        assert_eq!(event.timeslots_per_match(), 2);
        assert_eq!(event.players_per_match(), 2);
        assert_eq!(event.matchup_mode(), MatchupMode::Any);
        assert_eq!(event.number_of_matches(), 4);
        assert_eq!(event.number_of_occupied_timeslots(), 8);
    }

    #[test]
    fn test_rejects_indivisible_player_count() {
        let result = Event::new("Odd", players(7), localizations(2), timeslots(6));
        assert!(matches!(result, Err(CourtForgeError::InvalidArgument(_))));
    }

    #[test]
    fn test_rejects_duplicate_players() {
        let mut list = players(3);
        list.push(Player::new("Player 1"));
        let result = Event::new("Dup", list, localizations(1), timeslots(2));
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_unordered_timeslots() {
        let slots = vec![Timeslot::generic(2), Timeslot::generic(1)];
        let result = Event::new("Unordered", players(2), localizations(1), slots);
        assert!(result.is_err());
    }

    #[test]
    fn test_timeslot_capacity_boundary_is_inclusive() {
        let event = Event::builder("Exact")
            .players(players(4))
            .localizations(localizations(1))
            .timeslots(timeslots(6))
            .matches_per_player(3)
            .timeslots_per_match(2)
            .build();
        assert!(event.is_ok());

        let too_many = Event::builder("Short")
            .players(players(4))
            .localizations(localizations(1))
            .timeslots(timeslots(5))
            .matches_per_player(3)
            .timeslots_per_match(2)
            .build();
        assert!(too_many.is_err());
    }

    #[test]
    fn test_setters_check_invariants_before_mutating() {
        let mut event = singles();
        assert!(event.set_matches_per_player(4).is_err());
        assert_eq!(event.matches_per_player(), 1);
        assert!(event.set_players_per_match(3).is_err());
        assert_eq!(event.players_per_match(), 2);
        assert!(event.set_players_per_match(4).is_ok());
        assert_eq!(event.number_of_matches(), 2);
        assert!(event.set_timeslots_per_match(0).is_err());
    }

    #[test]
    fn test_break_range() {
        let mut event = singles();
        let slots = timeslots(6);
        event.add_break_range(&slots[1], &slots[3]).unwrap();
        assert_eq!(event.breaks().len(), 3);
        assert!(event.is_break(&slots[2]));
        assert!(!event.is_break(&slots[4]));
        assert!(event.remove_break(&slots[2]));
        assert!(!event.is_break(&slots[2]));
        assert!(event.add_break_range(&slots[3], &slots[1]).is_err());
    }

    #[test]
    fn test_unavailability_requires_known_entities() {
        let mut event = singles();
        let stranger = Player::new("Stranger");
        assert!(event
            .add_unavailable_player(&stranger, &Timeslot::generic(0))
            .is_err());
        assert!(event
            .add_unavailable_player(&players(1)[0], &Timeslot::generic(9))
            .is_err());

        let slots = timeslots(6);
        let roster = players(1);
        let p = &roster[0];
        event
            .add_unavailable_player_in_range(p, &slots[3], &slots[5])
            .unwrap();
        assert!(event.is_player_unavailable(p, &slots[4]));
        assert!(!event.is_player_unavailable(p, &slots[2]));

        let courts = localizations(1);
        let court = &courts[0];
        event.add_unavailable_localization(court, &slots[0]).unwrap();
        assert!(event.is_localization_unavailable(court, &slots[0]));
    }

    #[test]
    fn test_player_restrictions() {
        let mut event = singles();
        let roster = players(1);
        let p = &roster[0];
        let courts = localizations(2);
        let slots = timeslots(6);
        assert!(event.is_player_allowed_in(p, &courts[1]));
        event.add_player_in_localization(p, &courts[0]).unwrap();
        assert!(event.is_player_allowed_in(p, &courts[0]));
        assert!(!event.is_player_allowed_in(p, &courts[1]));

        event.add_player_at_timeslots(p, &slots[..2]).unwrap();
        assert!(event.is_player_allowed_at(p, &slots[1]));
        assert!(!event.is_player_allowed_at(p, &slots[2]));
    }

    #[test]
    fn test_indices() {
        let event = singles();
        assert_eq!(event.player_index(&Player::new("Player 3")), Some(2));
        assert_eq!(event.localization_index(&Localization::new("Court 2")), Some(1));
        assert_eq!(event.timeslot_index(&Timeslot::generic(5)), Some(5));
        assert_eq!(event.player_index(&Player::new("Nobody")), None);
    }
}

// ============================================================================
// Team Tests
// ============================================================================

mod team_tests {
    use super::*;

    fn doubles() -> Event {
        Event::builder("Doubles")
            .players(players(8))
            .localizations(localizations(2))
            .timeslots(timeslots(4))
            .players_per_match(4)
            .build()
            .unwrap()
    }

    #[test]
    fn test_team_requires_two_distinct_players() {
        assert!(Team::new("Solo", players(1)).is_err());
        let p = players(1).remove(0);
        assert!(Team::new("Twins", vec![p.clone(), p]).is_err());
        let team = Team::of(players(2)).unwrap();
        assert_eq!(team.name(), "Player 1-Player 2");
    }

    #[test]
    fn test_add_teams_and_lookup() {
        let mut event = doubles();
        let p = players(8);
        for pair in p.chunks(2) {
            event.add_team(Team::of(pair.to_vec()).unwrap()).unwrap();
        }
        assert_eq!(event.teams().len(), 4);
        assert_eq!(event.team_of(&p[5]).unwrap().players(), &p[4..6]);
    }

    #[test]
    fn test_rejects_overlapping_teams() {
        let mut event = doubles();
        let p = players(8);
        event.add_team(Team::of(p[0..2].to_vec()).unwrap()).unwrap();
        let overlap = Team::new("Overlap", vec![p[1].clone(), p[2].clone()]).unwrap();
        assert!(event.add_team(overlap).is_err());
    }

    #[test]
    fn test_rejects_team_size_not_dividing_players_per_match() {
        let mut event = doubles();
        let trio = Team::of(players(3)).unwrap();
        assert!(event.add_team(trio).is_err());
    }

    #[test]
    fn test_set_teams_is_atomic() {
        let mut event = doubles();
        let p = players(8);
        let good = Team::of(p[0..2].to_vec()).unwrap();
        let bad = Team::of(p[1..3].to_vec()).unwrap();
        assert!(event.set_teams(vec![good, bad]).is_err());
        assert!(event.teams().is_empty());
    }

    #[test]
    fn test_players_per_match_must_stay_multiple_of_team_size() {
        let mut event = doubles();
        event.add_team(Team::of(players(2)).unwrap()).unwrap();
        assert!(event.set_players_per_match(2).is_ok());
        assert!(event.set_players_per_match(1).is_err());
    }
}

// ============================================================================
// Matchup Tests
// ============================================================================

mod matchup_tests {
    use super::*;

    #[test]
    fn test_matchup_size_must_equal_players_per_match() {
        let mut event = singles();
        let trio = Matchup::new(players(3)).unwrap();
        assert!(event.add_matchup(trio).is_err());
        let pair = Matchup::new(players(2)).unwrap();
        assert!(event.add_matchup(pair).is_ok());
        assert!(event.has_predefined_matchups());
        event.clear_matchups();
        assert!(!event.has_predefined_matchups());
    }

    #[test]
    fn test_matchup_references_event_entities() {
        let mut event = singles();
        let matchup = Matchup::new(players(2))
            .unwrap()
            .with_localizations(vec![Localization::new("Centre Court")]);
        assert!(event.add_matchup(matchup).is_err());
    }

    #[test]
    fn test_players_per_match_conflicts_with_matchups() {
        let mut event = singles();
        event.add_matchup(Matchup::new(players(2)).unwrap()).unwrap();
        assert!(event.set_players_per_match(4).is_err());
    }

    #[test]
    fn test_occurrences_positive() {
        assert!(Matchup::new(players(2)).unwrap().with_occurrences(0).is_err());
    }

    #[test]
    fn test_same_players_ignores_order() {
        let mut p = players(2);
        let a = Matchup::new(p.clone()).unwrap();
        p.reverse();
        let b = Matchup::new(p).unwrap();
        assert!(a.has_same_players(&b));
    }
}

// ============================================================================
// Match Tests
// ============================================================================

mod match_tests {
    use super::*;

    #[test]
    fn test_match_spans_its_window() {
        let slots = timeslots(4);
        let m = Match::new(
            players(2),
            Localization::new("Court 1"),
            slots[1].clone(),
            slots[2].clone(),
            2,
        )
        .unwrap();
        assert!(m.spans(&slots[1]));
        assert!(m.spans(&slots[2]));
        assert!(!m.spans(&slots[3]));
        assert!(m.involves(&players(1)[0]));
        assert_eq!(m.to_string(), "[Player 1 vs Player 2] at Court 1 from t1 to t2");
    }

    #[test]
    fn test_match_rejects_reversed_window() {
        let slots = timeslots(4);
        let result = Match::new(
            players(2),
            Localization::new("Court 1"),
            slots[2].clone(),
            slots[1].clone(),
            2,
        );
        assert!(result.is_err());
    }
}
