//! Integration tests for winner recording and round advancement.

use bracket_maker::{
    advance_round, create_tournament, record_winner, MatchStatus, RoundAdvance, Tournament,
    TournamentError, TournamentStatus,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

fn tournament(n: usize) -> Tournament {
    let names: Vec<String> = (0..n).map(|i| format!("P{i}")).collect();
    create_tournament("Cup", &names, &["P0", "P1"], &mut StdRng::seed_from_u64(7)).unwrap()
}

/// Record side A as the winner of every open contest in the current round.
fn decide_current_round(t: &mut Tournament) {
    let round = t.current_round();
    let open: Vec<_> = t
        .round_matches(round)
        .filter(|m| m.is_contest() && m.winner.is_none())
        .map(|m| (m.id, m.slot_a))
        .collect();
    for (id, a) in open {
        record_winner(t, id, a).unwrap();
    }
}

#[test]
fn two_matches_to_champion() {
    let mut t = tournament(4);
    assert_eq!(t.matches.len(), 2);
    decide_current_round(&mut t);

    assert_eq!(
        advance_round(&mut t),
        Ok(RoundAdvance::NextRound { round: 2, matches: 1 })
    );
    let final_match = t.round_matches(2).next().unwrap().clone();
    assert!(final_match.is_contest());
    assert_eq!(final_match.slot_a, t.matches[0].winner);
    assert_eq!(final_match.slot_b, t.matches[1].winner);

    record_winner(&mut t, final_match.id, final_match.slot_b).unwrap();
    let champion = final_match.slot_b.unwrap();
    assert_eq!(advance_round(&mut t), Ok(RoundAdvance::Champion(champion)));
    assert_eq!(t.status, TournamentStatus::Completed);
    assert_eq!(t.champion, Some(champion));
    assert_eq!(t.current_round(), 2);

    assert_eq!(advance_round(&mut t), Err(TournamentError::AlreadyCompleted));
    assert_eq!(t.current_round(), 2);
}

#[test]
fn two_entrants_finish_after_one_round() {
    let mut t = tournament(2);
    decide_current_round(&mut t);
    assert!(matches!(advance_round(&mut t), Ok(RoundAdvance::Champion(_))));
    assert_eq!(t.matches.len(), 1);
}

#[test]
fn advance_is_a_no_op_until_round_is_decided() {
    let mut t = tournament(8);
    let first = t.matches[0].clone();
    record_winner(&mut t, first.id, first.slot_a).unwrap();
    let before = t.clone();

    assert_eq!(
        advance_round(&mut t),
        Err(TournamentError::RoundNotDecided { round: 1, undecided: 3 })
    );
    assert_eq!(t, before);
}

#[test]
fn record_winner_sets_and_clears() {
    let mut t = tournament(4);
    let m = t.matches[0].clone();

    record_winner(&mut t, m.id, m.slot_b).unwrap();
    assert_eq!(t.matches[0].winner, m.slot_b);
    assert_eq!(t.matches[0].status, MatchStatus::Final);

    record_winner(&mut t, m.id, None).unwrap();
    assert_eq!(t.matches[0].winner, None);
    assert_eq!(t.matches[0].status, MatchStatus::Scheduled);
}

#[test]
fn record_winner_rejects_bad_input() {
    let mut t = tournament(5);
    let before = t.clone();

    let bye = t.matches.iter().find(|m| m.is_bye()).unwrap().clone();
    assert_eq!(
        record_winner(&mut t, bye.id, bye.winner),
        Err(TournamentError::MatchIsBye(bye.id))
    );

    let contest = t.matches.iter().find(|m| m.is_contest()).unwrap().clone();
    let stranger = t.entrants.iter().find(|e| !contest.contains(e.id)).unwrap().id;
    assert_eq!(
        record_winner(&mut t, contest.id, Some(stranger)),
        Err(TournamentError::WinnerNotInMatch {
            match_id: contest.id,
            winner: stranger
        })
    );

    let unknown = Uuid::new_v4();
    assert_eq!(
        record_winner(&mut t, unknown, None),
        Err(TournamentError::MatchNotFound(unknown))
    );
    assert_eq!(t, before);
}

#[test]
fn earlier_rounds_are_locked() {
    let mut t = tournament(4);
    decide_current_round(&mut t);
    advance_round(&mut t).unwrap();

    let old = t.matches[0].clone();
    assert_eq!(
        record_winner(&mut t, old.id, old.slot_b),
        Err(TournamentError::MatchNotInCurrentRound(old.id))
    );
}

#[test]
fn odd_winner_count_gets_a_bye() {
    // 9 entrants: Round 1 has 6 matches (two empty pairs skipped), Round 2 has 3, Round 3 pairs 3 winners.
    let mut t = tournament(9);
    assert_eq!(t.round_matches(1).count(), 6);
    assert_eq!(t.round_matches(1).filter(|m| m.is_bye()).count(), 3);

    decide_current_round(&mut t);
    assert_eq!(advance_round(&mut t), Ok(RoundAdvance::NextRound { round: 2, matches: 3 }));
    assert!(t.round_matches(2).all(|m| m.is_contest()));

    decide_current_round(&mut t);
    assert_eq!(advance_round(&mut t), Ok(RoundAdvance::NextRound { round: 3, matches: 2 }));
    let round3: Vec<_> = t.round_matches(3).cloned().collect();
    assert_eq!(round3[0].status, MatchStatus::Scheduled);
    assert_eq!(round3[1].status, MatchStatus::Bye);
    assert_eq!(round3[1].winner, round3[1].slot_a);
    assert_eq!(round3[1].slot_b, None);
}

#[test]
fn full_run_numbers_rounds_contiguously() {
    for n in [3, 5, 6, 7, 11, 16, 21] {
        let mut t = tournament(n);
        let mut expected_round = 1;
        loop {
            decide_current_round(&mut t);
            match advance_round(&mut t).unwrap() {
                RoundAdvance::NextRound { round, .. } => {
                    expected_round += 1;
                    assert_eq!(round, expected_round);
                }
                RoundAdvance::Champion(c) => {
                    assert_eq!(t.champion, Some(c));
                    break;
                }
            }
        }
        let rounds: Vec<u32> = t.matches.iter().map(|m| m.round).collect();
        assert!(rounds.windows(2).all(|w| w[1] == w[0] || w[1] == w[0] + 1), "n = {n}");
        assert_eq!(t.status, TournamentStatus::Completed);
    }
}

#[test]
fn next_round_pairings_are_deterministic() {
    let mut t = tournament(12);
    decide_current_round(&mut t);
    let mut again = t.clone();

    advance_round(&mut t).unwrap();
    advance_round(&mut again).unwrap();
    let pairs = |t: &Tournament| -> Vec<_> {
        t.round_matches(2).map(|m| (m.slot_a, m.slot_b, m.status)).collect()
    };
    assert_eq!(pairs(&t), pairs(&again));
}
