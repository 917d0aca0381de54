//! Ballots and tallying for the two-round elimination vote.

use std::collections::BTreeMap;

use moonhollow_core::error::GameError;
use serde::Deserialize;

/// One participant's vote in an elimination round. Ephemeral: scoped to one
/// round, persisted only as a derived result message.
#[derive(Debug, Clone, Deserialize)]
pub struct Ballot {
    /// The name the voter wants eliminated.
    pub player_to_eliminate: String,
    /// The voter's stated reason.
    #[serde(default)]
    pub reason: String,
}

/// Counts ballots by exact name match.
#[must_use]
pub fn tally<'a>(votes: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for name in votes {
        *counts.entry(name.to_owned()).or_insert(0) += 1;
    }
    counts
}

/// Round One leader selection: the top-2 names by count, admitting a 3rd
/// when it ties with 2nd place. No further tie-breadth beyond that.
///
/// Names with equal counts rank alphabetically, which keeps the result
/// deterministic for a given tally.
#[must_use]
pub fn round_one_leaders(counts: &BTreeMap<String, usize>) -> Vec<String> {
    let mut ranked: Vec<(&String, usize)> = counts.iter().map(|(n, c)| (n, *c)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut leaders: Vec<String> = ranked.iter().take(2).map(|(n, _)| (*n).clone()).collect();
    if let (Some(second), Some(third)) = (ranked.get(1), ranked.get(2))
        && third.1 == second.1
    {
        leaders.push(third.0.clone());
    }
    leaders
}

/// Round Two winner: requires exactly one name at the maximum count.
///
/// A pure tie has no defined break rule; the engine fails loudly with
/// `TiedVote` rather than silently picking one.
pub fn round_two_winner(counts: &BTreeMap<String, usize>) -> Result<String, GameError> {
    let max = counts.values().copied().max().unwrap_or(0);
    if max == 0 {
        return Err(GameError::Validation("no ballots were cast".to_owned()));
    }
    let winners: Vec<String> = counts
        .iter()
        .filter(|(_, c)| **c == max)
        .map(|(n, _)| n.clone())
        .collect();
    match winners.as_slice() {
        [single] => Ok(single.clone()),
        _ => Err(GameError::TiedVote(winners)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, usize)]) -> BTreeMap<String, usize> {
        pairs.iter().map(|(n, c)| ((*n).to_owned(), *c)).collect()
    }

    #[test]
    fn test_tally_counts_exact_names() {
        let counts = tally(["Ada", "Bea", "Ada"]);
        assert_eq!(counts["Ada"], 2);
        assert_eq!(counts["Bea"], 1);
    }

    #[test]
    fn test_leaders_admit_third_on_second_place_tie() {
        let leaders = round_one_leaders(&counts(&[("A", 5), ("B", 3), ("C", 3), ("D", 1)]));
        assert_eq!(leaders, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_leaders_are_top_two_without_tie() {
        let leaders = round_one_leaders(&counts(&[("A", 5), ("B", 3), ("C", 2)]));
        assert_eq!(leaders, vec!["A", "B"]);
    }

    #[test]
    fn test_leaders_do_not_widen_past_three() {
        // Four names tied for 2nd place: only one 3rd-place admission.
        let leaders =
            round_one_leaders(&counts(&[("A", 5), ("B", 3), ("C", 3), ("D", 3), ("E", 3)]));
        assert_eq!(leaders.len(), 3);
        assert_eq!(leaders, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_round_two_single_winner() {
        let winner = round_two_winner(&counts(&[("A", 3), ("B", 2)])).unwrap();
        assert_eq!(winner, "A");
    }

    #[test]
    fn test_round_two_pure_tie_fails_loudly() {
        let err = round_two_winner(&counts(&[("A", 3), ("B", 3)])).unwrap_err();
        match err {
            GameError::TiedVote(names) => assert_eq!(names, vec!["A", "B"]),
            other => panic!("expected TiedVote, got {other:?}"),
        }
    }

    #[test]
    fn test_round_two_no_ballots_is_a_validation_error() {
        let err = round_two_winner(&BTreeMap::new()).unwrap_err();
        assert!(matches!(err, GameError::Validation(_)));
    }
}
