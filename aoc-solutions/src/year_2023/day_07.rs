//! Day 7: Camel Cards

use crate::utils::parse::{parse_lines, split_once};
use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 7, tags = ["2023", "sorting"])]
pub struct Solver;

const ORDER: &[u8; 13] = b"23456789TJQKA";
const JOKER_ORDER: &[u8; 13] = b"J23456789TQKA";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hand {
    pub cards: [u8; 5],
    pub bid: u64,
}

impl Hand {
    /// Classify the hand; with `jokers`, every `J` joins the largest group.
    pub fn hand_type(&self, jokers: bool) -> HandType {
        let mut counts = [0u8; 13];
        let mut wild = 0;
        for &card in &self.cards {
            if jokers && card == b'J' {
                wild += 1;
            } else if let Some(idx) = ORDER.iter().position(|&c| c == card) {
                counts[idx] += 1;
            }
        }
        counts.sort_unstable_by(|a, b| b.cmp(a));
        counts[0] += wild;

        match (counts[0], counts[1]) {
            (5, _) => HandType::FiveOfAKind,
            (4, _) => HandType::FourOfAKind,
            (3, 2) => HandType::FullHouse,
            (3, _) => HandType::ThreeOfAKind,
            (2, 2) => HandType::TwoPair,
            (2, _) => HandType::OnePair,
            _ => HandType::HighCard,
        }
    }

    fn strength(&self, jokers: bool) -> (HandType, [usize; 5]) {
        let order = if jokers { JOKER_ORDER } else { ORDER };
        let ranks = self
            .cards
            .map(|card| order.iter().position(|&c| c == card).unwrap_or(0));
        (self.hand_type(jokers), ranks)
    }
}

fn parse_hand(line: &str) -> anyhow::Result<Hand> {
    let (cards, bid) = split_once(line, " ")?;
    let cards: [u8; 5] = cards
        .as_bytes()
        .try_into()
        .map_err(|_| anyhow!("a hand has five cards, got {:?}", cards))?;
    if let Some(bad) = cards.iter().find(|c| !ORDER.contains(c)) {
        return Err(anyhow!("unknown card {:?}", *bad as char));
    }
    let bid = bid.trim().parse().context("invalid bid")?;
    Ok(Hand { cards, bid })
}

/// Sum of bid × rank with hands ordered weakest first.
pub fn total_winnings(hands: &[Hand], jokers: bool) -> u64 {
    let mut ranked: Vec<_> = hands.iter().map(|h| (h.strength(jokers), h.bid)).collect();
    ranked.sort_unstable();
    ranked
        .iter()
        .zip(1u64..)
        .map(|((_, bid), rank)| bid * rank)
        .sum()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hand>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, parse_hand)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_winnings(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_winnings(shared, true).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::run_part;

    const EXAMPLE: &str = "32T3K 765
T55J5 684
KK677 28
KTJJT 220
QQQJA 483";

    fn hand(cards: &str) -> Hand {
        parse_hand(&format!("{} 1", cards)).unwrap()
    }

    #[test]
    fn test_part1_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 1), "6440");
    }

    #[test]
    fn test_part2_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 2), "5905");
    }

    #[test]
    fn test_joker_promotes_hand() {
        assert_eq!(hand("KTJJT").hand_type(false), HandType::TwoPair);
        assert_eq!(hand("KTJJT").hand_type(true), HandType::FourOfAKind);
        assert_eq!(hand("JJJJJ").hand_type(true), HandType::FiveOfAKind);
        assert_eq!(hand("2345J").hand_type(true), HandType::OnePair);
    }

    #[test]
    fn test_joker_ranks_lowest_on_ties() {
        assert!(hand("JKKK2").strength(true) < hand("QQQQ2").strength(true));
        assert!(hand("JJJJ2").strength(false) > hand("TTTT2").strength(false));
    }

    #[test]
    fn test_invalid_hands_rejected() {
        assert!(parse_hand("AAAA 1").is_err());
        assert!(parse_hand("AAAAX 1").is_err());
    }
}
