use std::str::FromStr;

use anchor_lang::prelude::*;

/// Returns true if the trimmed input is a canonical account address:
/// a base58 string decoding to exactly 32 bytes.
pub fn is_valid_address(input: &str) -> bool {
    Pubkey::from_str(input.trim()).is_ok()
}

/// A parsed entrant list, the client-side counterpart of
/// [`crate::instructions::create_race`].
///
/// `entered` keeps every trimmed non-empty entry, `unique` drops textual
/// duplicates while preserving first-seen order, and `valid` keeps the
/// unique entries that parse as account addresses. Invalid entries are
/// excluded silently; callers compare the counts to warn the operator
/// instead of raising an error.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub entered: Vec<String>,
    pub unique: Vec<String>,
    pub valid: Vec<Pubkey>,
}

impl Roster {
    /// Parses a comma-separated address list.
    ///
    /// De-duplication is literal: entries are compared as strings, not as
    /// decoded keys, so two spellings that differ only in case are kept
    /// as distinct entries.
    pub fn parse(input: &str) -> Self {
        let entered: Vec<String> = input
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_owned)
            .collect();

        // First-seen order; the lists are operator-sized, so the linear
        // scan beats hashing here.
        let mut unique: Vec<String> = Vec::with_capacity(entered.len());
        for entry in &entered {
            if !unique.iter().any(|seen| seen == entry) {
                unique.push(entry.clone());
            }
        }

        let valid = unique
            .iter()
            .filter(|entry| is_valid_address(entry))
            .filter_map(|entry| Pubkey::from_str(entry).ok())
            .collect();

        Roster {
            entered,
            unique,
            valid,
        }
    }

    /// True when the list can seed a race drawing `winner_count` winners.
    pub fn can_start(&self, winner_count: usize) -> bool {
        self.valid.len() >= 2 && winner_count >= 1 && winner_count <= self.valid.len()
    }

    /// Number of entries dropped as duplicates or invalid addresses,
    /// surfaced to the operator as a count-mismatch warning.
    pub fn dropped(&self) -> usize {
        self.entered.len() - self.valid.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WSOL: &str = "So11111111111111111111111111111111111111112";
    const SYSTEM: &str = "11111111111111111111111111111111";
    const TOKEN: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

    #[test]
    fn accepts_canonical_addresses() {
        assert!(is_valid_address(WSOL));
        assert!(is_valid_address(SYSTEM));
        assert!(is_valid_address(&format!("  {TOKEN}  ")));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("notanaddress"));
        // hex account strings are not base58
        assert!(!is_valid_address(
            "0x8ba1f109551bD432803012645Ac136ddd64DBA72"
        ));
        // 'O' is outside the base58 alphabet
        assert!(!is_valid_address(
            "SO11111111111111111111111111111111111111112"
        ));
        // truncated key
        assert!(!is_valid_address(&WSOL[..20]));
    }

    #[test]
    fn parse_trims_and_drops_empty_entries() {
        let roster = Roster::parse(&format!(" {WSOL} ,, {SYSTEM},  "));
        assert_eq!(roster.entered.len(), 2);
        assert_eq!(roster.unique.len(), 2);
        assert_eq!(roster.valid.len(), 2);
        assert_eq!(roster.dropped(), 0);
    }

    #[test]
    fn parse_dedups_by_first_occurrence() {
        let roster = Roster::parse(&format!("{WSOL},{SYSTEM},{WSOL},{TOKEN},{SYSTEM}"));
        assert_eq!(roster.entered.len(), 5);
        assert_eq!(roster.unique, vec![WSOL, SYSTEM, TOKEN]);
        assert_eq!(
            roster.valid,
            vec![
                Pubkey::from_str(WSOL).unwrap(),
                Pubkey::from_str(SYSTEM).unwrap(),
                Pubkey::from_str(TOKEN).unwrap(),
            ]
        );
    }

    #[test]
    fn case_variants_are_distinct_entries() {
        // String-level dedup keeps case variants apart; the uppercase
        // spelling then drops out in validation because 'O' is not a
        // base58 character.
        let upper = "SO11111111111111111111111111111111111111112";
        let roster = Roster::parse(&format!("{WSOL}, {upper}, notanaddress, {SYSTEM}"));
        assert_eq!(roster.entered.len(), 4);
        assert_eq!(roster.unique.len(), 4);
        assert_eq!(roster.valid.len(), 2);
        assert_eq!(roster.dropped(), 2);
    }

    #[test]
    fn preconditions_for_starting_a_race() {
        let one = Roster::parse(WSOL);
        assert!(!one.can_start(1));

        let two = Roster::parse(&format!("{WSOL},{SYSTEM}"));
        assert!(two.can_start(1));
        assert!(two.can_start(2));
        assert!(!two.can_start(0));
        assert!(!two.can_start(3));

        // invalid entries do not count toward the minimum
        let padded = Roster::parse(&format!("{WSOL},nope,also-nope"));
        assert!(!padded.can_start(1));
    }
}
