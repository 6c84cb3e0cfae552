use anchor_lang::prelude::*;

/// Hard cap on the entrant list. Bounds the account size and keeps the
/// on-chain shuffle cheap.
pub const MAX_ENTRANTS: usize = 64;

// Space calculation:
// 8 (discriminator) +
// 8 (id) +
// 32 (host) +
// 4 + 64 * 32 (entrants) +
// 1 (winner_count) +
// 32 (prize_mint) +
// 8 (prize_amount) +
// 1 (prize_kind) +
// 1 (race_state) +
// 4 + 64 * 32 (winners) +
// 4 + 64 (transferred) +
// 9 (seed: Option<u64>) +
// 8 (created_at) +
// 1 (bump) =
// 4281 total bytes
pub const RACE_ACCOUNT_SIZE: usize = 8
    + 8
    + 32
    + (4 + MAX_ENTRANTS * 32)
    + 1
    + 32
    + 8
    + 1
    + 1
    + (4 + MAX_ENTRANTS * 32)
    + (4 + MAX_ENTRANTS)
    + 9
    + 8
    + 1;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq)]
pub enum RaceState {
    Open = 0,
    Drawn = 1,
    Settled = 2,
    Cancelled = 3,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq)]
pub enum PrizeKind {
    /// One-of-one token: zero decimals, supply of exactly one.
    Unique = 0,
    /// Multi-copy token: zero decimals, supply greater than one.
    Edition = 1,
}

#[account]
pub struct Race {
    pub id: u64,
    pub host: Pubkey,
    pub entrants: Vec<Pubkey>,
    pub winner_count: u8,
    pub prize_mint: Pubkey,
    pub prize_amount: u64,
    pub prize_kind: PrizeKind,
    pub race_state: RaceState,
    pub winners: Vec<Pubkey>,
    pub transferred: Vec<bool>,
    pub seed: Option<u64>,
    pub created_at: i64,
    pub bump: u8,
}

impl Race {
    /// True once every drawn winner has received their prize.
    pub fn all_settled(&self) -> bool {
        !self.transferred.is_empty() && self.transferred.iter().all(|done| *done)
    }
}
