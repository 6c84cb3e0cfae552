use crate::{
    error::RaceError,
    state::{
        race::{PrizeKind, Race, RaceState},
        Config, MAX_ENTRANTS, RACE_ACCOUNT_SIZE,
    },
};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount};

// Constants for validation
const MIN_ENTRANTS: usize = 2;

/// Event emitted when a race is created
#[event]
pub struct RaceCreated {
    /// The pubkey of the created race
    pub race: Pubkey,
    /// The race host
    pub host: Pubkey,
    /// Number of entrants on the start line
    pub entrant_count: u8,
    /// Number of winners to draw
    pub winner_count: u8,
    /// The prize mint
    pub prize_mint: Pubkey,
    /// Units of the prize each winner receives
    pub prize_amount: u64,
    /// When the race was created
    pub created_at: i64,
}

/// Instruction to create a new race over a list of candidate winners
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `entrants` - Ordered list of candidate winner addresses (2 to 64, unique)
/// * `winner_count` - Number of winners to draw (1 to entrants.len())
/// * `prize_amount` - Units of the prize mint each winner receives
///
/// # Security Considerations
/// The instruction performs several critical checks:
/// 1. Validates the entrant list length is within 2..=64
/// 2. Rejects duplicate entrants; ordering is preserved as supplied
/// 3. Ensures winner_count is between 1 and the entrant count
/// 4. Classifies the prize from its mint: zero decimals and supply 1 is a
///    one-of-one, zero decimals and larger supply is an edition run
/// 5. A one-of-one prize forces winner_count == 1 and prize_amount == 1
/// 6. Requires the host's token balance to cover every winner's prize
///
/// # Account Validations
/// * Race - New account initialized with proper space allocation
/// * Host - Signer, pays for the race account
/// * Prize Source - Host-owned token account of the prize mint
/// * Config - PDA storing the race counter used as the race PDA seed
///
/// # Implementation Notes
/// - The program takes no custody: after creation the host grants the race
///   PDA a token delegate approval on the prize source, which is what the
///   prize transfer later spends
/// - Initializes the race in Open state with an empty winner set
pub fn create_race(
    ctx: Context<CreateRace>,
    entrants: Vec<Pubkey>,
    winner_count: u8,
    prize_amount: u64,
) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;

    // Entrant list checks
    require!(entrants.len() >= MIN_ENTRANTS, RaceError::NotEnoughEntrants);
    require!(entrants.len() <= MAX_ENTRANTS, RaceError::TooManyEntrants);
    require!(
        !has_duplicate_entrants(&entrants),
        RaceError::DuplicateEntrant
    );

    // Winner count checks
    require!(
        winner_count >= 1 && (winner_count as usize) <= entrants.len(),
        RaceError::InvalidWinnerCount
    );

    require!(prize_amount > 0, RaceError::InvalidPrizeAmount);

    // Classify the prize from its mint
    let mint = &ctx.accounts.prize_mint;
    require!(mint.decimals == 0, RaceError::PrizeNotNonFungible);
    let prize_kind = if mint.supply == 1 {
        PrizeKind::Unique
    } else {
        PrizeKind::Edition
    };

    if prize_kind == PrizeKind::Unique {
        require!(winner_count == 1, RaceError::UniquePrizeSingleWinner);
        require!(prize_amount == 1, RaceError::InvalidPrizeAmount);
    }

    // The host must hold enough of the prize to pay every winner
    let total_prize = prize_amount
        .checked_mul(winner_count as u64)
        .ok_or(RaceError::Overflow)?;
    require!(
        ctx.accounts.prize_source.amount >= total_prize,
        RaceError::InsufficientPrizeBalance
    );

    // Set inputs from transaction data
    let race = &mut ctx.accounts.race;
    race.id = ctx.accounts.config.race_counter;
    race.host = ctx.accounts.host.key();
    race.entrants = entrants;
    race.winner_count = winner_count;
    race.prize_mint = ctx.accounts.prize_mint.key();
    race.prize_amount = prize_amount;
    race.prize_kind = prize_kind;

    // Set default values
    race.race_state = RaceState::Open;
    race.winners = Vec::new();
    race.transferred = Vec::new();
    race.seed = None;
    race.created_at = current_time;
    race.bump = ctx.bumps.race;

    // Increment the race counter
    ctx.accounts.config.race_counter = ctx
        .accounts
        .config
        .race_counter
        .checked_add(1)
        .ok_or(RaceError::Overflow)?;

    // Emit the race created event
    emit!(RaceCreated {
        race: ctx.accounts.race.key(),
        host: ctx.accounts.host.key(),
        entrant_count: ctx.accounts.race.entrants.len() as u8,
        winner_count,
        prize_mint: ctx.accounts.race.prize_mint,
        prize_amount,
        created_at: current_time,
    });

    Ok(())
}

/// Pairwise duplicate scan; the list is capped at MAX_ENTRANTS so the
/// quadratic walk stays cheap.
fn has_duplicate_entrants(list: &[Pubkey]) -> bool {
    for i in 0..list.len() {
        for j in (i + 1)..list.len() {
            if list[i] == list[j] {
                return true;
            }
        }
    }
    false
}

#[derive(Accounts)]
pub struct CreateRace<'info> {
    #[account(
        init,
        payer = host,
        space = RACE_ACCOUNT_SIZE,
        seeds = [
            b"race",
            config.race_counter.to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub race: Account<'info, Race>,

    #[account(mut)]
    pub host: Signer<'info>,

    /// The mint of the prize token
    pub prize_mint: InterfaceAccount<'info, Mint>,

    /// The host-owned token account holding the prize
    #[account(
        constraint = prize_source.owner == host.key() @ RaceError::OwnerMismatch,
        constraint = prize_source.mint == prize_mint.key() @ RaceError::PrizeMintMismatch,
    )]
    pub prize_source: InterfaceAccount<'info, TokenAccount>,

    /// The config account storing the race counter
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    pub system_program: Program<'info, System>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_duplicates_anywhere_in_the_list() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let c = Pubkey::new_unique();
        assert!(!has_duplicate_entrants(&[a, b, c]));
        assert!(has_duplicate_entrants(&[a, b, a]));
        assert!(has_duplicate_entrants(&[a, a]));
        assert!(!has_duplicate_entrants(&[]));
    }
}
