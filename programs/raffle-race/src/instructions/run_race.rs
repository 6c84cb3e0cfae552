use std::str::FromStr;

use anchor_lang::prelude::*;
use arrayref::array_ref;

use crate::{
    error::RaceError,
    rng::{mix, select_winners},
    state::race::{Race, RaceState},
};

/// Event emitted when a race has been run and winners drawn
#[event]
pub struct WinnersDrawn {
    /// The pubkey of the race
    pub race: Pubkey,
    /// The seed the draw (and any replay of it) derives from
    pub seed: u64,
    /// The drawn winners, in finishing order
    pub winners: Vec<Pubkey>,
}

/// Runs a race: draws the configured number of winners from the entrant
/// list using on-chain randomness from block hashes.
///
/// Execution requirements:
/// 1. The race must be in Open state
/// 2. Only the race host can run it
///
/// The randomness is generated with these steps:
/// 1. Extract entropy from the SlotHashes sysvar
/// 2. Combine multiple entropy sources (block hash and current timestamp)
/// 3. Apply cryptographic mixing
/// 4. Shuffle the entrant list with an unbiased Fisher-Yates pass and
///    take the first `winner_count` entries
///
/// The seed is stored on the race account so any client can replay the
/// draw as a lane race ([`crate::race_sim`]) that finishes on the recorded
/// winner. The draw itself is uniform; the race replay is decorative.
///
/// After execution:
/// - The winner list, transfer flags and seed are stored in the race account
/// - The race state is changed to Drawn
///
/// # Errors
/// - `RaceNotOpen` if the race is not in Open state
/// - `NotRaceHost` if the signer is not the race host
/// - `InvalidSlotHashesAccount` if the provided SlotHashes account is invalid
/// - `Overflow` if arithmetic overflow occurs during random number generation
pub fn run_race(ctx: Context<RunRace>) -> Result<()> {
    // Manually validate the recent_slothashes account
    let pubkey_matches = Pubkey::from_str("SysvarS1otHashes111111111111111111111111111")
        .or(Err(RaceError::InvalidSlotHashesAccount))?
        .eq(&ctx.accounts.recent_slothashes.key());
    require!(pubkey_matches, RaceError::InvalidSlotHashesAccount);

    let recent_slothashes = &ctx.accounts.recent_slothashes;
    let data = recent_slothashes.data.borrow();

    // Extract entropy from SlotHashes data
    let chunk1 = array_ref![data, 12, 8];
    let chunk2 = if data.len() >= 28 {
        // Get second 8-byte block if available
        array_ref![data, 20, 8]
    } else {
        // Otherwise use the first block again
        chunk1
    };

    let hash_value1 = u64::from_le_bytes(*chunk1);
    let hash_value2 = u64::from_le_bytes(*chunk2);
    let clock = Clock::get()?;
    let timestamp = clock.unix_timestamp as u64;

    // Combine entropy sources through cryptographic mixing
    let mut seed = mix(hash_value1, timestamp);
    seed = mix(seed, hash_value2);

    let race = &mut ctx.accounts.race;
    let winner_indices = select_winners(seed, race.entrants.len() as u32, race.winner_count as u32)?;
    let winners: Vec<Pubkey> = winner_indices
        .iter()
        .map(|&index| race.entrants[index as usize])
        .collect();

    // Store the draw and update state
    race.seed = Some(seed);
    race.winners = winners.clone();
    race.transferred = vec![false; winners.len()];
    race.race_state = RaceState::Drawn;

    emit!(WinnersDrawn {
        race: race.key(),
        seed,
        winners,
    });

    Ok(())
}

/// Accounts required for the run_race instruction
#[derive(Accounts)]
pub struct RunRace<'info> {
    /// The race to run. Must be in Open state; only the host may run it
    #[account(
        mut,
        has_one = host @ RaceError::NotRaceHost,
        constraint = race.race_state == RaceState::Open @ RaceError::RaceNotOpen,
    )]
    pub race: Account<'info, Race>,

    pub host: Signer<'info>,

    /// The SlotHashes sysvar contains the most recent block hashes
    /// This is used as a source of randomness
    /// CHECK: Using UncheckedAccount because we manually validate the correct sysvar.
    /// This is needed because Anchor will always throw an error on the SlotHashes sysvar.
    pub recent_slothashes: UncheckedAccount<'info>,
}
