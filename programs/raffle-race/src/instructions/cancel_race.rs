use anchor_lang::prelude::*;

use crate::{
    error::RaceError,
    state::race::{Race, RaceState},
};

/// Event emitted when a race is cancelled
#[event]
pub struct RaceCancelled {
    /// The pubkey of the cancelled race
    pub race: Pubkey,
    /// The timestamp when the race was cancelled
    pub cancelled_at: i64,
}

/// Instruction to cancel a race before any prize has been transferred
///
/// # Implementation Notes
/// - Allowed from Open or Drawn state; once a transfer has settled the
///   race can only move forward to Settled
/// - Clears the winner set and stored seed
/// - No funds are transferred: the program never held the prize, and the
///   host can revoke the delegate approval at their leisure
pub fn cancel_race(ctx: Context<CancelRace>) -> Result<()> {
    let race = &mut ctx.accounts.race;

    require!(
        race.race_state == RaceState::Open || race.race_state == RaceState::Drawn,
        RaceError::RaceNotCancellable
    );
    require!(
        race.transferred.iter().all(|done| !*done),
        RaceError::RaceNotCancellable
    );

    race.winners = Vec::new();
    race.transferred = Vec::new();
    race.seed = None;
    race.race_state = RaceState::Cancelled;

    let clock = Clock::get()?;
    emit!(RaceCancelled {
        race: race.key(),
        cancelled_at: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct CancelRace<'info> {
    #[account(
        mut,
        has_one = host @ RaceError::NotRaceHost,
    )]
    pub race: Account<'info, Race>,

    pub host: Signer<'info>,
}
