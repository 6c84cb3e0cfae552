use anchor_lang::prelude::*;

use crate::{
    error::RaceError,
    state::race::{Race, RaceState},
};

/// Instruction to close a finished race account and reclaim its rent
///
/// Only settled or cancelled races can be closed; the lamports go back to
/// the host that paid for the account.
pub fn close_race(_ctx: Context<CloseRace>) -> Result<()> {
    Ok(())
}

#[derive(Accounts)]
pub struct CloseRace<'info> {
    #[account(
        mut,
        close = host,
        has_one = host @ RaceError::NotRaceHost,
        constraint = (race.race_state == RaceState::Settled)
            || (race.race_state == RaceState::Cancelled) @ RaceError::RaceNotClosable,
    )]
    pub race: Account<'info, Race>,

    #[account(mut)]
    pub host: Signer<'info>,
}
