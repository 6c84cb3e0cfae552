use anchor_lang::prelude::*;
use instructions::*;

pub mod error;
pub mod instructions;
pub mod race_sim;
pub mod rng;
pub mod roster;
pub mod state;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod raffle_race_program {
    use super::*;

    pub fn init_config(ctx: Context<InitConfig>) -> Result<()> {
        instructions::init_config::init_config(ctx)
    }

    pub fn create_race(
        ctx: Context<CreateRace>,
        entrants: Vec<Pubkey>,
        winner_count: u8,
        prize_amount: u64,
    ) -> Result<()> {
        instructions::create_race::create_race(ctx, entrants, winner_count, prize_amount)
    }

    pub fn run_race(ctx: Context<RunRace>) -> Result<()> {
        instructions::run_race::run_race(ctx)
    }

    pub fn transfer_prize(ctx: Context<TransferPrize>, winner_index: u8) -> Result<()> {
        instructions::transfer_prize::transfer_prize(ctx, winner_index)
    }

    pub fn cancel_race(ctx: Context<CancelRace>) -> Result<()> {
        instructions::cancel_race::cancel_race(ctx)
    }

    pub fn close_race(ctx: Context<CloseRace>) -> Result<()> {
        instructions::close_race::close_race(ctx)
    }
}
