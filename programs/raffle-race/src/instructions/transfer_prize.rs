use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::{
    error::RaceError,
    state::race::{Race, RaceState},
};

/// Event emitted when a prize transfer to a winner settles
#[event]
pub struct PrizeTransferred {
    /// The pubkey of the race
    pub race: Pubkey,
    /// The winner that received the prize
    pub winner: Pubkey,
    /// The prize mint
    pub prize_mint: Pubkey,
    /// Units transferred
    pub amount: u64,
}

/// Event emitted when the last outstanding prize settles
#[event]
pub struct RaceSettled {
    /// The pubkey of the settled race
    pub race: Pubkey,
}

/// Sends the prize to one drawn winner.
///
/// The program holds no custody: the prize stays in the host's own token
/// account and the host grants the race PDA a token delegate approval
/// covering the full prize (issued directly to the token program, the
/// same way an operator approval is granted on other chains). This
/// instruction then transfers `prize_amount` units to the winner's
/// associated token account with the race PDA signing as delegate; the
/// dispatch is identical for one-of-one and edition prizes.
///
/// # Security Considerations
/// 1. Only the host can trigger transfers, and only on a Drawn race
/// 2. The destination owner must match the recorded winner for the index
/// 3. A winner is paid at most once; the transfer flag is set only after
///    the CPI succeeded, and a failed CPI aborts the whole transaction,
///    so a failed transfer can simply be re-attempted
/// 4. The token program rejects the transfer when the delegate approval
///    is missing or too small; that error is surfaced unchanged
pub fn transfer_prize(ctx: Context<TransferPrize>, winner_index: u8) -> Result<()> {
    let index = winner_index as usize;
    {
        let race = &ctx.accounts.race;
        require!(index < race.winners.len(), RaceError::InvalidWinnerIndex);
        require!(
            !race.transferred[index],
            RaceError::PrizeAlreadyTransferred
        );
        require!(
            race.winners[index] == ctx.accounts.winner.key(),
            RaceError::WinnerMismatch
        );
    }

    // Transfer with the race PDA as the approved delegate
    let id_bytes = ctx.accounts.race.id.to_le_bytes();
    let bump = [ctx.accounts.race.bump];
    let seeds: &[&[u8]] = &[b"race", id_bytes.as_ref(), bump.as_ref()];
    let signer_seeds: &[&[&[u8]]] = &[seeds];

    transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.prize_source.to_account_info(),
                mint: ctx.accounts.prize_mint.to_account_info(),
                to: ctx.accounts.winner_token_account.to_account_info(),
                authority: ctx.accounts.race.to_account_info(),
            },
            signer_seeds,
        ),
        ctx.accounts.race.prize_amount,
        ctx.accounts.prize_mint.decimals,
    )?;

    // Mark the winner as paid, and settle the race once everyone is
    let race = &mut ctx.accounts.race;
    race.transferred[index] = true;

    emit!(PrizeTransferred {
        race: race.key(),
        winner: race.winners[index],
        prize_mint: race.prize_mint,
        amount: race.prize_amount,
    });

    if race.all_settled() {
        race.race_state = RaceState::Settled;
        emit!(RaceSettled { race: race.key() });
    }

    Ok(())
}

/// Accounts required for the transfer_prize instruction
#[derive(Accounts)]
pub struct TransferPrize<'info> {
    /// The race being settled. Must be Drawn; only the host pays out
    #[account(
        mut,
        has_one = host @ RaceError::NotRaceHost,
        has_one = prize_mint @ RaceError::PrizeMintMismatch,
        constraint = race.race_state == RaceState::Drawn @ RaceError::RaceNotDrawn,
    )]
    pub race: Account<'info, Race>,

    #[account(mut)]
    pub host: Signer<'info>,

    pub prize_mint: InterfaceAccount<'info, Mint>,

    /// The host-owned account the prize leaves from. The race PDA must
    /// hold a delegate approval on it covering the transfer
    #[account(
        mut,
        constraint = prize_source.owner == race.host @ RaceError::OwnerMismatch,
        constraint = prize_source.mint == race.prize_mint @ RaceError::PrizeMintMismatch,
    )]
    pub prize_source: InterfaceAccount<'info, TokenAccount>,

    /// The drawn winner receiving the prize
    /// CHECK: validated in the handler against the winner list recorded
    /// on the race account
    pub winner: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = host,
        associated_token::mint = prize_mint,
        associated_token::authority = winner,
        associated_token::token_program = token_program,
    )]
    pub winner_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}
