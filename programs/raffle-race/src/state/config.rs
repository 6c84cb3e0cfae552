use anchor_lang::prelude::*;

// 8 discriminator + 32 upgrade_authority + 8 race_counter + 1 bump
pub const CONFIG_ACCOUNT_SIZE: usize = 8 + 32 + 8 + 1;

#[account]
pub struct Config {
    pub upgrade_authority: Pubkey,
    pub race_counter: u64,
    pub bump: u8,
}
