use anchor_lang::error_code;

#[error_code]
pub enum RaceError {
    Overflow,
    NotEnoughEntrants,
    TooManyEntrants,
    DuplicateEntrant,
    InvalidWinnerCount,
    InvalidPrizeAmount,
    OwnerMismatch,
    PrizeMintMismatch,
    #[msg("Only the race host can perform this action")]
    NotRaceHost,
    #[msg("Prize mint must have zero decimals")]
    PrizeNotNonFungible,
    #[msg("A one-of-one prize can only be raced for a single winner")]
    UniquePrizeSingleWinner,
    #[msg("Host token account does not hold enough of the prize")]
    InsufficientPrizeBalance,
    #[msg("Race is not in Open state")]
    RaceNotOpen,
    #[msg("Race has not been run yet")]
    RaceNotDrawn,
    #[msg("Winner index is out of range")]
    InvalidWinnerIndex,
    #[msg("This winner has already received the prize")]
    PrizeAlreadyTransferred,
    #[msg("Destination does not match the recorded winner")]
    WinnerMismatch,
    #[msg("Invalid SlotHashes account provided")]
    InvalidSlotHashesAccount,
    #[msg("A race can only be cancelled before any prize transfer settles")]
    RaceNotCancellable,
    #[msg("Only settled or cancelled races can be closed")]
    RaceNotClosable,
}
