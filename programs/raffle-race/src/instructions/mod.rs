pub use cancel_race::*;
pub use close_race::*;
pub use create_race::*;
pub use init_config::*;
pub use run_race::*;
pub use transfer_prize::*;

pub mod cancel_race;
pub mod close_race;
pub mod create_race;
pub mod init_config;
pub mod run_race;
pub mod transfer_prize;
