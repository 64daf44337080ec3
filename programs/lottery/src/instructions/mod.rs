pub mod cancel_draw;
pub mod enter_lottery;
pub mod fulfill_random_words;
pub mod initialize_config;
pub mod perform_upkeep;
pub mod retry_payout;
pub mod views;

pub use cancel_draw::*;
pub use enter_lottery::*;
pub use fulfill_random_words::*;
pub use initialize_config::*;
pub use perform_upkeep::*;
pub use retry_payout::*;
pub use views::*;
