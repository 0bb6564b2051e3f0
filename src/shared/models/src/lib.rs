pub mod bank;
pub mod block;
pub mod estimate;
pub mod gov;
pub mod validator;

pub use bank::{Coin, DenomInfo};
pub use block::BlockRef;
pub use estimate::Estimate;
pub use gov::Proposal;
pub use validator::ValidatorSummary;
