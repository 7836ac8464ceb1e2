pub mod amount;
pub mod receipt;

pub use amount::{Amount, AmountError, MinorAmount, RawAmount};
pub use receipt::Receipt;
