//! Remote data access: the e-Stat client and its response wire types.

pub mod estat;
pub mod response;

pub use estat::EstatClient;
pub use response::*;
