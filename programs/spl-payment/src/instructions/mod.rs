pub mod initialize;
pub mod update_owner;
pub mod deposit;
pub mod withdraw;

pub use initialize::*;
pub use update_owner::*;
pub use deposit::*;
pub use withdraw::*;
