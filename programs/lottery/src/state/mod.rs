pub use lottery::*;
pub use round_record::*;
pub use vault::*;

pub mod lottery;
pub mod round_record;
pub mod vault;
