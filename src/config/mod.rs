mod rates;
mod users;

pub use rates::{FeeSchedule, PriceTable};
pub use users::UserDirectory;
