mod currency;
mod errors;

pub use currency::Currency;

pub type UserId = String;
