pub mod caption;
pub mod vote;
