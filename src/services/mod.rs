pub mod insight;
pub mod locations;
