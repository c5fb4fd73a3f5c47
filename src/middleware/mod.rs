mod partner;

pub use partner::Partner;
