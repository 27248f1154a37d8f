pub mod entity;
pub mod invariants;

pub use entity::Member;
pub use invariants::validate_member;
