pub mod percent;
pub mod safe_math;
pub mod wad;
pub mod wide;
