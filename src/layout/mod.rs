pub mod blocks;
pub mod ring;
