pub mod calculator;
pub mod noise;
