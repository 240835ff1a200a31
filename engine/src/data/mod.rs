// Simulated market data: the fake-candle generator and its capped buffer.
pub mod candle_feed;

pub use candle_feed::{CandleBuffer, CandleGenerator};
