pub mod candlestick;
pub mod price_line;

pub use candlestick::CandlestickChart;
