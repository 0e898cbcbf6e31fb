pub mod trading;
pub mod market;
pub mod candle;

pub use trading::*;
pub use market::*;
pub use candle::*;
