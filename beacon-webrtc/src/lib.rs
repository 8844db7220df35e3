mod rtc_engine;

pub use rtc_engine::*;
