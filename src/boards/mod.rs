#[cfg(feature = "xiao-esp32c3")]
pub mod xiao_esp32c3;
