#[cfg(feature = "deepseek")]
pub mod deepseek;

#[cfg(feature = "openai")]
pub mod openai;
