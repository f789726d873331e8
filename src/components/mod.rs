pub mod alarm;
pub mod button;
pub mod ldr;
pub mod led;
