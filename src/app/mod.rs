pub mod ports;
pub mod pick_use_case;
