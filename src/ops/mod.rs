pub mod tick;
pub mod time_funcs;
