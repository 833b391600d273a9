pub mod controller;
pub mod reducer;
pub mod states;
