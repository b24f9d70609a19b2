pub mod synthetic_towers;
