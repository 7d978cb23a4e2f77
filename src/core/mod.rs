// Core helpers shared by the engine and stage modules

pub mod math;
