//! Time constants for the simulation loop

/// Tick rate configuration
pub const SIMULATION_TPS: u32 = 60; // one tick per rendered frame
pub const TICK_DURATION_MICROS: u64 = 1_000_000 / SIMULATION_TPS as u64;

/// Fixed delta time per tick (in milliseconds)
pub fn tick_delta_ms() -> f32 {
    1000.0 / SIMULATION_TPS as f32
}
