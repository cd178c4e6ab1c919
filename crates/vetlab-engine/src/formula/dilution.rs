use serde::Serialize;

/// Upper bound on serial dilution steps accepted by the orchestrator.
pub const MAX_SERIAL_STEPS: u32 = 1000;

/// Final concentration from C1·V1 = C2·V2. `v2` must be non-zero.
pub fn dilution_c2(c1: f64, v1: f64, v2: f64) -> f64 {
    c1 * v1 / v2
}

/// Final volume from C1·V1 = C2·V2. `c2` must be non-zero.
pub fn dilution_v2(c1: f64, v1: f64, c2: f64) -> f64 {
    c1 * v1 / c2
}

/// One point of a serial dilution series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SerialPoint {
    pub step: u32,
    pub concentration: f64,
}

/// Geometric dilution series: `steps + 1` points starting at `init`, each
/// following point divided by `factor`.
pub fn serial_dilution(init: f64, factor: f64, steps: u32) -> Vec<SerialPoint> {
    let mut points = Vec::with_capacity(steps as usize + 1);
    let mut concentration = init;
    for step in 0..=steps {
        points.push(SerialPoint {
            step,
            concentration,
        });
        concentration /= factor;
    }
    points
}
