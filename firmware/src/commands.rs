//! Command table of the demo machine.
//!
//! | Line                | Effect                                  |
//! |---------------------|-----------------------------------------|
//! | `delay T<real>`     | pause line processing for `T` ms        |
//! | `versi V<int>`      | select the reply protocol version       |
//! | `move D<real> S<real>` | move by `D` at speed `S`             |
//! | `pump M<letter> V<real>` | set pump mode and volume           |

use defmt::{debug, info};
use linecmd_core::{Command, ParamSet, ParamSpec};

/// State the command callbacks act on.
#[derive(Debug, Clone, Copy, PartialEq, defmt::Format)]
pub struct Machine {
    pub position: f32,
    pub speed: f32,
    pub version: i32,
    pub pump_mode: char,
    pub pump_volume: f32,
    pending_delay_ms: Option<u64>,
}

impl Machine {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            position: 0.0,
            speed: 1.0,
            version: 1,
            pump_mode: 'S',
            pump_volume: 0.0,
            pending_delay_ms: None,
        }
    }

    /// Take the delay requested by the last `delay` line, if any.
    pub fn take_delay(&mut self) -> Option<u64> {
        self.pending_delay_ms.take()
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

fn on_delay(machine: &mut Machine, params: &ParamSet) {
    let Some(ms) = params.real('T') else {
        return;
    };
    if ms > 0.0 {
        debug!("delay {} ms", ms);
        machine.pending_delay_ms = Some(ms as u64);
    }
}

fn on_versi(machine: &mut Machine, params: &ParamSet) {
    if let Some(version) = params.integer('V') {
        machine.version = version;
        info!("protocol version {}", version);
    }
}

fn on_move(machine: &mut Machine, params: &ParamSet) {
    if let Some(speed) = params.real('S') {
        machine.speed = speed;
    }
    if let Some(distance) = params.real('D') {
        machine.position += distance;
    }
    debug!("position {} speed {}", machine.position, machine.speed);
}

fn on_pump(machine: &mut Machine, params: &ParamSet) {
    if let Some(mode) = params.letter('M') {
        machine.pump_mode = mode;
    }
    if let Some(volume) = params.real('V') {
        machine.pump_volume = volume;
    }
    debug!("pump mode {} volume {}", machine.pump_mode, machine.pump_volume);
}

const DELAY_PARAMS: &[ParamSpec] = &[ParamSpec::real('T')];
const VERSI_PARAMS: &[ParamSpec] = &[ParamSpec::integer('V')];
const MOVE_PARAMS: &[ParamSpec] = &[ParamSpec::real('D'), ParamSpec::real('S')];
const PUMP_PARAMS: &[ParamSpec] = &[ParamSpec::letter('M'), ParamSpec::real('V')];

/// Every command the firmware understands.
pub static COMMANDS: [Command<Machine>; 4] = [
    Command::new("delay", DELAY_PARAMS, on_delay),
    Command::new("versi", VERSI_PARAMS, on_versi),
    Command::new("move", MOVE_PARAMS, on_move),
    Command::new("pump", PUMP_PARAMS, on_pump),
];
