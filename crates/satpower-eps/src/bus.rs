// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Power Bus
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Bus power balance: solves for the battery current closing the gap
//! between conditioned solar input and the load demand. Converter loss
//! applies on whichever path the net power takes.

use satpower_types::config::{ConverterConfig, EpsBoardParams};
use satpower_types::error::PowerResult;

use crate::converter::Converter;

#[derive(Debug, Clone, Copy)]
pub struct PowerBus {
    bus_voltage_v: f64,
    converter: Converter,
}

impl Default for PowerBus {
    fn default() -> Self {
        PowerBus {
            bus_voltage_v: 3.3,
            converter: Converter::default(),
        }
    }
}

impl PowerBus {
    pub fn new(bus_voltage_v: f64, converter: Converter) -> Self {
        PowerBus {
            bus_voltage_v,
            converter,
        }
    }

    /// Build the bus from an EPS board record.
    pub fn from_board(board: &EpsBoardParams) -> PowerResult<Self> {
        board.validate()?;
        Ok(PowerBus {
            bus_voltage_v: board.bus_voltage_v,
            converter: Converter::new(ConverterConfig::Constant(board.converter_efficiency))?,
        })
    }

    pub fn bus_voltage(&self) -> f64 {
        self.bus_voltage_v
    }

    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    /// Battery current (A) balancing the bus; positive on discharge.
    ///
    /// Discharging: the battery must supply net/eta so the load sees its
    /// full demand through the converter. Charging: only net*eta of the
    /// solar surplus reaches the cells. Returns 0 for a non-positive
    /// battery voltage.
    pub fn net_battery_current(
        &self,
        solar_power_w: f64,
        load_power_w: f64,
        battery_voltage_v: f64,
    ) -> f64 {
        if battery_voltage_v <= 0.0 {
            return 0.0;
        }
        let eta = self.converter.efficiency_at(load_power_w);
        let net = load_power_w - solar_power_w * eta;
        let battery_power = if net > 0.0 { net / eta } else { net * eta };
        battery_power / battery_voltage_v
    }
}
