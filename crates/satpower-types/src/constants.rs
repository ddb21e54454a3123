// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Earth equatorial radius (m).
pub const R_EARTH: f64 = 6378137.0;

/// Earth gravitational parameter (m^3/s^2).
pub const MU_EARTH: f64 = 3.986004418e14;

/// Earth J2 oblateness coefficient.
pub const J2: f64 = 1.08263e-3;

/// Sun radius (m).
pub const R_SUN: f64 = 6.957e8;

/// Astronomical unit (m).
pub const AU: f64 = 1.495978707e11;

/// Stefan-Boltzmann constant (W/m^2/K^4).
pub const STEFAN_BOLTZMANN: f64 = 5.670374419e-8;

/// Solar constant at 1 AU (W/m^2).
pub const SOLAR_CONSTANT: f64 = 1361.0;

/// Obliquity of the ecliptic (deg).
pub const OBLIQUITY_DEG: f64 = 23.4392911;

/// Mean Earth albedo coefficient.
pub const EARTH_ALBEDO: f64 = 0.30;

/// Earth average IR emission at the surface (W/m^2).
pub const EARTH_IR_EMISSION: f64 = 237.0;

/// Universal gas constant (J/(mol·K)).
pub const R_GAS: f64 = 8.314;

/// Boltzmann constant (J/K).
pub const K_BOLTZMANN: f64 = 1.380649e-23;

/// Elementary charge (C).
pub const Q_ELECTRON: f64 = 1.602176634e-19;

/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Mean days per year (Julian).
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Reference temperature for battery and aging models (K).
pub const T_REF: f64 = 298.15;

/// Panel temperature used when the thermal model is disabled (K).
pub const DEFAULT_PANEL_TEMP: f64 = 301.15;

/// Battery temperature used when the thermal model is disabled (K).
pub const DEFAULT_BATTERY_TEMP: f64 = 298.15;

/// Default MPPT peak tracking efficiency.
pub const DEFAULT_MPPT_EFF: f64 = 0.97;

/// Default DC-DC converter efficiency.
pub const DEFAULT_CONVERTER_EFF: f64 = 0.92;

/// Default maximum integration step (s).
pub const DEFAULT_DT_MAX: f64 = 30.0;

/// Default epoch day of year (vernal equinox).
pub const DEFAULT_EPOCH_DOY: f64 = 80.0;
