// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Error
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PowerError {
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("Integration failed at t={t_last} s: {message}")]
    Integration {
        /// Last time at which the state was still valid (s).
        t_last: f64,
        /// State vector at `t_last`.
        state: Vec<f64>,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PowerResult<T> = Result<T, PowerError>;
