// ─────────────────────────────────────────────────────────────────────
// SatPower Core — Panel Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Body-mounted and deployed panel geometry for CubeSat buses.
//!
//! Body frame convention (nadir-pointing attitude): +Z toward Earth,
//! +X along the velocity vector, +Y = Z x X completing the right-handed
//! triad.

use satpower_math::vec3::{cross, dot, norm, scale, unit, Vec3};
use satpower_types::error::{PowerError, PowerResult};

use crate::cell::SolarCell;

/// CubeSat bus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFactor {
    OneU,
    ThreeU,
    SixU,
}

impl FormFactor {
    pub fn label(&self) -> &'static str {
        match self {
            FormFactor::OneU => "1U",
            FormFactor::ThreeU => "3U",
            FormFactor::SixU => "6U",
        }
    }

    /// Largest face area (m^2), used for automatic wing sizing.
    pub fn long_face_area_m2(&self) -> f64 {
        match self {
            FormFactor::OneU => 0.01,
            FormFactor::ThreeU => 0.03,
            FormFactor::SixU => 0.06,
        }
    }
}

/// One of the six body faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    PlusX,
    MinusX,
    PlusY,
    MinusY,
    PlusZ,
    MinusZ,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PlusX,
        Face::MinusX,
        Face::PlusY,
        Face::MinusY,
        Face::PlusZ,
        Face::MinusZ,
    ];

    pub fn normal(&self) -> Vec3 {
        match self {
            Face::PlusX => [1.0, 0.0, 0.0],
            Face::MinusX => [-1.0, 0.0, 0.0],
            Face::PlusY => [0.0, 1.0, 0.0],
            Face::MinusY => [0.0, -1.0, 0.0],
            Face::PlusZ => [0.0, 0.0, 1.0],
            Face::MinusZ => [0.0, 0.0, -1.0],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Face::PlusX => "+X",
            Face::MinusX => "-X",
            Face::PlusY => "+Y",
            Face::MinusY => "-Y",
            Face::PlusZ => "+Z",
            Face::MinusZ => "-Z",
        }
    }

    /// Face area (m^2) for the given bus size.
    pub fn area_m2(&self, form: FormFactor) -> f64 {
        match (form, self) {
            (FormFactor::OneU, _) => 0.01,
            (FormFactor::ThreeU, Face::PlusZ | Face::MinusZ) => 0.01,
            (FormFactor::ThreeU, _) => 0.03,
            (FormFactor::SixU, Face::PlusY | Face::MinusY) => 0.06,
            (FormFactor::SixU, Face::PlusZ | Face::MinusZ) => 0.02,
            (FormFactor::SixU, _) => 0.02,
        }
    }
}

/// A panel of solar cells with a fixed body-frame orientation.
#[derive(Debug, Clone)]
pub struct SolarPanel {
    area_m2: f64,
    cell: SolarCell,
    normal: Vec3,
    name: String,
}

impl SolarPanel {
    pub fn new(
        area_m2: f64,
        cell: SolarCell,
        normal: Vec3,
        name: impl Into<String>,
    ) -> PowerResult<Self> {
        if !area_m2.is_finite() || area_m2 <= 0.0 {
            return Err(PowerError::InvalidConfig(format!(
                "panel area must be > 0, got {area_m2}"
            )));
        }
        if norm(&normal) == 0.0 {
            return Err(PowerError::InvalidConfig(
                "panel normal must be non-zero".to_string(),
            ));
        }
        Ok(SolarPanel {
            area_m2,
            cell,
            normal: unit(&normal),
            name: name.into(),
        })
    }

    /// Body-mounted panels for a CubeSat bus, one per non-excluded face.
    pub fn cubesat_body(
        form: FormFactor,
        cell: &SolarCell,
        exclude_faces: &[Face],
    ) -> PowerResult<Vec<SolarPanel>> {
        let mut panels = Vec::with_capacity(6);
        for face in Face::ALL {
            if exclude_faces.contains(&face) {
                continue;
            }
            panels.push(SolarPanel::new(
                face.area_m2(form),
                cell.clone(),
                face.normal(),
                format!("{}_{}", form.label(), face.label()),
            )?);
        }
        if panels.is_empty() {
            return Err(PowerError::InvalidConfig(
                "all body faces excluded, no panels remain".to_string(),
            ));
        }
        Ok(panels)
    }

    /// Body panels plus deployed wings.
    ///
    /// Two wings face +-Y; four face +-X and +-Y. `wing_area_m2 = None`
    /// sizes each wing at twice the long-face area.
    pub fn cubesat_with_wings(
        form: FormFactor,
        cell: &SolarCell,
        wing_count: usize,
        wing_area_m2: Option<f64>,
        exclude_faces: &[Face],
    ) -> PowerResult<Vec<SolarPanel>> {
        let wing_faces: &[Face] = match wing_count {
            2 => &[Face::PlusY, Face::MinusY],
            4 => &[Face::PlusX, Face::MinusX, Face::PlusY, Face::MinusY],
            n => {
                return Err(PowerError::InvalidConfig(format!(
                    "wing count must be 2 or 4, got {n}"
                )))
            }
        };
        let wing_area = wing_area_m2.unwrap_or(2.0 * form.long_face_area_m2());

        let mut panels = SolarPanel::cubesat_body(form, cell, exclude_faces)?;
        for (i, face) in wing_faces.iter().enumerate() {
            panels.push(SolarPanel::new(
                wing_area,
                cell.clone(),
                face.normal(),
                format!("{}_wing{}_{}", form.label(), i + 1, face.label()),
            )?);
        }
        Ok(panels)
    }

    /// A free-standing deployed panel.
    pub fn deployed(
        area_m2: f64,
        cell: &SolarCell,
        normal: Vec3,
        name: impl Into<String>,
    ) -> PowerResult<SolarPanel> {
        SolarPanel::new(area_m2, cell.clone(), normal, name)
    }

    pub fn area_m2(&self) -> f64 {
        self.area_m2
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cell(&self) -> &SolarCell {
        &self.cell
    }

    /// Whole cells that fit on the substrate.
    pub fn n_cells(&self) -> usize {
        (self.area_m2 * self.cell.packing_factor() / self.cell.area_m2()).floor() as usize
    }

    /// Panel output power (W).
    ///
    /// `sun_direction` is the unit vector toward the sun in the body frame;
    /// irradiance in W/m^2 at the spacecraft. A panel facing away from the
    /// sun produces nothing.
    pub fn power(
        &self,
        sun_direction: &Vec3,
        irradiance: f64,
        temperature_k: f64,
        mppt_efficiency: f64,
    ) -> f64 {
        let cos_incidence = dot(sun_direction, &self.normal);
        if cos_incidence <= 0.0 || irradiance <= 0.0 {
            return 0.0;
        }
        let effective_irradiance = irradiance * cos_incidence;
        let per_cell = self.cell.power_at_mpp(effective_irradiance, temperature_k);
        (self.n_cells() as f64 * per_cell * mppt_efficiency).max(0.0)
    }
}

/// Rotate an ECI direction into the nadir-pointing body frame.
///
/// +Z_body = -r_hat (toward Earth), +X_body = v_hat (ram),
/// +Y_body = Z_body x X_body.
pub fn eci_to_body(position: &Vec3, velocity: &Vec3, direction_eci: &Vec3) -> Vec3 {
    let z_body = scale(&unit(position), -1.0);
    let x_body = unit(velocity);
    let y_body = cross(&z_body, &x_body);
    [
        dot(direction_eci, &x_body),
        dot(direction_eci, &y_body),
        dot(direction_eci, &z_body),
    ]
}
