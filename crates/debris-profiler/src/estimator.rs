//! Physical property estimation
//!
//! Mass, material and decay time are not in the tracking catalog. They are
//! inferred from the object category and the B* drag term:
//!
//! - mass: sampled from the category range, divided by
//!   `1 + min(|B*|·mass_scale, mass_factor_cap)` for positive B*
//!   (higher area-to-mass ratio ⇒ lighter object)
//! - material: category prior
//! - decay time: `altitude/100 · years_per_100_km`, divided by
//!   `1 + |B*|·decay_scale` for positive B*, clamped to the configured band
//!
//! All three are proxies. Callers must surface them as estimates.

use crate::config::{DecayModel, DragModel, EngineConfig, MassPriors};
use crate::deriver::sample_uniform;
use crate::{Category, Estimate, EstimationMethod, Material};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Estimated physical properties of one object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalEstimate {
    pub mass_kg: Estimate<f64>,
    pub material: Estimate<Material>,
    pub decay_time_years: Estimate<f64>,
}

#[derive(Debug, Clone)]
pub struct PhysicalPropertyEstimator {
    mass: MassPriors,
    drag: DragModel,
    decay: DecayModel,
}

/// Positive drag terms only; zero, negative or absent B* means no adjustment
fn positive_drag(bstar: Option<f64>) -> Option<f64> {
    bstar.filter(|b| *b > 0.0)
}

impl PhysicalPropertyEstimator {
    pub fn new(mass: MassPriors, drag: DragModel, decay: DecayModel) -> Self {
        Self { mass, drag, decay }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.mass.clone(),
            config.drag.clone(),
            config.decay.clone(),
        )
    }

    pub fn estimate_mass<R: Rng>(
        &self,
        category: Category,
        bstar: Option<f64>,
        rng: &mut R,
    ) -> Estimate<f64> {
        let range = self.mass.range_for(category);
        let mut mass = sample_uniform(rng, range.min_kg, range.max_kg);

        let method = match positive_drag(bstar) {
            Some(b) => {
                let factor = (b.abs() * self.drag.mass_scale).min(self.drag.mass_factor_cap);
                mass /= 1.0 + factor;
                EstimationMethod::CategoryRangeDragAdjusted
            }
            None => EstimationMethod::CategoryRange,
        };

        Estimate::estimated(mass.round().max(1.0), method)
    }

    pub fn estimate_material<R: Rng>(&self, category: Category, rng: &mut R) -> Estimate<Material> {
        let material = match category {
            Category::Debris => Material::ALL[rng.gen_range(0..Material::ALL.len())],
            Category::SpaceStations => Material::Composite,
            Category::Communications | Category::Navigation => {
                if rng.gen_bool(0.5) {
                    Material::Aluminum
                } else {
                    Material::Composite
                }
            }
            Category::Scientific | Category::Misc => Material::Aluminum,
        };
        Estimate::estimated(material, EstimationMethod::CategoryPrior)
    }

    /// Years until uncontrolled reentry
    pub fn estimate_decay_time(&self, altitude_km: f64, bstar: Option<f64>) -> Estimate<f64> {
        let mut years = altitude_km / 100.0 * self.decay.years_per_100_km;

        let method = match positive_drag(bstar) {
            Some(b) => {
                years /= 1.0 + b.abs() * self.drag.decay_scale;
                EstimationMethod::AltitudeDragAdjusted
            }
            None => EstimationMethod::AltitudeLinear,
        };

        let years = if years.is_finite() {
            years.clamp(self.decay.min_years, self.decay.max_years)
        } else {
            self.decay.max_years
        };
        Estimate::estimated(years, method)
    }

    pub fn estimate<R: Rng>(
        &self,
        category: Category,
        bstar: Option<f64>,
        altitude_km: f64,
        rng: &mut R,
    ) -> PhysicalEstimate {
        PhysicalEstimate {
            mass_kg: self.estimate_mass(category, bstar, rng),
            material: self.estimate_material(category, rng),
            decay_time_years: self.estimate_decay_time(altitude_km, bstar),
        }
    }
}
