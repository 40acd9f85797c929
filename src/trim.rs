// trim.rs
// The cascade engine: advances one ion through successive binary collisions
// until it stops, exits the sample, or trips the step guard. Newly displaced
// recoils are appended to the caller's FIFO; the engine never removes or
// reorders existing queue entries and performs no I/O.
//
// Scattering uses the ZBL universal potential: a Newton solve for the reduced
// distance of closest approach feeds the MAGIC formula for the center-of-mass
// scattering angle, which is then transformed to lab-frame deflections for
// projectile and recoil. Electronic losses follow Lindhard-Scharff stopping
// accumulated along each free flight.

use std::collections::VecDeque;
use std::f32::consts::{PI, TAU};

use ultraviolet::Vec3;

use crate::config;
use crate::ion::{Ion, IonState};
use crate::material::Element;
use crate::sample::Sample;
use crate::simconf::Simconf;
use crate::units;

// ZBL universal screening function coefficients
const ZBL_C: [f64; 4] = [0.18175, 0.50986, 0.28022, 0.028171];
const ZBL_D: [f64; 4] = [3.1998, 0.94229, 0.4029, 0.20162];
// MAGIC formula fit constants for the ZBL potential (Biersack-Haggmark)
const MAGIC_C: [f64; 5] = [0.99229, 0.011615, 0.0071222, 9.3066, 14.813];

/// Lab-frame outcome of one binary collision.
#[derive(Clone, Copy, Debug, Default)]
pub struct Collision {
    /// Center-of-mass scattering angle.
    pub theta: f64,
    /// Lab-frame deflection of the projectile.
    pub psi: f64,
    /// Lab-frame emission angle of the recoil, measured from the
    /// projectile's incoming direction.
    pub psi_recoil: f64,
    /// Energy transferred to the struck atom, in eV.
    pub recoil_energy: f32,
}

fn screening(x: f64) -> f64 {
    ZBL_C
        .iter()
        .zip(ZBL_D)
        .map(|(c, d)| c * (-d * x).exp())
        .sum()
}

fn screening_derivative(x: f64) -> f64 {
    ZBL_C
        .iter()
        .zip(ZBL_D)
        .map(|(c, d)| -c * d * (-d * x).exp())
        .sum()
}

/// ZBL universal screening length in Å.
fn screening_length(z1: f64, z2: f64) -> f64 {
    0.8854 * units::BOHR_RADIUS / (z1.powf(0.23) + z2.powf(0.23))
}

/// Reduced distance of closest approach: the positive root of
/// f(x) = 1 - phi(x)/(x eps) - (b/x)². f is monotone increasing, so the
/// Newton iteration is well behaved; on failure to converge the last
/// iterate is used (a clamp, not an error).
fn closest_approach(eps: f64, b: f64) -> f64 {
    let f = |x: f64| 1.0 - screening(x) / (x * eps) - (b / x) * (b / x);
    let df = |x: f64| {
        (screening(x) - x * screening_derivative(x)) / (x * x * eps) + 2.0 * b * b / (x * x * x)
    };
    // start right of the root; f(large) > 0
    let mut x0 = (b + 1.0 / eps).max(0.1) + 1.0;
    for _ in 0..config::DOCA_MAX_ITERATIONS {
        let xn = x0 - f(x0) / df(x0);
        let xn = if xn > 0.0 { xn } else { x0 * 0.5 };
        let err = (xn - x0) * (xn - x0);
        x0 = xn;
        if err < config::DOCA_TOLERANCE {
            break;
        }
    }
    x0
}

/// Binary-collision kinematics for a projectile striking `element` at the
/// given impact parameter (Å). Elastic two-body scattering in the CM frame,
/// transformed back to the lab frame.
pub fn magic_collision(ion: &Ion, element: &Element, impact_parameter: f32) -> Collision {
    let e0 = ion.e as f64;
    if e0 <= 0.0 {
        return Collision::default();
    }
    let z1 = ion.z as f64;
    let z2 = element.z as f64;
    let ma = ion.m as f64;
    let mb = element.m as f64;

    let a = screening_length(z1, z2);
    // Lindhard reduced energy
    let eps = a * mb / (ma + mb) / (z1 * z2 * units::COULOMB_EV_A) * e0;
    let b = impact_parameter as f64 / a;

    let x0 = closest_approach(eps, b);
    if !x0.is_finite() || x0 <= 0.0 {
        return Collision::default();
    }

    // MAGIC approximation to the classical scattering integral
    let sqe = eps.sqrt();
    let v0 = z1 * z2 * units::COULOMB_EV_A / a;
    let e_cm = e0 * mb / (ma + mb);
    let r = a * x0;
    let v = v0 * screening(x0) / x0;
    let dv = -v / r + v0 / r * screening_derivative(x0);
    let rho = -2.0 * (e_cm - v) / dv;
    let d = 2.0 * (1.0 + MAGIC_C[0] / sqe)
        * eps
        * b.powf((MAGIC_C[1] + sqe) / (MAGIC_C[2] + sqe));
    let g = (MAGIC_C[4] + eps) / (MAGIC_C[3] + eps) * ((1.0 + d * d).sqrt() - d);
    let delta = d * g / (1.0 + g) * (x0 - b);
    let cos_half = ((b + rho / a + delta) / (x0 + rho / a)).clamp(-1.0, 1.0);
    let theta = 2.0 * cos_half.acos();
    if !theta.is_finite() {
        return Collision::default();
    }

    let sin_half = (theta / 2.0).sin();
    let gamma = 4.0 * ma * mb / ((ma + mb) * (ma + mb));
    let recoil_energy = (gamma * e0 * sin_half * sin_half) as f32;
    let psi = theta.sin().atan2(ma / mb + theta.cos()).abs();
    let psi_recoil = theta.sin().atan2(1.0 - theta.cos()).abs();

    Collision {
        theta,
        psi,
        psi_recoil,
        recoil_energy,
    }
}

/// Rotate `dir` away from itself by `angle` toward the transverse azimuth
/// `phi`. The result is near-unit; callers renormalize through `set_dir`.
fn deflect(dir: Vec3, angle: f32, azimuth: f32) -> Vec3 {
    let reference = if dir.z.abs() < 0.9 {
        Vec3::unit_z()
    } else {
        Vec3::unit_x()
    };
    let e1 = dir.cross(reference).normalized();
    let e2 = dir.cross(e1);
    dir * angle.cos() + (e1 * azimuth.cos() + e2 * azimuth.sin()) * angle.sin()
}

/// Follow one ion until it stops or exits, pushing displaced recoils onto
/// `recoils`. Returns the number of recoils spawned. The step guard maps
/// degenerate inputs to `Stopped`, never to a hang.
pub fn trim(
    simconf: &mut Simconf,
    sample: &dyn Sample,
    ion: &mut Ion,
    recoils: &mut VecDeque<Ion>,
) -> u32 {
    crate::profile_scope!("trim");
    let mut spawned = 0;
    let mut first_flight = true;

    for _ in 0..config::MAX_TRIM_STEPS {
        // material at the current position; vacuum ends the trajectory
        let Some(mat_index) = sample.lookup_material(ion.pos) else {
            ion.state = IonState::Exited;
            return spawned;
        };
        let Some(material) = sample.materials().get(mat_index) else {
            // lookup pointed past the material list; treat as vacuum
            ion.state = IonState::Exited;
            return spawned;
        };

        // free flight and impact parameter of the solid model
        let mfp = material.mean_free_path();
        let mut flight = mfp;
        if first_flight {
            // atomically rough surface: randomize the entry flight
            flight *= simconf.drand();
            first_flight = false;
        }
        let impact_parameter = mfp / PI.sqrt() * simconf.drand().sqrt();

        // never fly past the next tracked material boundary
        let range = sample.range_material(ion.pos, ion.dir);
        let crossing = range < flight;
        if crossing {
            flight = range + config::BOUNDARY_NUDGE;
        }

        let speed = ion.speed();
        ion.pos += ion.dir * flight;
        if speed > 0.0 {
            ion.t += flight / speed;
        }

        // electronic stopping along the segment, in the segment's material
        ion.e -= material.electronic_stopping(ion) * flight;
        if ion.e < 0.0 {
            ion.e = 0.0;
        }

        // the flight may have left the sample or changed material
        match sample.lookup_material(ion.pos) {
            None => {
                ion.state = IonState::Exited;
                return spawned;
            }
            Some(new_index) if new_index != mat_index => {
                if ion.e < ion.ef {
                    ion.state = IonState::Stopped;
                    return spawned;
                }
                continue;
            }
            Some(_) => {}
        }
        if ion.e < ion.ef {
            ion.state = IonState::Stopped;
            return spawned;
        }
        if crossing {
            // boundary-limited flight carries no collision
            continue;
        }

        // binary collision against a stoichiometry-weighted partner
        let element = *material.choose_element(simconf);
        let collision = magic_collision(ion, &element, impact_parameter);
        let azimuth = TAU * simconf.drand();
        let incoming = ion.dir;

        if collision.recoil_energy > element.ed {
            let mut recoil = Ion::recoil_from(
                ion,
                simconf,
                element.z,
                element.m,
                collision.recoil_energy - element.ed,
            );
            recoil.set_dir(deflect(
                incoming,
                collision.psi_recoil as f32,
                azimuth + PI,
            ));
            recoils.push_back(recoil);
            spawned += 1;
        }

        ion.set_dir(deflect(incoming, collision.psi as f32, azimuth));
        ion.e -= collision.recoil_energy;
        if ion.e < 0.0 {
            ion.e = 0.0;
        }
        if ion.e < ion.ef {
            ion.state = IonState::Stopped;
            return spawned;
        }
    }

    // step guard tripped on a degenerate input
    ion.state = IonState::Stopped;
    spawned
}
