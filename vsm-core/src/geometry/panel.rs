//! A single horseshoe-vortex panel spanning two adjacent refined sections.

use vsm_math::vec3::Vec3;

use crate::geometry::filament::Filament;
use crate::geometry::section::Section;
use crate::section_models::SectionalAeroModel;

#[derive(Debug, Clone)]
pub struct Panel {
    pub aero_center: Vec3,
    pub control_point: Vec3,
    pub x_airf: Vec3,
    pub y_airf: Vec3,
    pub z_airf: Vec3,
    pub chord: f64,
    pub width: f64,
    pub va: Vec3,
    pub filaments: [Filament; 4],
    /// Trailing-edge point the near-side semi-infinite leg departs from; kept alongside
    /// `filaments` so the far-side leg (sharing direction, opposite sign) can be reconstructed
    /// without allocating a fifth array slot.
    te_next: Vec3,
    pub aero: SectionalAeroModel,
}

impl Panel {
    /// Builds a panel from two adjacent refined sections, with the freestream direction used to
    /// orient the semi-infinite trailing filaments at construction time (re-set later by
    /// `BodyAerodynamics::set_va`).
    pub fn from_sections(s_i: &Section, s_next: &Section, freestream_direction: Vec3) -> Self {
        let le_mid = 0.5 * (s_i.le + s_next.le);
        let te_mid = 0.5 * (s_i.te + s_next.te);

        let aero_center = le_mid + 0.25 * (te_mid - le_mid);
        let control_point = le_mid + 0.75 * (te_mid - le_mid);

        let x_airf = (te_mid - le_mid).normalize();
        let y_airf = (s_next.le - s_i.le).normalize();
        let z_airf = x_airf.cross(y_airf).normalize();

        let chord = (te_mid - le_mid).length();
        let width = (s_next.le - s_i.le).length();

        let qc_i = s_i.quarter_chord();
        let qc_next = s_next.quarter_chord();

        let reference_length = chord.max(width).max(1e-9);

        let filaments = [
            Filament::BoundSegment { p1: qc_i, p2: qc_next },
            Filament::TrailingSegment { p1: s_i.te, p2: qc_i },
            Filament::TrailingSegment { p1: qc_next, p2: s_next.te },
            Filament::TrailingSemiInf {
                pivot: s_i.te,
                direction: freestream_direction,
                sign: -1.0,
                reference_length,
            },
        ];

        let aero = SectionalAeroModel::interpolate(&s_i.aero, &s_next.aero, 0.5).unwrap_or(s_i.aero.clone());

        Self {
            aero_center,
            control_point,
            x_airf,
            y_airf,
            z_airf,
            chord,
            width,
            va: Vec3::default(),
            filaments,
            te_next: s_next.te,
            aero,
        }
    }

    /// Sets the semi-infinite trailing filament directions to the current per-panel freestream,
    /// called whenever `set_va` updates `va`.
    pub fn realign_wake_to(&mut self, freestream_direction: Vec3) {
        if let Filament::TrailingSemiInf { direction, .. } = &mut self.filaments[3] {
            *direction = freestream_direction;
        }
    }

    /// Sum of induced velocity from this panel's filament system (bound segment, two finite
    /// trailing segments and the semi-infinite wake pair) at `point`, for circulation `gamma`.
    pub fn induced_velocity(&self, point: Vec3, gamma: f64, core_radius_fraction: f64) -> Vec3 {
        let mut total = Vec3::default();

        for filament in &self.filaments {
            total += filament.induced_velocity(point, gamma, core_radius_fraction);
        }

        if let Filament::TrailingSemiInf { direction, sign, reference_length, .. } = self.filaments[3] {
            total += Filament::TrailingSemiInf {
                pivot: self.te_next,
                direction,
                sign: -sign,
                reference_length,
            }
            .induced_velocity(point, gamma, core_radius_fraction);
        }

        total
    }

    /// As [`Panel::induced_velocity`], but omits the panel's own bound segment. Used for the
    /// LLT diagonal, where the evaluation point sits exactly on that segment's line.
    pub fn induced_velocity_excluding_bound(&self, point: Vec3, gamma: f64, core_radius_fraction: f64) -> Vec3 {
        let mut total = Vec3::default();

        for filament in &self.filaments[1..] {
            total += filament.induced_velocity(point, gamma, core_radius_fraction);
        }

        if let Filament::TrailingSemiInf { direction, sign, reference_length, .. } = self.filaments[3] {
            total += Filament::TrailingSemiInf {
                pivot: self.te_next,
                direction,
                sign: -sign,
                reference_length,
            }
            .induced_velocity(point, gamma, core_radius_fraction);
        }

        total
    }

    pub fn orthonormality_error(&self) -> f64 {
        let xy = self.x_airf.dot(self.y_airf).abs();
        let yz = self.y_airf.dot(self.z_airf).abs();
        let zx = self.z_airf.dot(self.x_airf).abs();
        let unit_x = (self.x_airf.length() - 1.0).abs();
        let unit_y = (self.y_airf.length() - 1.0).abs();
        let unit_z = (self.z_airf.length() - 1.0).abs();

        xy + yz + zx + unit_x + unit_y + unit_z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(le: Vec3, te: Vec3) -> Section {
        Section::new(le, te, SectionalAeroModel::Inviscid).unwrap()
    }

    #[test]
    fn panel_frame_is_orthonormal() {
        let s1 = section(Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let s2 = section(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 0.0));

        let panel = Panel::from_sections(&s1, &s2, Vec3::unit_x());
        assert!(panel.orthonormality_error() < 1e-9);
    }

    #[test]
    fn control_point_is_at_three_quarter_chord() {
        let s1 = section(Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let s2 = section(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 0.0));

        let panel = Panel::from_sections(&s1, &s2, Vec3::unit_x());
        assert!((panel.control_point.x - 0.75).abs() < 1e-9);
        assert!((panel.aero_center.x - 0.25).abs() < 1e-9);
    }

    #[test]
    fn chord_and_width_match_geometry() {
        let s1 = section(Vec3::new(0.0, -1.0, 0.0), Vec3::new(2.0, -1.0, 0.0));
        let s2 = section(Vec3::new(0.0, 1.0, 0.0), Vec3::new(2.0, 1.0, 0.0));

        let panel = Panel::from_sections(&s1, &s2, Vec3::unit_x());
        assert!((panel.chord - 2.0).abs() < 1e-9);
        assert!((panel.width - 2.0).abs() < 1e-9);
    }
}
