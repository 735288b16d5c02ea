//! Wing mesh refinement: turns user-provided sections into `n_panels + 1` evenly-governed
//! refined sections, then builds panels between consecutive pairs.

use serde::{Deserialize, Serialize};
use vsm_math::vec3::Vec3;

use crate::error::{Error, Result};
use crate::geometry::panel::Panel;
use crate::geometry::section::Section;
use crate::section_models::SectionalAeroModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum PanelDistribution {
    Linear,
    Cosine,
    CosineVanGarrel,
    SplitProvided,
    Unchanged,
}

pub struct Wing {
    pub n_panels: usize,
    pub distribution: PanelDistribution,
    pub spanwise_direction: Vec3,
    pub remove_nan: bool,
    pub user_sections: Vec<Section>,
    pub refined_sections: Vec<Section>,
    pub panels: Vec<Panel>,
}

impl Wing {
    pub fn new(n_panels: usize, distribution: PanelDistribution, spanwise_direction: Vec3, remove_nan: bool) -> Result<Self> {
        if n_panels < 1 {
            return Err(Error::Configuration("n_panels must be at least 1".to_string()));
        }

        Ok(Self {
            n_panels,
            distribution,
            spanwise_direction: spanwise_direction.normalize(),
            remove_nan,
            user_sections: Vec::new(),
            refined_sections: Vec::new(),
            panels: Vec::new(),
        })
    }

    pub fn add_section(&mut self, le: Vec3, te: Vec3, aero: SectionalAeroModel) -> Result<()> {
        self.user_sections.push(Section::new(le, te, aero)?);
        Ok(())
    }

    /// Sorts user sections, resamples to `n_panels + 1` refined sections per `distribution`, and
    /// rebuilds `panels`. Must be called (or re-called) before the wing can contribute to a
    /// `BodyAerodynamics` solve; any later change to `user_sections` or `distribution`
    /// invalidates the existing `panels`/`refined_sections` until this runs again.
    pub fn refine(&mut self, freestream_direction: Vec3) -> Result<()> {
        if self.user_sections.len() < 2 {
            return Err(Error::Configuration("a wing needs at least two sections".to_string()));
        }

        let mut sorted = self.user_sections.clone();
        sorted.sort_by(|a, b| {
            let pa = a.quarter_chord().dot(self.spanwise_direction);
            let pb = b.quarter_chord().dot(self.spanwise_direction);
            pb.partial_cmp(&pa).unwrap()
        });

        self.refined_sections = match self.distribution {
            PanelDistribution::Unchanged => refine_unchanged(&sorted, self.n_panels)?,
            PanelDistribution::SplitProvided => refine_split_provided(&sorted, self.n_panels, self.remove_nan)?,
            PanelDistribution::Linear => refine_by_parameter(&sorted, self.n_panels, self.remove_nan, linear_targets)?,
            PanelDistribution::Cosine => refine_by_parameter(&sorted, self.n_panels, self.remove_nan, cosine_targets)?,
            PanelDistribution::CosineVanGarrel => {
                refine_by_parameter(&sorted, self.n_panels, self.remove_nan, cosine_van_garrel_targets)?
            }
        };

        check_monotone(&self.refined_sections, self.spanwise_direction)?;

        self.panels = self
            .refined_sections
            .windows(2)
            .map(|pair| Panel::from_sections(&pair[0], &pair[1], freestream_direction))
            .collect();

        Ok(())
    }
}

fn check_monotone(sections: &[Section], spanwise_direction: Vec3) -> Result<()> {
    let projections: Vec<f64> = sections.iter().map(|s| s.quarter_chord().dot(spanwise_direction)).collect();

    if projections.windows(2).any(|w| w[0] <= w[1]) {
        return Err(Error::Geometry(
            "refined sections are not strictly monotone along the span axis".to_string(),
        ));
    }

    Ok(())
}

fn refine_unchanged(sorted: &[Section], n_panels: usize) -> Result<Vec<Section>> {
    if sorted.len() != n_panels + 1 {
        return Err(Error::Configuration(
            "UNCHANGED distribution requires exactly n_panels + 1 user sections".to_string(),
        ));
    }

    Ok(sorted.to_vec())
}

/// Cumulative arc length along the quarter-chord poly-line through `sorted`, one entry per
/// section, `cumulative[0] == 0.0`.
fn cumulative_arc_length(sorted: &[Section]) -> Vec<f64> {
    let mut cumulative = vec![0.0; sorted.len()];
    for i in 1..sorted.len() {
        let step = sorted[i].quarter_chord().distance(sorted[i - 1].quarter_chord());
        cumulative[i] = cumulative[i - 1] + step;
    }
    cumulative
}

fn linear_targets(sorted: &[Section], n_panels: usize) -> Vec<f64> {
    let cumulative = cumulative_arc_length(sorted);
    let total = *cumulative.last().unwrap();

    (0..=n_panels).map(|i| total * i as f64 / n_panels as f64).collect()
}

fn cosine_targets(sorted: &[Section], n_panels: usize) -> Vec<f64> {
    let cumulative = cumulative_arc_length(sorted);
    let total = *cumulative.last().unwrap();

    (0..=n_panels)
        .map(|i| {
            let theta = std::f64::consts::PI * i as f64 / n_panels as f64;
            total * 0.5 * (1.0 - theta.cos())
        })
        .collect()
}

/// Van Garrel's non-uniform cosine spacing: biases node density towards segments with a large
/// relative chord gradient, by locally rescaling the cosine parameter with the chord-length
/// derivative along the poly-line.
fn cosine_van_garrel_targets(sorted: &[Section], n_panels: usize) -> Vec<f64> {
    let cumulative = cumulative_arc_length(sorted);
    let total = *cumulative.last().unwrap();
    if total <= 0.0 {
        return vec![0.0; n_panels + 1];
    }

    let chords: Vec<f64> = sorted.iter().map(|s| s.chord_vector().length()).collect();

    let weights: Vec<f64> = (0..sorted.len())
        .map(|i| {
            let prev = chords[i.saturating_sub(1)];
            let next = chords[(i + 1).min(chords.len() - 1)];
            1.0 + (next - prev).abs() / chords[i].max(1e-9)
        })
        .collect();

    let mut weighted_cumulative = vec![0.0; sorted.len()];
    for i in 1..sorted.len() {
        let ds = cumulative[i] - cumulative[i - 1];
        let w = 0.5 * (weights[i] + weights[i - 1]);
        weighted_cumulative[i] = weighted_cumulative[i - 1] + ds * w;
    }
    let weighted_total = *weighted_cumulative.last().unwrap();

    (0..=n_panels)
        .map(|i| {
            let theta = std::f64::consts::PI * i as f64 / n_panels as f64;
            let target_weighted = weighted_total * 0.5 * (1.0 - theta.cos());

            let idx = weighted_cumulative.partition_point(|&c| c < target_weighted).min(sorted.len() - 1).max(1);
            let (w0, w1) = (weighted_cumulative[idx - 1], weighted_cumulative[idx]);
            let (c0, c1) = (cumulative[idx - 1], cumulative[idx]);

            if w1 > w0 {
                let t = (target_weighted - w0) / (w1 - w0);
                c0 + t * (c1 - c0)
            } else {
                c0
            }
        })
        .map(|c| c.clamp(0.0, total))
        .collect()
}

fn refine_split_provided(sorted: &[Section], n_panels: usize, remove_nan: bool) -> Result<Vec<Section>> {
    let cumulative = cumulative_arc_length(sorted);
    let target_count = n_panels + 1;

    if target_count < sorted.len() {
        return Err(Error::Configuration(
            "SPLIT_PROVIDED requires n_panels + 1 >= the number of user sections".to_string(),
        ));
    }

    let mut targets = cumulative.clone();
    let extra_needed = target_count - sorted.len();

    let segment_lengths: Vec<f64> = cumulative.windows(2).map(|w| w[1] - w[0]).collect();
    let total_length: f64 = segment_lengths.iter().sum();

    if extra_needed > 0 && total_length > 0.0 {
        let mut allocation: Vec<usize> = segment_lengths
            .iter()
            .map(|&len| ((extra_needed as f64) * len / total_length).floor() as usize)
            .collect();

        let mut allocated: usize = allocation.iter().sum();
        let mut i = 0;
        while allocated < extra_needed {
            allocation[i % allocation.len()] += 1;
            allocated += 1;
            i += 1;
        }

        let mut extra_points = Vec::with_capacity(extra_needed);
        for (seg_index, &count) in allocation.iter().enumerate() {
            let (start, end) = (cumulative[seg_index], cumulative[seg_index + 1]);
            for k in 1..=count {
                let t = k as f64 / (count + 1) as f64;
                extra_points.push(start + t * (end - start));
            }
        }

        targets.extend(extra_points);
    }

    targets.sort_by(|a, b| a.partial_cmp(b).unwrap());
    targets.dedup_by(|a, b| (*a - *b).abs() < 1e-12);

    build_sections_at_targets(sorted, &cumulative, &targets, remove_nan)
}

fn refine_by_parameter(
    sorted: &[Section],
    n_panels: usize,
    remove_nan: bool,
    target_fn: impl Fn(&[Section], usize) -> Vec<f64>,
) -> Result<Vec<Section>> {
    let cumulative = cumulative_arc_length(sorted);
    let targets = target_fn(sorted, n_panels);

    build_sections_at_targets(sorted, &cumulative, &targets, remove_nan)
}

fn build_sections_at_targets(
    sorted: &[Section],
    cumulative: &[f64],
    targets: &[f64],
    remove_nan: bool,
) -> Result<Vec<Section>> {
    targets
        .iter()
        .map(|&target| interpolate_section_at(sorted, cumulative, target, remove_nan))
        .collect()
}

fn interpolate_section_at(sorted: &[Section], cumulative: &[f64], target: f64, _remove_nan: bool) -> Result<Section> {
    let last = cumulative.len() - 1;

    let idx = cumulative.partition_point(|&c| c < target).clamp(1, last);
    let (i0, i1) = (idx - 1, idx);

    let (c0, c1) = (cumulative[i0], cumulative[i1]);
    let t = if (c1 - c0).abs() > 1e-15 { ((target - c0) / (c1 - c0)).clamp(0.0, 1.0) } else { 0.0 };

    let s0 = &sorted[i0];
    let s1 = &sorted[i1];

    let qc0 = s0.quarter_chord();
    let qc1 = s1.quarter_chord();
    let qc = qc0 + t * (qc1 - qc0);

    let chord_dir = interpolate_chord_direction(s0.chord_vector(), s1.chord_vector(), t);
    let chord_len = s0.chord_vector().length() + t * (s1.chord_vector().length() - s0.chord_vector().length());

    let le = qc - chord_dir * (0.25 * chord_len);
    let te = qc + chord_dir * (0.75 * chord_len);

    let aero = SectionalAeroModel::interpolate(&s0.aero, &s1.aero, t)?;

    Section::new(le, te, aero)
}

fn interpolate_chord_direction(chord0: Vec3, chord1: Vec3, t: f64) -> Vec3 {
    let dir0 = chord0.normalize();
    let dir1 = chord1.normalize();
    (dir0 + t * (dir1 - dir0)).normalize()
}
