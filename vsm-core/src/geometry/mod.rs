//! Wing geometry: user sections, mesh refinement, panels and vortex filaments.

pub mod section;
pub mod panel;
pub mod filament;
pub mod wing;

pub use section::Section;
pub use panel::Panel;
pub use filament::Filament;
pub use wing::{PanelDistribution, Wing};
