//! Index-cycling carousel controller with wrap-around navigation, change
//! notification and a single self-driving auto-advance timer.

mod auto_advance;
mod controller;
pub mod settings;

pub use controller::{CarouselController, CarouselOptions, ObserverId};
pub use settings::CarouselSettings;
pub use shared::{
    domain::{Direction, IndexChange, NavigationCause},
    error::CarouselError,
};
