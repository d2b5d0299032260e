//! Page structure recovery: boilerplate removal, normalization and block
//! classification.

mod boilerplate;
mod classify;
mod normalize;

pub use boilerplate::{is_page_stamp, BoilerplateConfig, BoilerplateSet};
pub use classify::{flush, is_heading, is_list_item, transition, Classifier, LineKind, State};
pub use normalize::{normalize, NormalizeOptions, Normalizer};
