pub mod panel;
pub mod types;

pub use panel::{CardBody, Panel, ResultCard, ServiceIcon};
pub use types::*;
