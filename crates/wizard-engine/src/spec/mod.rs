pub mod registry;
pub mod step;

pub use registry::{RegistryError, StepRegistry};
pub use step::{CustomValidator, StepDefinition, StepKind, StepValidator};
