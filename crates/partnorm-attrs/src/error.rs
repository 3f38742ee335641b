/// Errors a value parser may return.
///
/// Ordinary garbage never ends up here, it reads as `NaN`. An error means a
/// parser was handed text of a shape it was never registered for.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttributeError {
    #[error("{parser} expects {expected}, got '{value}'")]
    ContractViolation {
        parser: &'static str,
        expected: &'static str,
        value: String,
    },
}
