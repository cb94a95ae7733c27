/// Persona-set access errors.
#[derive(Debug, thiserror::Error)]
pub enum PersonaError {
    #[error("no persona set published for user {user_id}")]
    NoPersonaSet { user_id: String },

    #[error("persona index {index} out of range: set has {count} personas")]
    UnknownPersonaIndex { index: usize, count: usize },
}
