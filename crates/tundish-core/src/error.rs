pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Funnel definition parse error: {message}")]
    DefinitionParse { message: String },
}
